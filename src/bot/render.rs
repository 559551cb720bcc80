//! Reply text rendering. All user-visible strings live here so handlers stay
//! pure state-machine code.

use crate::bot::commands::{
    LABEL_DAILY, LABEL_PROFILE, LABEL_ROADMAP, LABEL_STAKING, LABEL_STATUS, LABEL_SUN, LABEL_WATER,
};
use crate::tree::cooldown::Remaining;
use crate::tree::progression::{experience_required, LevelUp, MAX_LEVEL};
use crate::tree::types::UserRecord;

/// Crown emoji per growth stage; levels past the table reuse the last stage.
fn crown(level: u32) -> &'static str {
    match level {
        1 => "🌱",
        2 => "🌿",
        3 => "🌳",
        4 => "🌲",
        _ => "🌴",
    }
}

/// Little ASCII tree for the status card. Saplings (level < 3) are just the
/// crown; grown trees get a trunk.
pub fn tree_art(level: u32) -> String {
    if level < 3 {
        return format!("  {}  ", crown(level));
    }
    format!("   {}\n   /\\\n  //\\\\\n ||  ||\n", crown(level))
}

pub fn welcome(welcome_message: &str) -> String {
    format!(
        "{}\n\n{}\n{}  {}\n{}\n{}\n{}\n{}",
        welcome_message,
        LABEL_STATUS,
        LABEL_WATER,
        LABEL_SUN,
        LABEL_ROADMAP,
        LABEL_STAKING,
        LABEL_DAILY,
        LABEL_PROFILE,
    )
}

pub fn status(record: &UserRecord) -> String {
    format!(
        "🌱 Tree status\n\nLevel: {}/{}\nEXP: {}/{}\nSun: {} ☀️\nWater: {} 💧\n\n{}",
        record.level,
        MAX_LEVEL,
        record.exp,
        experience_required(record.level),
        record.sun,
        record.water,
        tree_art(record.level),
    )
}

pub fn profile(display_name: &str, record: &UserRecord) -> String {
    format!(
        "👤 Profile: {}\nLevel: {}/{}\nEXP: {}/{}\nSun: {}☀️\nWater: {}💧",
        display_name,
        record.level,
        MAX_LEVEL,
        record.exp,
        experience_required(record.level),
        record.sun,
        record.water,
    )
}

pub fn water_success() -> String {
    "💧 Watered! Water +1, EXP +2".to_string()
}

pub fn water_blocked(cooldown_minutes: u64, remaining: &Remaining) -> String {
    format!(
        "💧 You can water once every {} minutes!\nWait {} min {} sec.",
        cooldown_minutes,
        remaining.minutes(),
        remaining.seconds(),
    )
}

pub fn sun_success() -> String {
    "☀️ Sunshine! Sun +1, EXP +2".to_string()
}

pub fn sun_blocked(cooldown_minutes: u64, remaining: &Remaining) -> String {
    format!(
        "☀️ You can give sun once every {} minutes!\nWait {} min {} sec.",
        cooldown_minutes,
        remaining.minutes(),
        remaining.seconds(),
    )
}

pub fn daily_success(sun_reward: u32, water_reward: u32, exp_reward: u32) -> String {
    format!(
        "🎁 Daily bonus!\nSun+{}, Water+{}, EXP+{}",
        sun_reward, water_reward, exp_reward,
    )
}

pub fn daily_blocked(remaining: &Remaining) -> String {
    format!(
        "Next bonus in {}h {}m",
        remaining.hours(),
        remaining.minutes_of_hour(),
    )
}

pub fn level_up(up: &LevelUp) -> String {
    format!(
        "🎉 New level: {}! Sun+{}, Water+{}",
        up.level, up.sun_bonus, up.water_bonus,
    )
}

pub fn roadmap() -> String {
    "🗺️ Roadmap:\n1) Token launch\n2) Economy & bot\n3) NFT + meta-forest\n4) W-Leaf economy\n5) Forest metaverse"
        .to_string()
}

pub fn staking_placeholder() -> String {
    "💰 Staking will be added later!".to_string()
}

pub fn fallback() -> String {
    "Use the menu buttons!".to_string()
}

pub fn generic_failure() -> String {
    "🌧️ Something went wrong, please try again later.".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sapling_art_has_no_trunk() {
        assert_eq!(tree_art(1), "  🌱  ");
        assert_eq!(tree_art(2), "  🌿  ");
        assert!(!tree_art(2).contains('|'));
    }

    #[test]
    fn grown_tree_art_has_trunk_and_caps_crown() {
        assert!(tree_art(3).contains("||"));
        assert!(tree_art(12).starts_with("   🌴"));
    }

    #[test]
    fn status_shows_required_exp_for_current_level() {
        let mut record = UserRecord::new(1);
        record.exp = 3;
        let text = status(&record);
        assert!(text.contains("EXP: 3/5"));
        assert!(text.contains("Level: 1/20"));
    }
}
