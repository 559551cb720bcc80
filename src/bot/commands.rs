//! Menu command parsing.
//!
//! The transport delivers raw user text; this module maps it onto the fixed
//! menu. Both the emoji button labels and bare keywords are accepted, so a
//! client without the reply keyboard can still type `water` or `daily`.

/// Menu button labels, shared by the parser and the welcome/menu replies.
pub const LABEL_STATUS: &str = "🌱 Plant / Status";
pub const LABEL_WATER: &str = "💧 Water";
pub const LABEL_SUN: &str = "🌞 Give sun";
pub const LABEL_ROADMAP: &str = "📜 Roadmap";
pub const LABEL_STAKING: &str = "💰 Staking (soon)";
pub const LABEL_DAILY: &str = "🎁 Daily bonus";
pub const LABEL_PROFILE: &str = "👤 Profile";

/// A recognized menu action, or `Unknown` for anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuCommand {
    /// First contact / `/start`: ensure the record and greet.
    Start,
    /// Read-only tree status with art.
    Status,
    /// Cooldown-gated watering.
    Water,
    /// Cooldown-gated sun.
    Sun,
    /// Once-a-day bonus.
    Daily,
    /// Static roadmap blurb, no state access.
    Roadmap,
    /// Static staking placeholder, no state access.
    Staking,
    /// Read-only profile card.
    Profile,
    /// Unmatched input; answered with the menu fallback.
    Unknown(String),
}

impl MenuCommand {
    /// Parse a raw inbound line. Button labels match exactly (post-trim);
    /// keywords match case-insensitively.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        match trimmed {
            LABEL_STATUS => return MenuCommand::Status,
            LABEL_WATER => return MenuCommand::Water,
            LABEL_SUN => return MenuCommand::Sun,
            LABEL_ROADMAP => return MenuCommand::Roadmap,
            LABEL_STAKING => return MenuCommand::Staking,
            LABEL_DAILY => return MenuCommand::Daily,
            LABEL_PROFILE => return MenuCommand::Profile,
            _ => {}
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "/start" | "start" => MenuCommand::Start,
            "status" | "plant" => MenuCommand::Status,
            "water" => MenuCommand::Water,
            "sun" => MenuCommand::Sun,
            "daily" | "bonus" => MenuCommand::Daily,
            "roadmap" => MenuCommand::Roadmap,
            "staking" => MenuCommand::Staking,
            "profile" => MenuCommand::Profile,
            _ => MenuCommand::Unknown(trimmed.to_string()),
        }
    }
}
