//! Minimum-interval gating for the care actions.
//!
//! Each gated action keeps its own "last performed at" timestamp on the user
//! record; an unset timestamp means the action has never been performed and is
//! always allowed. An action is blocked exactly while `now - last < duration`,
//! so at the boundary (`now - last == duration`) it is allowed again.

use chrono::{DateTime, Utc};

use crate::config::CooldownConfig;

/// A cooldown-gated user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatedAction {
    Water,
    Sun,
    Daily,
}

/// Time left until a gated action unlocks, split for message rendering with
/// floor division: water/sun replies use minutes+seconds, daily uses
/// hours+minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remaining {
    seconds_total: i64,
}

impl Remaining {
    pub fn total_seconds(&self) -> i64 {
        self.seconds_total
    }

    pub fn minutes(&self) -> i64 {
        self.seconds_total / 60
    }

    pub fn seconds(&self) -> i64 {
        self.seconds_total % 60
    }

    pub fn hours(&self) -> i64 {
        self.seconds_total / 3600
    }

    pub fn minutes_of_hour(&self) -> i64 {
        (self.seconds_total % 3600) / 60
    }
}

/// Per-action cooldown durations, sourced from the `[cooldowns]` config
/// section. Timestamps stay on the user record; this type only does the
/// arithmetic.
#[derive(Debug, Clone)]
pub struct CooldownPolicy {
    water_seconds: u64,
    sun_seconds: u64,
    daily_seconds: u64,
}

impl CooldownPolicy {
    pub fn from_config(config: &CooldownConfig) -> Self {
        Self {
            water_seconds: config.water_seconds,
            sun_seconds: config.sun_seconds,
            daily_seconds: config.daily_seconds,
        }
    }

    pub fn duration_seconds(&self, action: GatedAction) -> u64 {
        match action {
            GatedAction::Water => self.water_seconds,
            GatedAction::Sun => self.sun_seconds,
            GatedAction::Daily => self.daily_seconds,
        }
    }

    /// Check whether `action` is currently blocked. Returns the remaining
    /// wait when it is, `None` when the action may proceed.
    pub fn check(
        &self,
        action: GatedAction,
        last: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Option<Remaining> {
        let last = last?;
        let duration = self.duration_seconds(action) as i64;
        let elapsed = now.signed_duration_since(last).num_seconds();
        if elapsed >= duration {
            return None;
        }
        Some(Remaining {
            seconds_total: duration - elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn policy() -> CooldownPolicy {
        CooldownPolicy::from_config(&CooldownConfig::default())
    }

    #[test]
    fn never_performed_is_allowed() {
        let now = Utc::now();
        assert!(policy().check(GatedAction::Water, None, now).is_none());
        assert!(policy().check(GatedAction::Daily, None, now).is_none());
    }

    #[test]
    fn exactly_elapsed_is_allowed() {
        let now = Utc::now();
        let last = now - Duration::seconds(300);
        assert!(policy().check(GatedAction::Water, Some(last), now).is_none());
    }

    #[test]
    fn one_second_short_is_blocked() {
        let now = Utc::now();
        let last = now - Duration::seconds(299);
        let remaining = policy()
            .check(GatedAction::Water, Some(last), now)
            .expect("should be blocked");
        assert_eq!(remaining.total_seconds(), 1);
    }

    #[test]
    fn remaining_splits_into_minutes_and_seconds() {
        let now = Utc::now();
        let last = now - Duration::seconds(10);
        let remaining = policy()
            .check(GatedAction::Sun, Some(last), now)
            .expect("should be blocked");
        // 600 - 10 = 590 seconds left
        assert_eq!(remaining.minutes(), 9);
        assert_eq!(remaining.seconds(), 50);
    }

    #[test]
    fn remaining_splits_into_hours_and_minutes() {
        let now = Utc::now();
        let last = now - Duration::seconds(3600);
        let remaining = policy()
            .check(GatedAction::Daily, Some(last), now)
            .expect("should be blocked");
        // 86400 - 3600 = 82800 seconds = 23h 0m
        assert_eq!(remaining.hours(), 23);
        assert_eq!(remaining.minutes_of_hour(), 0);
    }

    #[test]
    fn gates_are_independent() {
        let now = Utc::now();
        let just_now = Some(now - Duration::seconds(1));
        let p = policy();
        assert!(p.check(GatedAction::Water, just_now, now).is_some());
        assert!(p.check(GatedAction::Sun, None, now).is_none());
        assert!(p.check(GatedAction::Daily, None, now).is_none());
    }
}
