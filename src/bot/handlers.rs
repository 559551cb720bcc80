//! Action handlers: one per menu command, each operating on a single user
//! record. Every state-mutating handler follows the same shape: ensure the
//! record exists, check the action's cooldown, apply the reward to the loaded
//! record, run level-up rollover, then persist every changed field in one
//! atomic update. A blocked cooldown short-circuits with a wait-remaining
//! reply and no state change; nothing is written until all computation has
//! succeeded, so a failure mid-handler leaves the stored record untouched.

use chrono::Utc;
use log::debug;

use crate::bot::commands::MenuCommand;
use crate::bot::render;
use crate::tree::cooldown::{CooldownPolicy, GatedAction};
use crate::tree::errors::TreeError;
use crate::tree::progression::apply_experience;
use crate::tree::storage::TreeStore;
use crate::tree::types::{UserId, UserPatch};
use crate::validation::sanitize_display_name;

/// Experience granted by one watering.
pub const WATER_EXP: u32 = 2;
/// Experience granted by one sun.
pub const SUN_EXP: u32 = 2;

/// The handler set: owns the store handle and the cooldown policy for the
/// life of the process. Both are injected by the caller; there is no global
/// state here.
pub struct TreeHandlers {
    store: TreeStore,
    cooldowns: CooldownPolicy,
    welcome_message: String,
}

impl TreeHandlers {
    pub fn new(store: TreeStore, cooldowns: CooldownPolicy, welcome_message: String) -> Self {
        Self {
            store,
            cooldowns,
            welcome_message,
        }
    }

    pub fn store(&self) -> &TreeStore {
        &self.store
    }

    /// Route one parsed command for `user_id` and return the replies to send,
    /// in order. A level-up may append several follow-up replies.
    pub fn dispatch(
        &self,
        command: &MenuCommand,
        user_id: UserId,
        display_name: &str,
    ) -> Result<Vec<String>, TreeError> {
        match command {
            MenuCommand::Start => self.start(user_id),
            MenuCommand::Status => self.status(user_id),
            MenuCommand::Water => self.water(user_id),
            MenuCommand::Sun => self.sun(user_id),
            MenuCommand::Daily => self.daily(user_id),
            MenuCommand::Profile => self.profile(user_id, display_name),
            MenuCommand::Roadmap => Ok(vec![render::roadmap()]),
            MenuCommand::Staking => Ok(vec![render::staking_placeholder()]),
            MenuCommand::Unknown(_) => Ok(vec![render::fallback()]),
        }
    }

    fn start(&self, user_id: UserId) -> Result<Vec<String>, TreeError> {
        self.store.ensure(user_id)?;
        Ok(vec![render::welcome(&self.welcome_message)])
    }

    fn status(&self, user_id: UserId) -> Result<Vec<String>, TreeError> {
        let record = self.store.ensure(user_id)?;
        Ok(vec![render::status(&record)])
    }

    fn profile(&self, user_id: UserId, display_name: &str) -> Result<Vec<String>, TreeError> {
        let record = self.store.ensure(user_id)?;
        let name = sanitize_display_name(display_name);
        Ok(vec![render::profile(&name, &record)])
    }

    fn water(&self, user_id: UserId) -> Result<Vec<String>, TreeError> {
        let mut record = self.store.ensure(user_id)?;
        let now = Utc::now();

        if let Some(remaining) = self
            .cooldowns
            .check(GatedAction::Water, record.last_water_at, now)
        {
            debug!("water blocked for {}: {}s left", user_id, remaining.total_seconds());
            let minutes = self.cooldowns.duration_seconds(GatedAction::Water) / 60;
            return Ok(vec![render::water_blocked(minutes, &remaining)]);
        }

        record.water = record.water.saturating_add(1);
        let level_ups = apply_experience(&mut record, WATER_EXP);
        self.store.update(
            user_id,
            &UserPatch {
                water: Some(record.water),
                sun: Some(record.sun),
                exp: Some(record.exp),
                level: Some(record.level),
                last_water_at: Some(now),
                ..Default::default()
            },
        )?;

        let mut replies = vec![render::water_success()];
        replies.extend(level_ups.iter().map(render::level_up));
        Ok(replies)
    }

    fn sun(&self, user_id: UserId) -> Result<Vec<String>, TreeError> {
        let mut record = self.store.ensure(user_id)?;
        let now = Utc::now();

        if let Some(remaining) = self
            .cooldowns
            .check(GatedAction::Sun, record.last_sun_at, now)
        {
            debug!("sun blocked for {}: {}s left", user_id, remaining.total_seconds());
            let minutes = self.cooldowns.duration_seconds(GatedAction::Sun) / 60;
            return Ok(vec![render::sun_blocked(minutes, &remaining)]);
        }

        record.sun = record.sun.saturating_add(1);
        let level_ups = apply_experience(&mut record, SUN_EXP);
        self.store.update(
            user_id,
            &UserPatch {
                sun: Some(record.sun),
                water: Some(record.water),
                exp: Some(record.exp),
                level: Some(record.level),
                last_sun_at: Some(now),
                ..Default::default()
            },
        )?;

        let mut replies = vec![render::sun_success()];
        replies.extend(level_ups.iter().map(render::level_up));
        Ok(replies)
    }

    fn daily(&self, user_id: UserId) -> Result<Vec<String>, TreeError> {
        let mut record = self.store.ensure(user_id)?;
        let now = Utc::now();

        if let Some(remaining) = self
            .cooldowns
            .check(GatedAction::Daily, record.last_daily_at, now)
        {
            debug!("daily blocked for {}: {}s left", user_id, remaining.total_seconds());
            return Ok(vec![render::daily_blocked(&remaining)]);
        }

        // Rewards scale with the level held *before* the grant; a bonus that
        // levels the tree up does not raise its own payout.
        let sun_reward = 1 + record.level / 5;
        let water_reward = 1 + record.level / 6;
        let exp_reward = 5 + record.level;

        record.sun = record.sun.saturating_add(sun_reward);
        record.water = record.water.saturating_add(water_reward);
        let level_ups = apply_experience(&mut record, exp_reward);
        self.store.update(
            user_id,
            &UserPatch {
                sun: Some(record.sun),
                water: Some(record.water),
                exp: Some(record.exp),
                level: Some(record.level),
                last_daily_at: Some(now),
                ..Default::default()
            },
        )?;

        let mut replies = vec![render::daily_success(sun_reward, water_reward, exp_reward)];
        replies.extend(level_ups.iter().map(render::level_up));
        Ok(replies)
    }
}
