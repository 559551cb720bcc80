//! # Configuration Management Module
//!
//! Centralized configuration for the Wild Tree bot: type-safe TOML with
//! serde, validation on load, and sensible defaults for every value.
//!
//! Sections:
//!
//! - `[bot]` — bot identity and the welcome text sent on first contact
//! - `[storage]` — data directory for the embedded user-record store
//! - `[cooldowns]` — per-action minimum intervals in seconds
//! - `[logging]` — log level and optional log file
//!
//! ```toml
//! [bot]
//! name = "Wild Tree"
//! welcome_message = "Welcome to Wild Tree! 🌳 Care for your tree with the menu below."
//!
//! [storage]
//! data_dir = "data"
//!
//! [cooldowns]
//! water_seconds = 300
//! sun_seconds = 600
//! daily_seconds = 86400
//!
//! [logging]
//! level = "info"
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    pub name: String,
    pub welcome_message: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "Wild Tree".to_string(),
            welcome_message: "Welcome to Wild Tree! 🌳 Care for your tree with the menu below."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
        }
    }
}

/// Minimum interval, in seconds, between successive uses of each gated
/// action. Each gate is tracked independently per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CooldownConfig {
    #[serde(default = "default_water_seconds")]
    pub water_seconds: u64,
    #[serde(default = "default_sun_seconds")]
    pub sun_seconds: u64,
    #[serde(default = "default_daily_seconds")]
    pub daily_seconds: u64,
}

fn default_water_seconds() -> u64 {
    300
}

fn default_sun_seconds() -> u64 {
    600
}

fn default_daily_seconds() -> u64 {
    24 * 3600
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            water_seconds: default_water_seconds(),
            sun_seconds: default_sun_seconds(),
            daily_seconds: default_daily_seconds(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error. CLI verbosity overrides.
    #[serde(default)]
    pub level: Option<String>,
    /// Optional log file; when set, log lines are appended there and echoed
    /// to the console only when stdout is a TTY.
    #[serde(default)]
    pub file: Option<String>,
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub cooldowns: CooldownConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub async fn load(path: &str) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("cannot read config {}: {}", path, e))?;
        let config: Config = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Write a starter configuration file with default values. Refuses to
    /// overwrite an existing file.
    pub async fn create_default(path: &str) -> Result<()> {
        if fs::try_exists(path).await.unwrap_or(false) {
            return Err(anyhow!("config file {} already exists", path));
        }
        let rendered = toml::to_string_pretty(&Config::default())?;
        fs::write(path, rendered).await?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.bot.name.trim().is_empty() {
            return Err(anyhow!("bot.name must not be empty"));
        }
        if self.storage.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir must not be empty"));
        }
        for (label, seconds) in [
            ("cooldowns.water_seconds", self.cooldowns.water_seconds),
            ("cooldowns.sun_seconds", self.cooldowns.sun_seconds),
            ("cooldowns.daily_seconds", self.cooldowns.daily_seconds),
        ] {
            if seconds == 0 {
                return Err(anyhow!("{} must be positive", label));
            }
        }
        if let Some(ref level) = self.logging.level {
            let known = ["trace", "debug", "info", "warn", "error"];
            if !known.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(anyhow!("logging.level '{}' is not a known level", level));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_cooldowns() {
        let config = Config::default();
        assert_eq!(config.cooldowns.water_seconds, 300);
        assert_eq!(config.cooldowns.sun_seconds, 600);
        assert_eq!(config.cooldowns.daily_seconds, 86_400);
        config.validate().unwrap();
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [cooldowns]
            water_seconds = 60
            "#,
        )
        .unwrap();
        assert_eq!(config.cooldowns.water_seconds, 60);
        assert_eq!(config.cooldowns.sun_seconds, 600);
        assert_eq!(config.bot.name, "Wild Tree");
    }

    #[test]
    fn zero_cooldown_fails_validation() {
        let mut config = Config::default();
        config.cooldowns.daily_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn bogus_log_level_fails_validation() {
        let mut config = Config::default();
        config.logging.level = Some("chatty".to_string());
        assert!(config.validate().is_err());
    }
}
