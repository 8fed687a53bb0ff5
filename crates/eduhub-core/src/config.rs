//! Configuration domain models.
//!
//! These are the sections of `config.toml`. Every field has a default, so a
//! partial or missing file still yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{EduhubError, Result};

/// Length of a demo session in seconds (ten minutes).
pub const DEFAULT_DEMO_DURATION_SECS: u32 = 600;
/// Countdown tick period in milliseconds.
pub const DEFAULT_DEMO_TICK_MILLIS: u64 = 1000;

/// Root configuration (`config.toml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootConfig {
    pub session: SessionSettings,
    pub logging: LoggingSettings,
    pub storage: StorageSettings,
}

impl RootConfig {
    /// Rejects values the session core cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.session.validate()
    }
}

/// Session manager settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Seconds a demo session lasts; the countdown starts here.
    pub demo_duration_secs: u32,
    /// Milliseconds between countdown decrements.
    pub demo_tick_millis: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            demo_duration_secs: DEFAULT_DEMO_DURATION_SECS,
            demo_tick_millis: DEFAULT_DEMO_TICK_MILLIS,
        }
    }
}

impl SessionSettings {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.demo_tick_millis)
    }

    pub fn validate(&self) -> Result<()> {
        if self.demo_duration_secs == 0 {
            return Err(EduhubError::config(
                "session.demo_duration_secs must be greater than 0",
            ));
        }
        if self.demo_tick_millis == 0 {
            return Err(EduhubError::config(
                "session.demo_tick_millis must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is not set (e.g. "info", "eduhub_core=debug").
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Storage location overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Replaces the platform data directory when set.
    pub data_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RootConfig::default();
        assert_eq!(config.session.demo_duration_secs, 600);
        assert_eq!(config.session.tick_period(), Duration::from_secs(1));
        assert_eq!(config.logging.level, "info");
        assert!(config.storage.data_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: RootConfig = toml::from_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.session, SessionSettings::default());
    }

    #[test]
    fn test_zero_values_are_rejected() {
        let settings = SessionSettings {
            demo_duration_secs: 0,
            ..SessionSettings::default()
        };
        assert!(settings.validate().is_err());

        let settings = SessionSettings {
            demo_tick_millis: 0,
            ..SessionSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
