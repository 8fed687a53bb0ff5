//! Configuration service.
//!
//! Loads the root configuration from `config.toml` and writes a file with
//! the defaults when none exists yet.

use eduhub_core::config::RootConfig;
use eduhub_core::error::{EduhubError, Result};
use std::path::{Path, PathBuf};

use crate::storage::AtomicTomlFile;

#[derive(Debug, Clone)]
pub struct ConfigService {
    file: AtomicTomlFile<RootConfig>,
}

impl ConfigService {
    pub fn new(config_file: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(config_file),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Loads and validates the configuration, creating it with defaults if missing.
    ///
    /// # Returns
    ///
    /// - `Ok(RootConfig)`: The stored or freshly written configuration
    /// - `Err(EduhubError::Config)`: The file is unreadable or holds invalid values
    pub fn load_or_create(&self) -> Result<RootConfig> {
        let config = match self.file.load().map_err(|e| self.config_error(e))? {
            Some(config) => config,
            None => {
                let config = RootConfig::default();
                self.file.save(&config)?;
                tracing::info!("Created default config at {}", self.path().display());
                config
            }
        };

        config.validate()?;
        Ok(config)
    }

    fn config_error(&self, e: EduhubError) -> EduhubError {
        EduhubError::config(format!("{}: {}", self.path().display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("eduhub/config.toml");
        let service = ConfigService::new(path.clone());

        let config = service.load_or_create().unwrap();

        assert_eq!(config, RootConfig::default());
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.contains("demo_duration_secs = 600"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();

        let config = ConfigService::new(path).load_or_create().unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.session.demo_duration_secs, 600);
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[session]\ndemo_tick_millis = 0\n").unwrap();

        let err = ConfigService::new(path).load_or_create().unwrap_err();
        assert!(matches!(err, EduhubError::Config(_)));
    }

    #[test]
    fn test_unparsable_file_is_a_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[session\n").unwrap();

        let err = ConfigService::new(path).load_or_create().unwrap_err();
        assert!(matches!(err, EduhubError::Config(_)));
    }
}
