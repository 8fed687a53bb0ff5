//! Unified path management for EduHub files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/eduhub/            # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/eduhub/       # Data directory ([storage] data_dir overrides)
//! ├── accounts.toml            # Local identity provider accounts
//! ├── session.toml             # Remembered sign-in ("remember me")
//! ├── users/                   # One profile document per uid
//! │   └── <uid>.toml
//! └── logs/                    # Application logs
//!     └── eduhub.log.YYYY-MM-DD
//! ```

use eduhub_core::error::{EduhubError, Result};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "eduhub";

/// Resolved locations of every file the client reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EduhubPaths {
    config_file: PathBuf,
    data_dir: PathBuf,
}

impl EduhubPaths {
    pub fn new(config_file: PathBuf, data_dir: PathBuf) -> Self {
        Self {
            config_file,
            data_dir,
        }
    }

    /// Returns the platform default path of `config.toml`.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: e.g. `~/.config/eduhub/config.toml`
    /// - `Err(EduhubError::Config)`: The platform has no config directory
    pub fn default_config_file() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join("config.toml"))
            .ok_or_else(|| EduhubError::config("Cannot determine the config directory"))
    }

    /// Returns the platform default data directory (e.g. `~/.local/share/eduhub`).
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| EduhubError::config("Cannot determine the data directory"))
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn users_dir(&self) -> PathBuf {
        self.data_dir.join("users")
    }

    pub fn accounts_file(&self) -> PathBuf {
        self.data_dir.join("accounts.toml")
    }

    pub fn session_file(&self) -> PathBuf {
        self.data_dir.join("session.toml")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_data_dir() {
        let paths = EduhubPaths::new(
            PathBuf::from("/etc/eduhub/config.toml"),
            PathBuf::from("/var/lib/eduhub"),
        );

        assert_eq!(paths.config_file(), Path::new("/etc/eduhub/config.toml"));
        assert_eq!(paths.users_dir(), PathBuf::from("/var/lib/eduhub/users"));
        assert_eq!(
            paths.accounts_file(),
            PathBuf::from("/var/lib/eduhub/accounts.toml")
        );
        assert_eq!(
            paths.session_file(),
            PathBuf::from("/var/lib/eduhub/session.toml")
        );
        assert!(paths.logs_dir().starts_with(paths.data_dir()));
    }

    #[test]
    fn test_default_config_file() {
        if let Ok(path) = EduhubPaths::default_config_file() {
            assert!(path.ends_with("eduhub/config.toml"));
        }
    }
}
