//! File-based implementation of ProfileStore.
//!
//! Each profile lives in its own TOML document under the users directory:
//!
//! ```text
//! <data>/users/
//! ├── 9b1c...e4.toml
//! └── 0f7a...21.toml
//! ```

use async_trait::async_trait;
use eduhub_core::error::{EduhubError, Result};
use eduhub_core::profile::ProfileStore;
use eduhub_core::user::UserProfile;
use std::path::PathBuf;

use crate::dto::ProfileDocument;
use crate::storage::{AtomicTomlFile, run_blocking};

const MAX_UID_LEN: usize = 128;

/// Stores one `<uid>.toml` document per user.
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    users_dir: PathBuf,
}

impl FileProfileStore {
    /// Creates a store rooted at `users_dir`. The directory is created on first write.
    pub fn new(users_dir: PathBuf) -> Self {
        Self { users_dir }
    }

    pub fn users_dir(&self) -> &std::path::Path {
        &self.users_dir
    }

    fn document(&self, uid: &str) -> Result<AtomicTomlFile<ProfileDocument>> {
        validate_uid(uid)?;
        Ok(AtomicTomlFile::new(self.users_dir.join(format!("{uid}.toml"))))
    }
}

/// Uids become file names, so only `[A-Za-z0-9_-]` is accepted.
fn validate_uid(uid: &str) -> Result<()> {
    let safe = !uid.is_empty()
        && uid.len() <= MAX_UID_LEN
        && uid
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if safe {
        Ok(())
    } else {
        Err(EduhubError::data_access(format!("Invalid uid '{}'", uid)))
    }
}

#[async_trait]
impl ProfileStore for FileProfileStore {
    async fn get(&self, uid: &str) -> Result<Option<UserProfile>> {
        let document = self.document(uid)?;
        let loaded = run_blocking(move || document.load()).await?;
        tracing::debug!(target: "storage", "Loaded profile {} (found: {})", uid, loaded.is_some());
        Ok(loaded.map(UserProfile::from))
    }

    async fn put(&self, uid: &str, profile: &UserProfile) -> Result<()> {
        let document = self.document(uid)?;
        let record = ProfileDocument::stamped(profile.clone());
        run_blocking(move || document.replace(&record)).await?;
        tracing::info!(target: "storage", "Saved profile {}", uid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eduhub_core::user::UserRole;
    use tempfile::TempDir;

    fn student(uid: &str) -> UserProfile {
        UserProfile {
            age: Some(12),
            grade: Some("7".to_string()),
            school_name: Some("Springfield Elementary".to_string()),
            ..UserProfile::new(
                uid,
                Some("bart@example.com".to_string()),
                UserRole::Student,
                "Bart",
                "5551234567",
                "Springfield",
            )
        }
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileProfileStore::new(temp_dir.path().join("users"));

        store.put("u-1", &student("u-1")).await.unwrap();

        assert_eq!(store.get("u-1").await.unwrap(), Some(student("u-1")));
        assert!(temp_dir.path().join("users/u-1.toml").exists());
        assert!(!temp_dir.path().join("users/.u-1.toml.tmp").exists());
    }

    #[tokio::test]
    async fn test_missing_profile_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileProfileStore::new(temp_dir.path().join("users"));

        assert!(store.get("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_replaces_previous_record() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileProfileStore::new(temp_dir.path().to_path_buf());
        store.put("u-1", &student("u-1")).await.unwrap();

        let mut moved = student("u-1");
        moved.location = "Shelbyville".to_string();
        store.put("u-1", &moved).await.unwrap();

        assert_eq!(
            store.get("u-1").await.unwrap().map(|p| p.location),
            Some("Shelbyville".to_string())
        );
    }

    #[tokio::test]
    async fn test_unsafe_uid_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileProfileStore::new(temp_dir.path().to_path_buf());

        for uid in ["", "../escape", "a/b", "dot.dot"] {
            assert!(store.get(uid).await.is_err(), "{uid:?} accepted");
            assert!(store.put(uid, &student("x")).await.is_err());
        }
    }

    #[tokio::test]
    async fn test_corrupt_document_surfaces_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("u-1.toml"), "not = [valid").unwrap();
        let store = FileProfileStore::new(temp_dir.path().to_path_buf());

        let err = store.get("u-1").await.unwrap_err();
        assert!(matches!(err, EduhubError::Serialization { .. }));
    }
}
