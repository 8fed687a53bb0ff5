//! Profile store trait.
//!
//! Defines the interface for reading and writing user profile records.

use async_trait::async_trait;

use crate::error::Result;
use crate::user::UserProfile;

/// An abstract store for user profiles, keyed by identity uid.
///
/// This trait decouples the session core from the storage mechanism
/// (hosted document database, TOML files, in-memory map).
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Finds the profile stored for `uid`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UserProfile))`: Profile found
    /// - `Ok(None)`: No profile stored for this uid
    /// - `Err(_)`: Error occurred during retrieval
    async fn get(&self, uid: &str) -> Result<Option<UserProfile>>;

    /// Stores `profile` under `uid`, replacing any previous record.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Profile saved
    /// - `Err(_)`: Error occurred during save; nothing was written
    async fn put(&self, uid: &str, profile: &UserProfile) -> Result<()>;
}
