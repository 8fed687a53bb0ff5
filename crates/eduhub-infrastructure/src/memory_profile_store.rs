//! In-memory ProfileStore, used by tests and ephemeral runs.

use async_trait::async_trait;
use eduhub_core::error::Result;
use eduhub_core::profile::ProfileStore;
use eduhub_core::user::UserProfile;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, UserProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored profiles.
    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get(&self, uid: &str) -> Result<Option<UserProfile>> {
        Ok(self.profiles.read().await.get(uid).cloned())
    }

    async fn put(&self, uid: &str, profile: &UserProfile) -> Result<()> {
        self.profiles
            .write()
            .await
            .insert(uid.to_string(), profile.clone());
        Ok(())
    }
}
