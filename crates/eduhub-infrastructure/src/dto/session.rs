//! Remembered sign-in (`session.toml`).

use chrono::{DateTime, Utc};
use eduhub_core::identity::Identity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct StoredSession {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub signed_in_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn for_identity(identity: &Identity) -> Self {
        Self {
            uid: identity.uid.clone(),
            email: identity.email.clone(),
            signed_in_at: Utc::now(),
        }
    }

    pub fn identity(&self) -> Identity {
        Identity::new(self.uid.clone(), self.email.clone())
    }
}
