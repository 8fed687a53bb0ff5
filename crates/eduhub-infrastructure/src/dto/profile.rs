//! Profile document (`users/<uid>.toml`).

use chrono::{DateTime, Utc};
use eduhub_core::user::UserProfile;
use serde::{Deserialize, Serialize};

/// A profile record plus write metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ProfileDocument {
    pub updated_at: DateTime<Utc>,
    pub profile: UserProfile,
}

impl ProfileDocument {
    pub fn stamped(profile: UserProfile) -> Self {
        Self {
            updated_at: Utc::now(),
            profile,
        }
    }
}

impl From<ProfileDocument> for UserProfile {
    fn from(doc: ProfileDocument) -> Self {
        doc.profile
    }
}
