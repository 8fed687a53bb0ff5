//! Identity domain model.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Opaque handle for a signed-in user, issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Provider-issued user id; also the key of the user's profile record.
    pub uid: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Identity {
    pub fn new(uid: impl Into<String>, email: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            email,
        }
    }
}

/// How long a sign-in is remembered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Persistence {
    /// Survives restarts ("remember me").
    Local,
    /// Forgotten when the process exits.
    #[default]
    Session,
}

impl Persistence {
    /// Maps the login form's "remember me" checkbox.
    pub fn from_remember_me(remember_me: bool) -> Self {
        if remember_me {
            Persistence::Local
        } else {
            Persistence::Session
        }
    }
}
