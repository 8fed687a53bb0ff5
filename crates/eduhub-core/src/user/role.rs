//! Account roles.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The kind of account a user signed up as.
///
/// The role is chosen once (at signup or when a demo starts) and never changes.
/// It decides which role-specific profile fields apply and which navigation
/// sections are shown.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum UserRole {
    Student,
    Teacher,
    School,
}

impl UserRole {
    /// Capitalized label, e.g. `"Teacher"`.
    pub fn display_name(&self) -> &'static str {
        match self {
            UserRole::Student => "Student",
            UserRole::Teacher => "Teacher",
            UserRole::School => "School",
        }
    }
}
