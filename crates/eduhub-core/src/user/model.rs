//! UserProfile domain model.
//!
//! Represents the application-level user record stored separately from the
//! authentication identity.

use serde::{Deserialize, Serialize};

use super::role::UserRole;

/// Uid of the synthesized demo profile.
pub const DEMO_USER_ID: &str = "demo-user";
/// Email of the synthesized demo profile.
pub const DEMO_EMAIL: &str = "demo@example.com";
/// Phone placeholder of the synthesized demo profile.
pub const DEMO_PHONE_NUMBER: &str = "555-0000";
/// Location placeholder of the synthesized demo profile.
pub const DEMO_LOCATION: &str = "Demo City";

/// User profile domain model.
///
/// Common fields are always present. The optional fields belong to a single
/// role: `age`, `grade` and `school_name` to students, `teaching_grades` and
/// `teaching_school` to teachers, `ceo_name` to schools.
///
/// Serialized with camelCase keys so the record matches the document shape
/// kept by the profile store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: UserRole,
    pub name: String,
    pub phone_number: String,
    pub location: String,

    // Student specific
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_name: Option<String>,

    // Teacher specific
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teaching_grades: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teaching_school: Option<String>,

    // School specific
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceo_name: Option<String>,
}

impl UserProfile {
    /// Creates a profile with the common fields and no role-specific data.
    pub fn new(
        uid: impl Into<String>,
        email: Option<String>,
        role: UserRole,
        name: impl Into<String>,
        phone_number: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            email,
            role,
            name: name.into(),
            phone_number: phone_number.into(),
            location: location.into(),
            age: None,
            grade: None,
            school_name: None,
            teaching_grades: None,
            teaching_school: None,
            ceo_name: None,
        }
    }

    /// The fixed placeholder profile used by demo sessions.
    ///
    /// # Example
    ///
    /// ```
    /// use eduhub_core::user::{UserProfile, UserRole};
    ///
    /// let profile = UserProfile::demo(UserRole::Teacher);
    /// assert_eq!(profile.name, "Demo Teacher");
    /// assert_eq!(profile.uid, "demo-user");
    /// ```
    pub fn demo(role: UserRole) -> Self {
        Self::new(
            DEMO_USER_ID,
            Some(DEMO_EMAIL.to_string()),
            role,
            format!("Demo {}", role.display_name()),
            DEMO_PHONE_NUMBER,
            DEMO_LOCATION,
        )
    }

    /// Returns true when only the fields of `self.role` are populated.
    pub fn has_consistent_role_fields(&self) -> bool {
        let student = self.age.is_some() || self.grade.is_some() || self.school_name.is_some();
        let teacher = self.teaching_grades.is_some() || self.teaching_school.is_some();
        let school = self.ceo_name.is_some();

        match self.role {
            UserRole::Student => !teacher && !school,
            UserRole::Teacher => !student && !school,
            UserRole::School => !student && !teacher,
        }
    }

    /// Avatar initials: first letter of up to two name words, uppercase.
    ///
    /// Falls back to `"U"` for an empty name.
    pub fn initials(&self) -> String {
        let initials: String = self
            .name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect();

        if initials.is_empty() {
            "U".to_string()
        } else {
            initials
        }
    }

    /// Role-specific greeting shown on the home feed.
    pub fn welcome_message(&self) -> String {
        match self.role {
            UserRole::Student => format!(
                "Welcome back, {}! Catch up on what's new in your learning journey.",
                self.name
            ),
            UserRole::Teacher => format!(
                "Welcome back, {}! See what your students and colleagues are sharing.",
                self.name
            ),
            UserRole::School => format!(
                "Welcome back, {}! Stay updated with your school community.",
                self.name
            ),
        }
    }
}
