//! Login and signup form validation.
//!
//! Every rule is checked and all violations are reported together, so a form
//! can show one message per field.

use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::model::UserProfile;
use super::role::UserRole;

const MIN_PASSWORD_LEN: usize = 6;
const MIN_NAME_LEN: usize = 2;
const MIN_PHONE_LEN: usize = 10;
const MIN_TEXT_LEN: usize = 2;
const MIN_AGE: u32 = 5;
const MAX_AGE: u32 = 100;

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All violations found in one form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// A single violation raised outside the form rules.
    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    fn push(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// First message reported for `field`, if any.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if !EmailAddress::is_valid(email) {
        errors.push("email", "Please enter a valid email address");
    }
}

fn check_password(errors: &mut ValidationErrors, password: &str) {
    if char_len(password) < MIN_PASSWORD_LEN {
        errors.push("password", "Password must be at least 6 characters");
    }
}

fn check_min(errors: &mut ValidationErrors, field: &str, value: &str, min: usize, message: &str) {
    if char_len(value) < min {
        errors.push(field, message);
    }
}

/// Credentials submitted on the login tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>, remember_me: bool) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            remember_me,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);
        errors.into_result()
    }
}

/// Role-specific part of the signup form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RoleDetails {
    #[serde(rename_all = "camelCase")]
    Student {
        age: Option<u32>,
        grade: String,
        school_name: String,
    },
    #[serde(rename_all = "camelCase")]
    Teacher {
        teaching_grades: Vec<String>,
        teaching_school: String,
    },
    #[serde(rename_all = "camelCase")]
    School { ceo_name: String },
}

impl RoleDetails {
    pub fn role(&self) -> UserRole {
        match self {
            RoleDetails::Student { .. } => UserRole::Student,
            RoleDetails::Teacher { .. } => UserRole::Teacher,
            RoleDetails::School { .. } => UserRole::School,
        }
    }

    fn validate_into(&self, errors: &mut ValidationErrors) {
        match self {
            RoleDetails::Student {
                age,
                grade,
                school_name,
            } => {
                if !age.is_some_and(|age| (MIN_AGE..=MAX_AGE).contains(&age)) {
                    errors.push("age", "Age must be between 5 and 100");
                }
                if grade.is_empty() {
                    errors.push("grade", "Please select your grade");
                }
                check_min(
                    errors,
                    "schoolName",
                    school_name,
                    MIN_TEXT_LEN,
                    "Please enter your school name",
                );
            }
            RoleDetails::Teacher {
                teaching_grades,
                teaching_school,
            } => {
                if teaching_grades.is_empty() {
                    errors.push(
                        "teachingGrades",
                        "Please select at least one grade you teach",
                    );
                }
                check_min(
                    errors,
                    "teachingSchool",
                    teaching_school,
                    MIN_TEXT_LEN,
                    "Please enter your school name",
                );
            }
            RoleDetails::School { ceo_name } => {
                check_min(
                    errors,
                    "ceoName",
                    ceo_name,
                    MIN_TEXT_LEN,
                    "Please enter the CEO's name",
                );
            }
        }
    }
}

/// Everything submitted on the signup tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone_number: String,
    pub location: String,
    #[serde(flatten)]
    pub details: RoleDetails,
}

impl SignupForm {
    pub fn role(&self) -> UserRole {
        self.details.role()
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);
        check_min(
            &mut errors,
            "name",
            &self.name,
            MIN_NAME_LEN,
            "Name must be at least 2 characters",
        );
        check_min(
            &mut errors,
            "phoneNumber",
            &self.phone_number,
            MIN_PHONE_LEN,
            "Please enter a valid phone number",
        );
        check_min(
            &mut errors,
            "location",
            &self.location,
            MIN_TEXT_LEN,
            "Please enter your location",
        );
        self.details.validate_into(&mut errors);
        errors.into_result()
    }

    /// Builds the stored profile for the account created with `uid`.
    ///
    /// The password is not part of the profile.
    pub fn to_profile(&self, uid: impl Into<String>) -> UserProfile {
        let base = UserProfile::new(
            uid,
            Some(self.email.clone()),
            self.role(),
            self.name.clone(),
            self.phone_number.clone(),
            self.location.clone(),
        );

        match &self.details {
            RoleDetails::Student {
                age,
                grade,
                school_name,
            } => UserProfile {
                age: *age,
                grade: Some(grade.clone()),
                school_name: Some(school_name.clone()),
                ..base
            },
            RoleDetails::Teacher {
                teaching_grades,
                teaching_school,
            } => UserProfile {
                teaching_grades: Some(teaching_grades.clone()),
                teaching_school: Some(teaching_school.clone()),
                ..base
            },
            RoleDetails::School { ceo_name } => UserProfile {
                ceo_name: Some(ceo_name.clone()),
                ..base
            },
        }
    }
}
