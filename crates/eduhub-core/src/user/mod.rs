//! User domain module.
//!
//! This module contains the role, profile and signup/login form models.
//!
//! # Module Structure
//!
//! - `role`: The three account roles (`UserRole`)
//! - `model`: User profile domain model and the demo placeholder profile
//! - `validation`: Login and signup form validation
//!
//! # Usage
//!
//! ```ignore
//! use eduhub_core::user::{UserProfile, UserRole, SignupForm, LoginForm};
//! ```

mod model;
mod role;
mod validation;

// Re-export public API
pub use model::{
    DEMO_EMAIL, DEMO_LOCATION, DEMO_PHONE_NUMBER, DEMO_USER_ID, UserProfile,
};
pub use role::UserRole;
pub use validation::{FieldError, LoginForm, RoleDetails, SignupForm, ValidationErrors};
