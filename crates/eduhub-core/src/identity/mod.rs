//! Identity domain module.
//!
//! The identity is the authentication backend's handle for a signed-in user.
//! It is kept apart from the application profile.
//!
//! # Module Structure
//!
//! - `model`: `Identity` and sign-in `Persistence`
//! - `provider`: `IdentityProvider` trait and its subscription types

mod model;
mod provider;

// Re-export public API
pub use model::{Identity, Persistence};
pub use provider::{IdentityProvider, IdentitySubscription, SubscriberSet, SubscriptionToken};
