use serde::Serialize;

use crate::user::UserRole;

/// Why a demo session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DemoEndReason {
    /// The countdown reached zero.
    Expired,
    /// `end_demo` was called.
    Ended,
}

/// Notifications published by the session manager.
///
/// These are informational; [`super::SessionState`] stays the source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// The profile lookup for a newly reported identity finished.
    IdentityResolved { uid: String, profile_found: bool },
    /// The provider reported that nobody is signed in.
    SignedOut,
    /// A profile write succeeded and the in-memory profile was replaced.
    ProfileUpdated { uid: String },
    DemoStarted { role: UserRole },
    DemoTick { remaining: u32 },
    DemoEnded { reason: DemoEndReason },
}
