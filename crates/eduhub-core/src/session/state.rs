//! Session state snapshot.

use serde::Serialize;

use crate::identity::Identity;
use crate::user::UserProfile;

/// Demo sub-state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DemoState {
    Inactive,
    Active { remaining: u32 },
}

impl DemoState {
    pub fn is_active(&self) -> bool {
        matches!(self, DemoState::Active { .. })
    }
}

/// Who is using the app, as far as routing is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    SignedIn,
    Demo,
    Anonymous,
}

/// Snapshot of the session held by [`super::SessionManager`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    /// Identity reported by the provider; `None` when signed out.
    pub identity: Option<Identity>,
    /// Profile of the signed-in user or the demo placeholder.
    pub profile: Option<UserProfile>,
    /// True until the first identity notification has been resolved.
    pub loading: bool,
    /// True while the profile for `identity` is being fetched.
    pub resolving: bool,
    pub demo: DemoState,
    /// Full demo budget, reported as the remaining time when no demo runs.
    pub demo_duration_secs: u32,
}

impl SessionState {
    /// State at application start: nothing known yet.
    pub fn initial(demo_duration_secs: u32) -> Self {
        Self {
            identity: None,
            profile: None,
            loading: true,
            resolving: false,
            demo: DemoState::Inactive,
            demo_duration_secs,
        }
    }

    pub fn is_demo_active(&self) -> bool {
        self.demo.is_active()
    }

    /// Seconds left in the demo; the full budget when no demo runs.
    pub fn demo_seconds_remaining(&self) -> u32 {
        match self.demo {
            DemoState::Active { remaining } => remaining,
            DemoState::Inactive => self.demo_duration_secs,
        }
    }

    /// A running demo wins over a signed-in identity, as it does in the user menu.
    pub fn auth_status(&self) -> AuthStatus {
        if self.is_demo_active() {
            AuthStatus::Demo
        } else if self.identity.is_some() {
            AuthStatus::SignedIn
        } else {
            AuthStatus::Anonymous
        }
    }

    /// Whether protected screens may be shown: a profile is loaded or a demo runs.
    ///
    /// An identity without a profile record (signup not completed) does not count.
    pub fn has_access(&self) -> bool {
        self.profile.is_some() || self.is_demo_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::UserRole;

    #[test]
    fn test_initial_state() {
        let state = SessionState::initial(600);
        assert!(state.loading);
        assert!(!state.is_demo_active());
        assert_eq!(state.demo_seconds_remaining(), 600);
        assert_eq!(state.auth_status(), AuthStatus::Anonymous);
        assert!(!state.has_access());
    }

    #[test]
    fn test_demo_counts_as_access() {
        let mut state = SessionState::initial(600);
        state.demo = DemoState::Active { remaining: 42 };
        state.profile = Some(UserProfile::demo(UserRole::Student));
        assert_eq!(state.demo_seconds_remaining(), 42);
        assert_eq!(state.auth_status(), AuthStatus::Demo);
        assert!(state.has_access());
    }

    #[test]
    fn test_identity_without_profile_has_no_access() {
        let mut state = SessionState::initial(600);
        state.identity = Some(Identity::new("u1", None));
        assert_eq!(state.auth_status(), AuthStatus::SignedIn);
        assert!(!state.has_access());
    }

    #[test]
    fn test_demo_over_identity_reports_demo() {
        let mut state = SessionState::initial(600);
        state.identity = Some(Identity::new("u1", None));
        state.demo = DemoState::Active { remaining: 10 };
        state.profile = Some(UserProfile::demo(UserRole::Teacher));
        assert_eq!(state.auth_status(), AuthStatus::Demo);
    }
}
