//! Route guarding.

use serde::Serialize;

use super::route::{Route, RouteAccess};
use crate::session::SessionState;

/// What the presentation layer should do for a requested route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "route", rename_all = "snake_case")]
pub enum RouteDecision {
    /// The session is still being resolved; show the loading view.
    Loading,
    /// Navigate to another route, replacing the current history entry.
    Redirect(Route),
    /// Show the requested screen.
    Render(Route),
    /// Show the 404 screen.
    NotFound,
}

/// Maps a route and the session state to a [`RouteDecision`].
///
/// Protected screens need a loaded profile or a running demo. The login
/// screen is only for visitors that have neither.
pub struct RouteGuard;

impl RouteGuard {
    pub fn decide(route: &Route, state: &SessionState) -> RouteDecision {
        match route.access() {
            RouteAccess::Redirect => RouteDecision::Redirect(Route::Login),
            RouteAccess::Unmatched => RouteDecision::NotFound,
            _ if state.loading => RouteDecision::Loading,
            RouteAccess::Protected if !state.has_access() => RouteDecision::Redirect(Route::Login),
            RouteAccess::Public if state.has_access() => RouteDecision::Redirect(Route::Home),
            _ => RouteDecision::Render(route.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Identity;
    use crate::session::DemoState;
    use crate::user::{UserProfile, UserRole};

    fn loaded() -> SessionState {
        SessionState {
            loading: false,
            ..SessionState::initial(600)
        }
    }

    fn signed_in() -> SessionState {
        let profile = UserProfile::new(
            "u1",
            None,
            UserRole::Teacher,
            "Edna",
            "5550000000",
            "Springfield",
        );
        SessionState {
            identity: Some(Identity::new("u1", None)),
            profile: Some(profile),
            ..loaded()
        }
    }

    fn demo() -> SessionState {
        SessionState {
            profile: Some(UserProfile::demo(UserRole::Student)),
            demo: DemoState::Active { remaining: 300 },
            ..loaded()
        }
    }

    #[test]
    fn test_loading_shows_loading_view() {
        let state = SessionState::initial(600);
        assert_eq!(RouteGuard::decide(&Route::Home, &state), RouteDecision::Loading);
        assert_eq!(RouteGuard::decide(&Route::Login, &state), RouteDecision::Loading);
    }

    #[test]
    fn test_anonymous_is_sent_to_login() {
        assert_eq!(
            RouteGuard::decide(&Route::Books, &loaded()),
            RouteDecision::Redirect(Route::Login)
        );
        assert_eq!(
            RouteGuard::decide(&Route::Login, &loaded()),
            RouteDecision::Render(Route::Login)
        );
    }

    #[test]
    fn test_signed_in_and_demo_skip_login() {
        for state in [signed_in(), demo()] {
            assert_eq!(
                RouteGuard::decide(&Route::Login, &state),
                RouteDecision::Redirect(Route::Home)
            );
            assert_eq!(
                RouteGuard::decide(&Route::Messaging, &state),
                RouteDecision::Render(Route::Messaging)
            );
        }
    }

    #[test]
    fn test_identity_without_profile_stays_on_login() {
        let state = SessionState {
            identity: Some(Identity::new("u2", None)),
            ..loaded()
        };
        assert_eq!(
            RouteGuard::decide(&Route::Login, &state),
            RouteDecision::Render(Route::Login)
        );
        assert_eq!(
            RouteGuard::decide(&Route::Home, &state),
            RouteDecision::Redirect(Route::Login)
        );
    }

    #[test]
    fn test_root_and_unknown() {
        let state = SessionState::initial(600);
        assert_eq!(
            RouteGuard::decide(&Route::Root, &state),
            RouteDecision::Redirect(Route::Login)
        );
        assert_eq!(
            RouteGuard::decide(&Route::parse("/nowhere"), &signed_in()),
            RouteDecision::NotFound
        );
    }
}
