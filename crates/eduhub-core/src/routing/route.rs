//! Application routes.

use serde::Serialize;
use std::fmt;

/// How a route is guarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteAccess {
    /// Only for visitors without a session (login screen).
    Public,
    /// Only with a loaded profile or a running demo.
    Protected,
    /// Always forwards elsewhere.
    Redirect,
    /// Unknown path.
    Unmatched,
}

/// A screen of the application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "route", content = "path", rename_all = "snake_case")]
pub enum Route {
    Root,
    Login,
    Home,
    Video,
    Messaging,
    Books,
    Profile,
    NotFound(String),
}

impl Route {
    /// Parses a location path. Query strings, fragments and a trailing slash are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use eduhub_core::routing::Route;
    ///
    /// assert_eq!(Route::parse("/books/?page=2"), Route::Books);
    /// assert_eq!(Route::parse("/nope"), Route::NotFound("/nope".to_string()));
    /// ```
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');

        match trimmed {
            "" => Route::Root,
            "/login" => Route::Login,
            "/home" => Route::Home,
            "/video" => Route::Video,
            "/messaging" => Route::Messaging,
            "/books" => Route::Books,
            "/profile" => Route::Profile,
            other => Route::NotFound(other.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Root => "/",
            Route::Login => "/login",
            Route::Home => "/home",
            Route::Video => "/video",
            Route::Messaging => "/messaging",
            Route::Books => "/books",
            Route::Profile => "/profile",
            Route::NotFound(path) => path,
        }
    }

    pub fn access(&self) -> RouteAccess {
        match self {
            Route::Login => RouteAccess::Public,
            Route::Home | Route::Video | Route::Messaging | Route::Books | Route::Profile => {
                RouteAccess::Protected
            }
            Route::Root => RouteAccess::Redirect,
            Route::NotFound(_) => RouteAccess::Unmatched,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Route::Root);
        assert_eq!(Route::parse(""), Route::Root);
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/messaging#thread-3"), Route::Messaging);
        assert_eq!(Route::parse("/profile/"), Route::Profile);
    }

    #[test]
    fn test_role_tool_paths_are_unmatched() {
        assert_eq!(
            Route::parse("/teacher/grades"),
            Route::NotFound("/teacher/grades".to_string())
        );
    }

    #[test]
    fn test_path_round_trip_and_access() {
        for route in [
            Route::Login,
            Route::Home,
            Route::Video,
            Route::Messaging,
            Route::Books,
            Route::Profile,
        ] {
            assert_eq!(Route::parse(route.path()), route);
        }
        assert_eq!(Route::Login.access(), RouteAccess::Public);
        assert_eq!(Route::Books.access(), RouteAccess::Protected);
        assert_eq!(Route::Root.access(), RouteAccess::Redirect);
    }
}
