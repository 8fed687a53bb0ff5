//! Routing module.
//!
//! Decides what the presentation layer shows for a path given the session
//! state, and which navigation entries a role gets.
//!
//! # Module Structure
//!
//! - `route`: Application routes and path parsing
//! - `guard`: Route guarding against the session state
//! - `navigation`: Role-based menus and user-menu helpers

mod guard;
mod navigation;
mod route;

pub use guard::{RouteDecision, RouteGuard};
pub use navigation::{NavItem, NavSection, Navigation, user_menu_label};
pub use route::{Route, RouteAccess};
