//! Session domain module.
//!
//! This module owns the client session: the current identity, its profile,
//! and the optional time-boxed demo session.
//!
//! # Module Structure
//!
//! - `state`: Session snapshot (`SessionState`, `DemoState`, `AuthStatus`)
//! - `event`: Notifications published by the manager (`SessionEvent`)
//! - `manager`: Session lifecycle management (`SessionManager`)
//!
//! # Usage
//!
//! ```ignore
//! use eduhub_core::session::{SessionManager, SessionState, SessionEvent};
//! ```

mod event;
mod manager;
mod state;

// Re-export public API
pub use event::{DemoEndReason, SessionEvent};
pub use manager::SessionManager;
pub use state::{AuthStatus, DemoState, SessionState};
