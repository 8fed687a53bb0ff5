pub mod config;
pub mod error;
pub mod identity;
pub mod profile;
pub mod routing;
pub mod session;
pub mod user;

// Re-export common error type
pub use error::{EduhubError, Result};
pub use session::{SessionManager, SessionState};
