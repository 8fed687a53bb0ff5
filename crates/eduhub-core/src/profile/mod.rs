//! Profile store module.
//!
//! # Module Structure
//!
//! - `repository`: `ProfileStore` trait for profile persistence

mod repository;

pub use repository::ProfileStore;
