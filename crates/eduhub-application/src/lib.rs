//! Application layer for EduHub.
//!
//! This crate provides use case implementations that coordinate the session
//! core with the identity provider and profile store.

pub mod auth_usecase;

pub use auth_usecase::AuthUseCase;
