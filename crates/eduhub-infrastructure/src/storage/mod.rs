//! Storage layer for atomic file operations.

mod atomic_toml;

pub use atomic_toml::AtomicTomlFile;

use eduhub_core::error::{EduhubError, Result};

/// Runs blocking file I/O on the Tokio blocking pool.
pub(crate) async fn run_blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| EduhubError::internal(format!("Blocking storage task failed: {}", e)))?
}
