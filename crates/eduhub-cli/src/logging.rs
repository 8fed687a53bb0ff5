//! Tracing subscriber setup.

use anyhow::{Context, Result};
use eduhub_core::config::LoggingSettings;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "eduhub.log";

/// Installs the global subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to `settings.level`.
/// Logs go to a daily rolling file in `logs_dir` (when given) and to stderr
/// when `verbose` is set.
///
/// The returned guard flushes the file writer; keep it alive until exit.
pub fn init(
    settings: &LoggingSettings,
    logs_dir: Option<PathBuf>,
    verbose: bool,
) -> Result<Option<WorkerGuard>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.level)
            .with_context(|| format!("Invalid [logging] level '{}'", settings.level))?,
    };

    let stderr_layer = verbose.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
    });

    let (file_layer, guard) = match logs_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create logs directory {}", dir.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(rolling::daily(&dir, LOG_FILE_PREFIX));
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
