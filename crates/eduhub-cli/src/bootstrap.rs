//! Composition root: config, logging, backends and the session.

use anyhow::{Context, Result};
use eduhub_application::AuthUseCase;
use eduhub_core::config::RootConfig;
use eduhub_core::identity::IdentityProvider;
use eduhub_core::profile::ProfileStore;
use eduhub_core::session::SessionManager;
use eduhub_infrastructure::{
    ConfigService, EduhubPaths, FileProfileStore, InMemoryProfileStore, LocalIdentityProvider,
};
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;

use crate::GlobalArgs;
use crate::logging;

pub struct App {
    pub auth: AuthUseCase,
    pub paths: EduhubPaths,
    pub json: bool,
    _log_guard: Option<WorkerGuard>,
}

impl App {
    pub fn session(&self) -> &SessionManager {
        self.auth.session()
    }

    pub fn shutdown(&self) {
        self.session().shutdown();
    }
}

pub fn bootstrap(args: &GlobalArgs) -> Result<App> {
    let config_file = match &args.config {
        Some(path) => path.clone(),
        None => EduhubPaths::default_config_file()?,
    };

    // Ephemeral runs leave the default config file alone.
    let config = if args.ephemeral && args.config.is_none() {
        RootConfig::default()
    } else {
        ConfigService::new(config_file.clone())
            .load_or_create()
            .context("Failed to load configuration")?
    };

    let data_dir = match args.data_dir.clone().or_else(|| config.storage.data_dir.clone()) {
        Some(dir) => dir,
        None => EduhubPaths::default_data_dir()?,
    };
    let paths = EduhubPaths::new(config_file, data_dir);

    let logs_dir = (!args.ephemeral).then(|| paths.logs_dir());
    let log_guard = logging::init(&config.logging, logs_dir, args.verbose)?;

    let (identity_provider, profile_store): (Arc<dyn IdentityProvider>, Arc<dyn ProfileStore>) =
        if args.ephemeral {
            tracing::info!("[Bootstrap] Using in-memory accounts and profiles");
            (
                Arc::new(LocalIdentityProvider::in_memory()),
                Arc::new(InMemoryProfileStore::new()),
            )
        } else {
            tracing::info!("[Bootstrap] Data directory: {}", paths.data_dir().display());
            (
                Arc::new(
                    LocalIdentityProvider::open_at(&paths)
                        .context("Failed to open local accounts")?,
                ),
                Arc::new(FileProfileStore::new(paths.users_dir())),
            )
        };

    let session = SessionManager::start(
        identity_provider.clone(),
        profile_store.clone(),
        config.session.clone(),
    )
    .context("Failed to start the session")?;

    Ok(App {
        auth: AuthUseCase::new(identity_provider, profile_store, session),
        paths,
        json: args.json,
        _log_guard: log_guard,
    })
}
