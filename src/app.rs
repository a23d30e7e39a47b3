//! App core for the bookmark bridge.
//!
//! Wires configuration, logging, the SQLite cache and the native host
//! process into one [`SyncManager`].

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::database::{LocalStore, SqliteStore};
use crate::logging;
use crate::managers::sync_manager::SyncManager;
use crate::services::config_engine::{ConfigEngine, ConfigEngineTrait};
use crate::services::native_transport::{NativeTransport, ProcessTransport};
use crate::types::config::SyncConfig;
use crate::types::errors::SyncError;
use crate::types::version::HostVersionCheckResult;

/// Executable to launch for the native host: `host_path` when configured,
/// otherwise `host_name` looked up on `PATH`.
pub fn host_program(config: &SyncConfig) -> PathBuf {
    match &config.host_path {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(&config.host_name),
    }
}

/// What [`App::startup`] found and did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupOutcome {
    pub host: HostVersionCheckResult,
    /// `None` when the host was unusable and no refresh was tried. Otherwise
    /// the number of bookmarks now cached, or why the refresh failed.
    pub cache_refresh: Option<Result<usize, SyncError>>,
}

pub struct App {
    pub config_engine: ConfigEngine,
    pub sync: SyncManager,
}

impl App {
    /// Loads the config file (defaults when absent), installs logging, opens
    /// the cache database and prepares the host transport.
    pub fn new(config_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config_engine = ConfigEngine::new(config_path);
        let config = config_engine.load()?;
        logging::init(&config.log_level);

        let store = SqliteStore::open(config_engine.database_path())?;
        let transport = ProcessTransport::new(host_program(&config));
        info!(
            config = %config_engine.get_config_path(),
            host = %transport.program().display(),
            "bookmark bridge initialized"
        );

        let sync = SyncManager::from_config(&config, Arc::new(transport), Arc::new(store));
        Ok(Self {
            config_engine,
            sync,
        })
    }

    /// Builds an app around caller-supplied parts, skipping disk and process setup.
    pub fn with_parts(
        config_engine: ConfigEngine,
        transport: Arc<dyn NativeTransport>,
        store: Arc<dyn LocalStore>,
    ) -> Self {
        let sync = SyncManager::from_config(config_engine.get_config(), transport, store);
        Self {
            config_engine,
            sync,
        }
    }

    /// Startup sequence: check the host, then refresh the cache when it is usable.
    ///
    /// The cached bookmarks stay readable whatever the outcome.
    pub async fn startup(&self) -> StartupOutcome {
        let host = self.sync.check_host().await;
        if !host.is_okay() {
            warn!(verdict = ?host, "native host unavailable, serving cached bookmarks");
            return StartupOutcome {
                host,
                cache_refresh: None,
            };
        }

        let refreshed = match self.sync.load_all_bookmarks().await {
            Ok(bookmarks) => self
                .sync
                .persist_bookmarks_locally(&bookmarks)
                .map(|_| bookmarks.len()),
            Err(e) => Err(e),
        };
        if let Err(e) = &refreshed {
            warn!(error = %e, "failed to refresh cached bookmarks at startup");
        }
        StartupOutcome {
            host,
            cache_refresh: Some(refreshed),
        }
    }
}
