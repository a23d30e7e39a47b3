use serde::{Deserialize, Serialize};

/// Runtime configuration for the bookmark bridge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SyncConfig {
    /// Name the native host is registered under.
    pub host_name: String,
    /// Path to the host executable. When unset, `host_name` is resolved via `PATH`.
    pub host_path: Option<String>,
    /// Oldest host version this crate can talk to. Newer majors are rejected too.
    pub minimum_binary_version: String,
    /// Layout tag written next to the cached bookmarks.
    pub bookmarks_schema_version: i64,
    /// Location of the SQLite cache. Defaults to the platform data dir.
    pub database_path: Option<String>,
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            host_name: "com.samhh.bukubrow".to_string(),
            host_path: None,
            minimum_binary_version: "5.0.0".to_string(),
            bookmarks_schema_version: 3,
            database_path: None,
            log_level: "info".to_string(),
        }
    }
}
