//! Tests for application wiring and the startup sequence.

mod support;

use bukubridge::app::{host_program, App};
use bukubridge::database::MemoryStore;
use bukubridge::services::config_engine::ConfigEngine;
use bukubridge::types::config::SyncConfig;
use bukubridge::types::errors::{NativeError, SyncError};
use bukubridge::types::version::HostVersionCheckResult;
use std::path::PathBuf;
use std::sync::Arc;
use support::{options, page, remote, ScriptedTransport};
use tempfile::TempDir;

fn engine_in_temp(dir: &TempDir) -> ConfigEngine {
    let path = dir.path().join("config.json").to_string_lossy().to_string();
    ConfigEngine::new(Some(path))
}

#[test]
fn test_host_program_prefers_configured_path() {
    let mut config = SyncConfig::default();
    assert_eq!(host_program(&config), PathBuf::from("com.samhh.bukubrow"));

    config.host_path = Some("/opt/bukubrow/bukubrow".to_string());
    assert_eq!(host_program(&config), PathBuf::from("/opt/bukubrow/bukubrow"));
}

#[tokio::test]
async fn test_startup_refreshes_cache_from_usable_host() {
    let dir = TempDir::new().unwrap();
    let transport = Arc::new(
        ScriptedTransport::new()
            .reply(options("5.2.1"))
            .reply(page(&[remote(1, "one", "https://a.com", ",x,")], false)),
    );
    let app = App::with_parts(engine_in_temp(&dir), transport, Arc::new(MemoryStore::new()));

    let outcome = app.startup().await;

    assert_eq!(outcome.host, HostVersionCheckResult::Okay);
    assert_eq!(outcome.cache_refresh, Some(Ok(1)));
    assert_eq!(app.sync.load_local_bookmarks_or_empty().len(), 1);
}

#[tokio::test]
async fn test_startup_reports_failed_refresh() {
    let dir = TempDir::new().unwrap();
    let transport = Arc::new(
        ScriptedTransport::new()
            .reply(options("5.0.0"))
            .fail(NativeError::Transport("pipe closed".to_string())),
    );
    let app = App::with_parts(engine_in_temp(&dir), transport, Arc::new(MemoryStore::new()));

    let outcome = app.startup().await;

    assert_eq!(outcome.host, HostVersionCheckResult::Okay);
    assert_eq!(
        outcome.cache_refresh,
        Some(Err(SyncError::Native(NativeError::Transport(
            "pipe closed".to_string()
        ))))
    );
    assert!(app.sync.load_local_bookmarks_or_empty().is_empty());
}

#[tokio::test]
async fn test_startup_reports_failed_persist() {
    let dir = TempDir::new().unwrap();
    let transport = Arc::new(
        ScriptedTransport::new()
            .reply(options("5.0.0"))
            .reply(page(&[remote(1, "one", "https://a.com", ",")], false)),
    );
    let store = Arc::new(MemoryStore::new());
    store.fail_next_write();
    let app = App::with_parts(engine_in_temp(&dir), transport, store);

    let outcome = app.startup().await;

    assert!(matches!(outcome.cache_refresh, Some(Err(SyncError::Storage(_)))));
}

#[tokio::test]
async fn test_startup_keeps_cache_when_host_missing() {
    let dir = TempDir::new().unwrap();
    let transport = Arc::new(
        ScriptedTransport::new().fail(NativeError::HostNotFound("bukubrow".to_string())),
    );
    let app = App::with_parts(engine_in_temp(&dir), transport.clone(), Arc::new(MemoryStore::new()));

    let outcome = app.startup().await;
    assert_eq!(outcome.host, HostVersionCheckResult::NoComms);
    assert_eq!(outcome.cache_refresh, None);
    assert_eq!(transport.requests().len(), 1);
    assert!(app.sync.load_local_bookmarks_or_empty().is_empty());
}

#[test]
fn test_new_creates_database_at_configured_path() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("cache").join("bookmarks.db");
    let config_path = dir.path().join("config.json");
    std::fs::write(
        &config_path,
        serde_json::json!({ "database_path": db_path.to_string_lossy() }).to_string(),
    )
    .unwrap();

    let app = App::new(Some(config_path.to_string_lossy().to_string())).unwrap();

    assert!(db_path.exists());
    assert!(app.sync.load_local_bookmarks().unwrap().is_none());
}
