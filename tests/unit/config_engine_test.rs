//! Integration-level unit tests for the ConfigEngine public API.
//!
//! These tests exercise the ConfigEngine through its public trait interface,
//! validating default loading, value persistence, validation and reset.

use bukubridge::services::config_engine::{ConfigEngine, ConfigEngineTrait};
use bukubridge::types::config::SyncConfig;
use bukubridge::types::errors::ConfigError;
use serde_json::json;
use tempfile::TempDir;

/// Helper: create a ConfigEngine backed by a temp directory that lives for the
/// duration of the test (the caller holds the `TempDir` handle).
fn engine_in_temp(dir: &TempDir) -> ConfigEngine {
    let path = dir.path().join("config.json").to_string_lossy().to_string();
    ConfigEngine::new(Some(path))
}

#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let config = engine.load().unwrap();

    assert_eq!(config, SyncConfig::default());
    assert_eq!(config.host_name, "com.samhh.bukubrow");
    assert_eq!(config.minimum_binary_version, "5.0.0");
    assert_eq!(config.bookmarks_schema_version, 3);
}

/// A change made through one engine is visible to a fresh engine on the same file.
#[test]
fn test_set_value_persists_changes() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine
            .set_value("host_path", json!("/usr/local/bin/bukubrow"))
            .unwrap();
        engine.set_value("bookmarks_schema_version", json!(4)).unwrap();
    }

    let mut engine = engine_in_temp(&dir);
    let config = engine.load().unwrap();
    assert_eq!(config.host_path.as_deref(), Some("/usr/local/bin/bukubrow"));
    assert_eq!(config.bookmarks_schema_version, 4);
    assert_eq!(config.log_level, "info");
}

/// Files written before a field existed still load, with the missing field defaulted.
#[test]
fn test_partial_file_fills_in_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), r#"{ "log_level": "debug" }"#).unwrap();

    let mut engine = engine_in_temp(&dir);
    let config = engine.load().unwrap();

    assert_eq!(config.log_level, "debug");
    assert_eq!(config.host_name, SyncConfig::default().host_name);
}

#[test]
fn test_malformed_file_is_a_serialization_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), "{ not json").unwrap();

    let mut engine = engine_in_temp(&dir);
    assert!(matches!(engine.load(), Err(ConfigError::SerializationError(_))));
}

#[test]
fn test_unknown_or_empty_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    assert!(matches!(
        engine.set_value("no_such_key", json!(1)),
        Err(ConfigError::InvalidKey(_))
    ));
    assert!(matches!(engine.set_value("", json!(1)), Err(ConfigError::InvalidKey(_))));
    assert!(!dir.path().join("config.json").exists());
}

#[test]
fn test_wrong_value_type_is_rejected_and_config_unchanged() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let result = engine.set_value("bookmarks_schema_version", json!("three"));

    assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    assert_eq!(engine.get_config(), &SyncConfig::default());
}

#[test]
fn test_reset_restores_defaults_on_disk() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.set_value("log_level", json!("trace")).unwrap();

    engine.reset().unwrap();

    let mut reloaded = engine_in_temp(&dir);
    assert_eq!(reloaded.load().unwrap(), SyncConfig::default());
}

#[test]
fn test_config_path_is_the_override() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in_temp(&dir);
    assert!(engine.get_config_path().ends_with("config.json"));
}
