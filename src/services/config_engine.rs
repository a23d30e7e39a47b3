// Configuration engine for the bookmark bridge.
// Loads, edits and resets `SyncConfig`, persisted as a JSON file at the
// platform-specific config path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::platform;
use crate::types::config::SyncConfig;
use crate::types::errors::ConfigError;

/// Trait defining the configuration engine interface.
pub trait ConfigEngineTrait {
    fn load(&mut self) -> Result<SyncConfig, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn get_config(&self) -> &SyncConfig;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), ConfigError>;
    fn reset(&mut self) -> Result<(), ConfigError>;
    fn get_config_path(&self) -> &str;
}

/// Config engine that persists `SyncConfig` as JSON on disk.
pub struct ConfigEngine {
    config_path: String,
    config: SyncConfig,
}

impl ConfigEngine {
    /// Creates a new ConfigEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses `config.json` in the platform config directory.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => platform::default_config_path().to_string_lossy().to_string(),
        };

        Self {
            config_path,
            config: SyncConfig::default(),
        }
    }

    /// Where the local cache lives: the configured path, or the platform default.
    pub fn database_path(&self) -> PathBuf {
        match &self.config.database_path {
            Some(p) => PathBuf::from(p),
            None => platform::default_database_path(),
        }
    }
}

impl ConfigEngineTrait for ConfigEngine {
    /// Loads the config file. A missing file yields the defaults.
    fn load(&mut self) -> Result<SyncConfig, ConfigError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            self.config = SyncConfig::default();
            return Ok(self.config.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("Failed to read config file: {}", e)))?;

        let config: SyncConfig = serde_json::from_str(&content).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;

        self.config = config;
        Ok(self.config.clone())
    }

    /// Writes the current config, creating parent directories as needed.
    fn save(&self) -> Result<(), ConfigError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.config).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| ConfigError::IoError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn get_config(&self) -> &SyncConfig {
        &self.config
    }

    /// Replaces one top-level field, validates the result and saves it.
    ///
    /// Unknown keys are rejected; so are values of the wrong type, e.g.
    /// `bookmarks_schema_version = "three"`.
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), ConfigError> {
        if key.is_empty() {
            return Err(ConfigError::InvalidKey("Key cannot be empty".to_string()));
        }

        let mut json_value = serde_json::to_value(&self.config).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize config: {}", e))
        })?;

        match json_value.as_object_mut() {
            Some(map) if map.contains_key(key) => {
                map.insert(key.to_string(), value);
            }
            _ => {
                return Err(ConfigError::InvalidKey(format!(
                    "Key '{}' not found in config",
                    key
                )))
            }
        }

        let new_config: SyncConfig = serde_json::from_value(json_value).map_err(|e| {
            ConfigError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;

        self.config = new_config;
        self.save()
    }

    /// Restores the defaults and saves them.
    fn reset(&mut self) -> Result<(), ConfigError> {
        self.config = SyncConfig::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
