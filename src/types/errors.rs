use std::fmt;

use super::version::HostVersionCheckResult;

// === NativeError ===

/// Errors raised while talking to the native host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeError {
    /// The host executable could not be found or launched.
    HostNotFound(String),
    /// The request/response exchange itself failed.
    Transport(String),
    /// The host answered, but reported failure or omitted required fields.
    Protocol(String),
    /// The host answered with a payload of the wrong shape.
    Decode(String),
}

impl NativeError {
    /// Whether this failure means there is no host to talk to at all.
    pub fn is_host_not_found(&self) -> bool {
        match self {
            NativeError::HostNotFound(_) => true,
            NativeError::Transport(msg) => msg.to_lowercase().contains("host not found"),
            _ => false,
        }
    }
}

impl fmt::Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeError::HostNotFound(msg) => write!(f, "Native host not found: {}", msg),
            NativeError::Transport(msg) => {
                write!(f, "Failed to communicate with native host: {}", msg)
            }
            NativeError::Protocol(msg) => write!(f, "Native host protocol error: {}", msg),
            NativeError::Decode(msg) => write!(f, "Malformed native host response: {}", msg),
        }
    }
}

impl std::error::Error for NativeError {}

// === StorageError ===

/// Errors related to the local key/value cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Database operation failed.
    DatabaseError(String),
    /// A stored value could not be encoded or decoded.
    SerializationError(String),
    /// The store's lock was poisoned by a panicking writer.
    LockPoisoned,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::DatabaseError(msg) => write!(f, "Local store database error: {}", msg),
            StorageError::SerializationError(msg) => {
                write!(f, "Local store serialization error: {}", msg)
            }
            StorageError::LockPoisoned => write!(f, "Local store lock poisoned"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::DatabaseError(e.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::SerializationError(e.to_string())
    }
}

// === StagedGroupError ===

/// Errors related to staged bookmark groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedGroupError {
    /// A group cannot be created from zero bookmarks.
    EmptyBatch,
    /// The id source kept returning ids that are already in use.
    NoFreeId { attempts: usize },
    /// No staged group has the given ID.
    NotFound(String),
    /// Reading or writing the group collection failed.
    Storage(StorageError),
}

impl fmt::Display for StagedGroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StagedGroupError::EmptyBatch => write!(f, "Cannot stage an empty batch of bookmarks"),
            StagedGroupError::NoFreeId { attempts } => {
                write!(f, "No unused staged group id after {} attempts", attempts)
            }
            StagedGroupError::NotFound(id) => write!(f, "Staged group not found: {}", id),
            StagedGroupError::Storage(e) => write!(f, "Staged group storage error: {}", e),
        }
    }
}

impl std::error::Error for StagedGroupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StagedGroupError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StorageError> for StagedGroupError {
    fn from(e: StorageError) -> Self {
        StagedGroupError::Storage(e)
    }
}

// === ConfigError ===

/// Errors related to loading or editing the configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An I/O error occurred while reading or writing the config file.
    IoError(String),
    /// Failed to serialize or deserialize the config.
    SerializationError(String),
    /// The provided config key is unknown.
    InvalidKey(String),
    /// The provided config value has the wrong type.
    InvalidValue(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "Config I/O error: {}", msg),
            ConfigError::SerializationError(msg) => {
                write!(f, "Config serialization error: {}", msg)
            }
            ConfigError::InvalidKey(key) => write!(f, "Invalid config key: {}", key),
            ConfigError::InvalidValue(msg) => write!(f, "Invalid config value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

// === SyncError ===

/// Errors surfaced by the synchronization facade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Talking to the native host failed.
    Native(NativeError),
    /// Reading or writing the local cache failed.
    Storage(StorageError),
    /// A staged group operation failed.
    Staged(StagedGroupError),
    /// The host answered with a version outside the supported range
    /// (`HostOutdated` or `HostTooNew`).
    Incompatible(HostVersionCheckResult),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Native(e) => write!(f, "{}", e),
            SyncError::Storage(e) => write!(f, "{}", e),
            SyncError::Staged(e) => write!(f, "{}", e),
            SyncError::Incompatible(result) => {
                write!(f, "Native host is not usable: {:?}", result)
            }
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::Native(e) => Some(e),
            SyncError::Storage(e) => Some(e),
            SyncError::Staged(e) => Some(e),
            SyncError::Incompatible(_) => None,
        }
    }
}

impl From<NativeError> for SyncError {
    fn from(e: NativeError) -> Self {
        SyncError::Native(e)
    }
}

impl From<StorageError> for SyncError {
    fn from(e: StorageError) -> Self {
        SyncError::Storage(e)
    }
}

impl From<StagedGroupError> for SyncError {
    fn from(e: StagedGroupError) -> Self {
        SyncError::Staged(e)
    }
}
