//! SQLite handle for the local cache.

use rusqlite::Connection;
use std::path::Path;

use super::migrations;
use crate::types::errors::StorageError;

/// A connection whose layout has been migrated to the current version.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens the cache file at `path`, creating it and its directory if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| {
                StorageError::DatabaseError(format!(
                    "failed to create cache directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }
        Self::migrated(Connection::open(path)?)
    }

    /// A throwaway cache, gone once dropped.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::migrated(Connection::open_in_memory()?)
    }

    fn migrated(conn: Connection) -> Result<Self, StorageError> {
        migrations::run_all(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
