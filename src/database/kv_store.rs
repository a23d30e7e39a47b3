//! Key/value stores backing the local bookmark cache.

use rusqlite::{params, OptionalExtension};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use super::connection::Database;
use crate::types::errors::StorageError;

pub const BOOKMARKS_KEY: &str = "bookmarks";
pub const BOOKMARKS_SCHEMA_VERSION_KEY: &str = "bookmarksSchemaVersion";
pub const STAGED_BOOKMARKS_GROUPS_KEY: &str = "stagedBookmarksGroups";

/// Minimal key/value contract the cache relies on.
///
/// `set` writes every entry or none of them.
pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;
    fn set(&self, entries: &[(&str, Value)]) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// [`LocalStore`] persisted in SQLite, one JSON document per key.
pub struct SqliteStore {
    db: Mutex<Database>,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        Ok(Self::new(Database::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self::new(Database::open_in_memory()?))
    }

    pub fn new(db: Database) -> Self {
        Self { db: Mutex::new(db) }
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }
}

impl LocalStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let db = self.db.lock().map_err(|_| StorageError::LockPoisoned)?;
        let raw: Option<String> = db
            .connection()
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        match raw {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn set(&self, entries: &[(&str, Value)]) -> Result<(), StorageError> {
        let db = self.db.lock().map_err(|_| StorageError::LockPoisoned)?;
        let now = Self::now();

        // Encode everything up front so a bad value aborts before any write
        let mut encoded = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            encoded.push((*key, serde_json::to_string(value)?));
        }

        let tx = db.connection().unchecked_transaction()?;
        for (key, text) in &encoded {
            tx.execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, text, now],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let db = self.db.lock().map_err(|_| StorageError::LockPoisoned)?;
        db.connection()
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// In-process [`LocalStore`].
///
/// `fail_next_write` makes the next `set` or `remove` fail without touching
/// any data.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
    fail_next_write: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_write(&self) {
        self.fail_next_write.store(true, Ordering::SeqCst);
    }

    fn check_write(&self) -> Result<(), StorageError> {
        if self.fail_next_write.swap(false, Ordering::SeqCst) {
            return Err(StorageError::DatabaseError("simulated write failure".to_string()));
        }
        Ok(())
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let values = self.values.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, entries: &[(&str, Value)]) -> Result<(), StorageError> {
        self.check_write()?;
        let mut values = self.values.lock().map_err(|_| StorageError::LockPoisoned)?;
        for (key, value) in entries {
            values.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_write()?;
        let mut values = self.values.lock().map_err(|_| StorageError::LockPoisoned)?;
        values.remove(key);
        Ok(())
    }
}
