//! Local key/value cache.
//!
//! The bookmark bridge only needs a key/value contract from its local store
//! ([`LocalStore`]). [`SqliteStore`] provides it on top of SQLite;
//! [`MemoryStore`] keeps everything in process.
//!
//! # Usage
//!
//! ```no_run
//! use bukubridge::database::{LocalStore, SqliteStore};
//!
//! let store = SqliteStore::open("bukubridge.db").expect("failed to open cache");
//! store.set(&[("bookmarksSchemaVersion", serde_json::json!(3))]).expect("write failed");
//! ```

pub mod connection;
pub mod kv_store;
pub mod migrations;

pub use connection::Database;
pub use kv_store::{
    LocalStore, MemoryStore, SqliteStore, BOOKMARKS_KEY, BOOKMARKS_SCHEMA_VERSION_KEY,
    STAGED_BOOKMARKS_GROUPS_KEY,
};
