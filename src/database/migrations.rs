//! Versioned SQLite layout for the local cache.
//!
//! Applied steps are listed in `schema_version`; on open, every step newer
//! than the highest recorded one runs inside its own transaction.
//!
//! Only the table layout is versioned here. Cached bookmark records carry
//! their own format tag in the key/value data.

use rusqlite::{params, Connection};
use std::time::{SystemTime, UNIX_EPOCH};

type Step = fn(&Connection) -> Result<(), rusqlite::Error>;

/// Layout steps in application order: (version, description, step).
const MIGRATIONS: &[(i32, &str, Step)] = &[(1, "key/value table", create_kv_table)];

/// Highest layout version this build knows how to create.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Highest applied layout version, 0 for a fresh database.
pub fn get_schema_version(conn: &Connection) -> Result<i32, rusqlite::Error> {
    conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |row| row.get(0))
}

/// Brings the layout up to [`CURRENT_SCHEMA_VERSION`].
pub fn run_all(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         CREATE TABLE IF NOT EXISTS schema_version (
             version     INTEGER PRIMARY KEY,
             applied_at  INTEGER NOT NULL,
             description TEXT NOT NULL
         );",
    )?;

    let applied = get_schema_version(conn)?;
    for (version, description, step) in MIGRATIONS.iter().filter(|(v, _, _)| *v > applied) {
        let tx = conn.unchecked_transaction()?;
        step(&tx)?;
        tx.execute(
            "INSERT INTO schema_version (version, applied_at, description) VALUES (?1, ?2, ?3)",
            params![version, unix_now(), description],
        )?;
        tx.commit()?;
        tracing::debug!(version, description, "applied cache migration");
    }
    Ok(())
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn create_kv_table(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS kv (
             key        TEXT PRIMARY KEY,
             value      TEXT NOT NULL,
             updated_at INTEGER NOT NULL
         );",
    )
}
