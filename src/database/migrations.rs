//! Versioned schema migrations for the local store database.
//!
//! A `schema_version` table records which migrations have run; each one
//! runs exactly once.

use rusqlite::{params, Connection};

/// Current schema version. Bump this when adding a new migration.
pub const CURRENT_SCHEMA_VERSION: i32 = 2;

/// Returns the highest applied schema version (0 on a fresh database).
pub fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .unwrap_or(0)
}

/// Runs all pending migrations. Safe to call on every open.
pub fn run_all(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
             version INTEGER PRIMARY KEY,
             applied_at INTEGER NOT NULL,
             description TEXT NOT NULL
         );",
    )?;

    let current = get_schema_version(conn);

    if current < 1 {
        migration_v1(conn)?;
        record_version(conn, 1, "Key-value table for local storage")?;
    }

    if current < 2 {
        migration_v2(conn)?;
        record_version(conn, 2, "Index local storage by last write")?;
    }

    Ok(())
}

fn record_version(conn: &Connection, version: i32, description: &str) -> Result<(), rusqlite::Error> {
    let now = chrono::Utc::now().timestamp();
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at, description) VALUES (?1, ?2, ?3)",
        params![version, now, description],
    )?;
    Ok(())
}

/// V1: the key-value table itself.
fn migration_v1(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS local_storage (
             key TEXT PRIMARY KEY,
             value TEXT NOT NULL
         );",
    )
}

/// V2: track write time per key.
fn migration_v2(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "ALTER TABLE local_storage ADD COLUMN updated_at INTEGER NOT NULL DEFAULT 0;
         CREATE INDEX IF NOT EXISTS idx_local_storage_updated_at ON local_storage(updated_at);",
    )
}
