//! SQLite connection management for the local key-value store.
//!
//! [`Database`] wraps a `rusqlite::Connection` and brings the schema up to
//! date every time it is opened.

use rusqlite::Connection;
use std::path::Path;

use super::migrations;

/// Owns the SQLite connection backing [`crate::storage::SqliteStorage`].
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database file at `path` and runs migrations.
    ///
    /// # Errors
    /// Returns `rusqlite::Error` if the connection cannot be established or migrations fail.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        migrations::run_all(&db.conn)?;
        Ok(db)
    }

    /// Opens an in-memory database; everything is discarded on drop.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        migrations::run_all(&db.conn)?;
        Ok(db)
    }

    /// Returns the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
