//! SQLite-backed [`LocalStorage`].

use rusqlite::{params, OptionalExtension};

use super::LocalStorage;
use crate::database::connection::Database;
use crate::types::errors::StorageError;

/// Persistent store over the `local_storage` table.
pub struct SqliteStorage {
    db: Database,
}

impl SqliteStorage {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Opens an in-memory database; handy for tests.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self::new(Database::open_in_memory()?))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> Result<usize, StorageError> {
        let count: i64 = self
            .db
            .connection()
            .query_row("SELECT COUNT(*) FROM local_storage", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }
}

impl LocalStorage for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .db
            .connection()
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let now = chrono::Utc::now().timestamp_millis();
        self.db.connection().execute(
            "INSERT INTO local_storage (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.db
            .connection()
            .execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.db.connection().execute("DELETE FROM local_storage", [])?;
        Ok(())
    }
}
