//! Local persistent key-value storage.
//!
//! [`LocalStorage`] mirrors the browser's `localStorage` contract: string keys,
//! string values, and any call may fail. Two backends are provided:
//! [`SqliteStorage`] for data that must survive restarts and
//! [`MemoryStorage`] for ephemeral sessions and tests.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use crate::types::errors::StorageError;

/// String key-value store whose every operation may fail.
pub trait LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
    fn clear(&mut self) -> Result<(), StorageError>;
}
