//! In-memory [`LocalStorage`] with an optional byte quota.

use std::collections::HashMap;

use super::LocalStorage;
use crate::types::errors::StorageError;

/// `HashMap`-backed store.
///
/// Can be capped at a byte quota (keys plus values, like a browser origin's
/// storage budget) and switched off entirely to model a store the user has
/// disabled.
#[derive(Debug)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    quota: Option<usize>,
    available: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            quota: None,
            available: true,
        }
    }

    /// A store that rejects writes once keys plus values exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::new()
        }
    }

    /// When `false`, every operation fails with [`StorageError::Unavailable`].
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Bytes currently used by keys and values.
    pub fn used_bytes(&self) -> usize {
        self.items.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    fn ensure_available(&self) -> Result<(), StorageError> {
        if self.available {
            Ok(())
        } else {
            Err(StorageError::Unavailable("storage is disabled".to_string()))
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.ensure_available()?;
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.ensure_available()?;
        if let Some(quota) = self.quota {
            let replaced = self.items.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let after = self.used_bytes() - replaced + key.len() + value.len();
            if after > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    quota,
                });
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.ensure_available()?;
        self.items.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.ensure_available()?;
        self.items.clear();
        Ok(())
    }
}
