use std::collections::HashMap;
use std::sync::RwLock;

use crate::backend::interface::{KeyValueStore, Result, StorageError};

/// In-process key-value store, optionally capped at a number of bytes
/// the way a browser caps its local storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// Writes that would take the total size of keys and values
    /// above `bytes` are refused.
    pub fn with_quota(bytes: usize) -> MemoryStore {
        MemoryStore { entries: RwLock::new(HashMap::new()), quota: Some(bytes) }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned<E>(_: E) -> StorageError {
        StorageError::Unavailable("memory store lock poisoned".to_string())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(MemoryStore::poisoned)?;
        return Ok(entries.get(key).cloned());
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(MemoryStore::poisoned)?;

        if let Some(quota) = self.quota {
            let others: usize = entries.iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }

        entries.insert(key.to_owned(), value.to_owned());
        return Ok(());
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(MemoryStore::poisoned)?;
        entries.remove(key);
        return Ok(());
    }
}
