use log::{debug, warn};
use thiserror::Error;

use crate::backend::interface::{KeyValueStore, Result, StorageError};
use crate::core::Expense;

pub const DEFAULT_STORAGE_KEY: &str = "expenses";

/// Reasons a stored entry could not be read back as a list of expenses.
#[derive(Debug, Error)]
enum CorruptStorage {
    #[error("stored value is not valid JSON: {0}")]
    Malformed(serde_json::Error),
    #[error("stored value is not an array")]
    NotAnArray,
}

/// The full expense list, kept as one JSON array under a single key.
pub struct ExpenseStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> ExpenseStore<S> {
    pub fn new(backend: S) -> ExpenseStore<S> {
        ExpenseStore::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> ExpenseStore<S> {
        ExpenseStore { backend, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Replaces whatever was stored with `expenses`.
    pub fn save(&self, expenses: &[Expense]) -> Result<()> {
        let serialized = serde_json::to_string(expenses)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.backend.set(&self.key, &serialized)?;
        debug!("saved {} expenses under '{}'", expenses.len(), self.key);
        return Ok(());
    }

    /// Reads the stored list. Absent, unreadable or corrupt data all come
    /// back as an empty list; only the last two are logged.
    pub fn load(&self) -> Vec<Expense> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return Vec::new(),
            Err(err) => {
                warn!("could not read '{}', starting from an empty list: {}", self.key, err);
                return Vec::new();
            }
        };

        match decode(&raw) {
            Ok(expenses) => expenses,
            Err(err) => {
                warn!("corrupt data under '{}', starting from an empty list: {}", self.key, err);
                Vec::new()
            }
        }
    }

    /// Drops the entry altogether, as opposed to saving an empty list.
    pub fn clear(&self) -> Result<()> {
        self.backend.remove(&self.key)
    }
}

/// Elements that cannot be read as an expense at all (numbers, strings,
/// nested arrays) are skipped; every other element is kept.
fn decode(raw: &str) -> std::result::Result<Vec<Expense>, CorruptStorage> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(CorruptStorage::Malformed)?;
    let elements = match value {
        serde_json::Value::Array(elements) => elements,
        _ => return Err(CorruptStorage::NotAnArray),
    };

    let mut expenses = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        if !element.is_object() {
            warn!("skipping stored element {}, not an object: {}", index, element);
            continue;
        }
        match serde_json::from_value::<Expense>(element) {
            Ok(expense) => expenses.push(expense),
            Err(err) => warn!("skipping stored element {}, not an expense: {}", index, err),
        }
    }
    return Ok(expenses);
}
