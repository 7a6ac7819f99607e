mod interface;
mod memory_store;
mod json_store;
mod expense_store;

pub use interface::{KeyValueStore, Result, StorageError};
pub use memory_store::MemoryStore;
pub use json_store::JsonStore;
pub use expense_store::{ExpenseStore, DEFAULT_STORAGE_KEY};
