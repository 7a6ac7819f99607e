mod core;
pub mod backend;
pub mod config;

pub use crate::core::{Ledger, LedgerSnapshot, Expense, Amount, Validator};
pub use crate::core::{Intent, LedgerView, Session};
pub use crate::core::{InvalidInput, OperationError, OperationResult};
pub use crate::core::{IdGenerator, TimestampIds};
pub use crate::core::{expense, ledger, validate, view};
pub use crate::config::LedgerConfig;
