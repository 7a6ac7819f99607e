pub mod error;
pub mod expense;
pub mod id;
pub mod validate;
pub mod ledger;
pub mod view;

pub use error::{InvalidInput, OperationError, OperationResult};
pub use expense::{Amount, Expense, ExpenseId};
pub use id::{IdGenerator, TimestampIds};
pub use validate::Validator;
pub use ledger::{Ledger, LedgerSnapshot};
pub use view::{Intent, LedgerView, Session};
