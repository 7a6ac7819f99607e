use thiserror::Error;

use crate::backend::StorageError;

/// Rejected name/amount pair. Deliberately carries no detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid expense data")]
pub struct InvalidInput;

#[derive(Debug, Error)]
pub enum OperationError {
    /// The name or amount did not pass validation; nothing was read or written.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    /// The store refused the write; the ledger is as it was before the call.
    #[error("failed to persist expenses: {0}")]
    PersistenceFailed(#[from] StorageError),
}

pub type OperationResult<T> = Result<T, OperationError>;
