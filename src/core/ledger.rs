use log::{debug, error, info};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::backend::{ExpenseStore, KeyValueStore};
use crate::config::LedgerConfig;
use crate::core::error::{OperationError, OperationResult};
use crate::core::expense::{Amount, Expense};
use crate::core::id::{IdGenerator, TimestampIds};
use crate::core::validate::Validator;

/// Everything a view needs to draw the ledger.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct LedgerSnapshot {
    pub expenses: Vec<Expense>,
    pub total: Amount,
}

/// The expense list and the operations on it.
///
/// The store is the only source of truth: every operation reads the list
/// back from it, and every mutation writes the whole list. Mutations are
/// run one at a time, so two concurrent `add`s cannot overwrite each
/// other's append.
pub struct Ledger<S> {
    store: ExpenseStore<S>,
    validator: Validator,
    ids: Box<dyn IdGenerator>,
    mutations: Mutex<()>,
}

impl<S: KeyValueStore> Ledger<S> {
    pub fn new(backend: S) -> Ledger<S> {
        Ledger {
            store: ExpenseStore::new(backend),
            validator: Validator::default(),
            ids: Box::new(TimestampIds::new()),
            mutations: Mutex::new(()),
        }
    }

    pub fn from_config(backend: S, config: &LedgerConfig) -> Ledger<S> {
        Ledger::new(backend)
            .with_storage_key(&config.storage_key)
            .with_validator(Validator::new(config.validation_delay))
    }

    pub fn with_storage_key(mut self, key: &str) -> Self {
        self.store = ExpenseStore::with_key(self.store.into_backend(), key);
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn store(&self) -> &ExpenseStore<S> {
        &self.store
    }

    pub async fn load(&self) -> Vec<Expense> {
        self.store.load()
    }

    /// Validates, then appends a new expense and writes the whole list back.
    pub async fn add(&self, name: &str, amount: Amount) -> OperationResult<Expense> {
        debug!("adding expense '{}' ({})", name, amount);
        self.validator.validate(name, amount).await?;

        let _guard = self.mutations.lock().await;
        let mut expenses = self.store.load();

        let expense = Expense::new(self.ids.generate(), name, amount);
        expenses.push(expense.clone());

        if let Err(err) = self.store.save(&expenses) {
            error!("could not add expense '{}': {}", name, err);
            return Err(OperationError::PersistenceFailed(err));
        }

        info!("added expense {} ({} in ledger)", expense, expenses.len());
        return Ok(expense);
    }

    /// Removes the stored list. Clearing an empty ledger succeeds.
    pub async fn clear(&self) -> OperationResult<()> {
        let _guard = self.mutations.lock().await;
        let dropped = self.store.load().len();

        if let Err(err) = self.store.clear() {
            error!("could not clear expenses: {}", err);
            return Err(OperationError::PersistenceFailed(err));
        }

        info!("cleared {} expenses", dropped);
        return Ok(());
    }

    pub async fn snapshot(&self) -> LedgerSnapshot {
        let expenses = self.load().await;
        let total = Self::total(&expenses);
        return LedgerSnapshot { expenses, total };
    }

    /// Sum of all amounts; `0` for none. A corrupt amount makes it NaN.
    pub fn total(expenses: &[Expense]) -> Amount {
        expenses.iter().fold(0.0, |total, expense| total + expense.amount)
    }
}
