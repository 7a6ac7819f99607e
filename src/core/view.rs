use std::fmt;

use crate::backend::KeyValueStore;
use crate::core::error::{OperationError, OperationResult};
use crate::core::expense::Amount;
use crate::core::ledger::{Ledger, LedgerSnapshot};

/// What the user asked for.
#[derive(Clone, PartialEq, Debug)]
pub enum Intent {
    Add { name: String, amount: Amount },
    Clear,
    Refresh,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::Add { name, .. } => write!(f, "add expense '{}'", name),
            Intent::Clear => write!(f, "clear expenses"),
            Intent::Refresh => write!(f, "load expenses"),
        }
    }
}

/// A display surface for the ledger.
pub trait LedgerView {
    /// Draws the ledger as it is persisted.
    fn render(&mut self, snapshot: &LedgerSnapshot);
    /// Tells the user `intent` did not take effect.
    fn notify_failure(&mut self, intent: &Intent, error: &OperationError);
}

/// Forwards intents from a view to a ledger and redraws the view from the
/// store after every successful one.
pub struct Session<'a, S, V> {
    ledger: &'a Ledger<S>,
    view: V,
}

impl<'a, S: KeyValueStore, V: LedgerView> Session<'a, S, V> {
    pub fn new(ledger: &'a Ledger<S>, view: V) -> Self {
        Session { ledger, view }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    pub async fn dispatch(&mut self, intent: Intent) -> OperationResult<()> {
        let outcome = match &intent {
            Intent::Add { name, amount } => self.ledger.add(name, *amount).await.map(|_| ()),
            Intent::Clear => self.ledger.clear().await,
            Intent::Refresh => Ok(()),
        };

        match outcome {
            Ok(()) => {
                let snapshot = self.ledger.snapshot().await;
                self.view.render(&snapshot);
                Ok(())
            },
            Err(err) => {
                self.view.notify_failure(&intent, &err);
                Err(err)
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::{fixture, rstest};

    use super::{Intent, LedgerView, Session};
    use crate::backend::MemoryStore;
    use crate::core::{Ledger, LedgerSnapshot, OperationError, Validator};

    #[derive(Default)]
    struct RecordingView {
        rendered: Vec<LedgerSnapshot>,
        failures: Vec<String>,
    }

    impl LedgerView for RecordingView {
        fn render(&mut self, snapshot: &LedgerSnapshot) {
            self.rendered.push(snapshot.clone());
        }

        fn notify_failure(&mut self, intent: &Intent, error: &OperationError) {
            self.failures.push(format!("{}: {}", intent, error));
        }
    }

    #[fixture]
    fn ledger() -> Ledger<Arc<MemoryStore>> {
        Ledger::new(Arc::new(MemoryStore::new())).with_validator(Validator::immediate())
    }

    fn add(name: &str, amount: f64) -> Intent {
        Intent::Add { name: name.to_string(), amount }
    }

    #[rstest]
    #[tokio::test]
    async fn renders_persisted_state(ledger: Ledger<Arc<MemoryStore>>) {
        let mut session = Session::new(&ledger, RecordingView::default());

        session.dispatch(Intent::Refresh).await.unwrap();
        session.dispatch(add("Coffee", 4.5)).await.unwrap();
        session.dispatch(add("Cake", 3.0)).await.unwrap();

        let view = session.into_view();
        assert_eq!(view.rendered.len(), 3);
        assert!(view.rendered[0].expenses.is_empty());
        assert_eq!(view.rendered[0].total, 0.0);
        assert_eq!(view.rendered[2].expenses.len(), 2);
        assert_eq!(view.rendered[2].total, 7.5);
        assert!(view.failures.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn failure_is_notified_not_rendered(ledger: Ledger<Arc<MemoryStore>>) {
        let mut session = Session::new(&ledger, RecordingView::default());

        let res = session.dispatch(add("", 10.0)).await;

        assert!(matches!(res, Err(OperationError::InvalidInput(..))));
        assert!(session.view().rendered.is_empty());
        assert_eq!(session.view().failures, vec!["add expense '': invalid expense data"]);
    }

    #[rstest]
    #[tokio::test]
    async fn clear_renders_empty(ledger: Ledger<Arc<MemoryStore>>) {
        let mut session = Session::new(&ledger, RecordingView::default());
        session.dispatch(add("Coffee", 4.5)).await.unwrap();

        session.dispatch(Intent::Clear).await.unwrap();

        let last = session.view().rendered.last().unwrap();
        assert!(last.expenses.is_empty());
        assert_eq!(last.total, 0.0);
    }
}
