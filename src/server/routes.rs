use std::sync::Arc;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use tally::{Amount, Expense, Ledger, LedgerSnapshot, backend::KeyValueStore};

use crate::error::ServerError;

type SharedLedger<S> = State<Arc<Ledger<S>>>;

#[derive(Debug, Deserialize)]
struct NewExpense {
    name: String,
    amount: Amount,
}

#[derive(Debug, Serialize)]
struct AddedExpense {
    expense: Expense,
    ledger: LedgerSnapshot,
}

pub fn build_router<S: KeyValueStore + 'static>(ledger: Arc<Ledger<S>>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/expenses", get(list_expenses::<S>)
            .post(add_expense::<S>)
            .delete(clear_expenses::<S>))
        .route("/expenses/total", get(total::<S>))
        .fallback(not_found)
        .with_state(ledger)
}

async fn index() -> &'static str {
    "tally is running"
}

async fn list_expenses<S: KeyValueStore>(State(ledger): SharedLedger<S>) -> Json<LedgerSnapshot> {
    Json(ledger.snapshot().await)
}

async fn add_expense<S: KeyValueStore>(
    State(ledger): SharedLedger<S>,
    Json(new): Json<NewExpense>,
) -> Result<(StatusCode, Json<AddedExpense>), ServerError> {
    let expense = ledger.add(&new.name, new.amount).await?;
    let snapshot = ledger.snapshot().await;
    return Ok((StatusCode::CREATED, Json(AddedExpense { expense, ledger: snapshot })));
}

async fn clear_expenses<S: KeyValueStore>(State(ledger): SharedLedger<S>) -> Result<Json<LedgerSnapshot>, ServerError> {
    ledger.clear().await?;
    return Ok(Json(ledger.snapshot().await));
}

async fn total<S: KeyValueStore>(State(ledger): SharedLedger<S>) -> Json<serde_json::Value> {
    let expenses = ledger.load().await;
    Json(json!({ "total": Ledger::<S>::total(&expenses) }))
}

async fn not_found(uri: Uri) -> ServerError {
    ServerError::NotFound(uri.path().to_string())
}
