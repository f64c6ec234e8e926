//! JSON endpoints for transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState, Error,
    transaction::{
        TransactionId,
        core::{
            create_transaction, delete_transaction, get_all_transactions, get_transaction,
            update_transaction,
        },
        form::TransactionForm,
    },
};

/// The state needed for the transaction API.
#[derive(Debug, Clone)]
pub struct TransactionApiState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

fn not_found_or(error: Error) -> Response {
    match error {
        Error::NotFound | Error::UpdateMissingTransaction | Error::DeleteMissingTransaction => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Transaction not found" })),
        )
            .into_response(),
        error => error.into_json_response(),
    }
}

/// List every transaction, most recent first.
pub async fn list_transactions(State(state): State<TransactionApiState>) -> Response {
    let Ok(connection) = state.db_connection.lock() else {
        tracing::error!("could not acquire database lock");
        return Error::DatabaseLockError.into_json_response();
    };

    match get_all_transactions(&connection) {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => error.into_json_response(),
    }
}

/// Create a transaction from a JSON body and return it with status 201.
pub async fn create_transaction_json(
    State(state): State<TransactionApiState>,
    body: Result<Json<TransactionForm>, JsonRejection>,
) -> Response {
    let transaction = match body
        .map_err(Error::from)
        .and_then(|Json(body)| body.validate())
    {
        Ok(transaction) => transaction,
        Err(error) => return error.into_json_response(),
    };

    let Ok(connection) = state.db_connection.lock() else {
        tracing::error!("could not acquire database lock");
        return Error::DatabaseLockError.into_json_response();
    };

    match create_transaction(transaction, &connection) {
        Ok(transaction) => (StatusCode::CREATED, Json(transaction)).into_response(),
        Err(error) => error.into_json_response(),
    }
}

/// Get a single transaction.
pub async fn get_transaction_json(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<TransactionApiState>,
) -> Response {
    let Ok(connection) = state.db_connection.lock() else {
        tracing::error!("could not acquire database lock");
        return Error::DatabaseLockError.into_json_response();
    };

    match get_transaction(transaction_id, &connection) {
        Ok(transaction) => Json(transaction).into_response(),
        Err(error) => not_found_or(error),
    }
}

/// Replace a transaction with the JSON body.
pub async fn update_transaction_json(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<TransactionApiState>,
    body: Result<Json<TransactionForm>, JsonRejection>,
) -> Response {
    let transaction = match body
        .map_err(Error::from)
        .and_then(|Json(body)| body.validate())
    {
        Ok(transaction) => transaction,
        Err(error) => return error.into_json_response(),
    };

    let Ok(connection) = state.db_connection.lock() else {
        tracing::error!("could not acquire database lock");
        return Error::DatabaseLockError.into_json_response();
    };

    match update_transaction(transaction_id, transaction, &connection) {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(error) => not_found_or(error),
    }
}

/// Delete a transaction.
pub async fn delete_transaction_json(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<TransactionApiState>,
) -> Response {
    let Ok(connection) = state.db_connection.lock() else {
        tracing::error!("could not acquire database lock");
        return Error::DatabaseLockError.into_json_response();
    };

    match delete_transaction(transaction_id, &connection) {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(error) => not_found_or(error),
    }
}
