//! JSON endpoints for budgets.

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
    budget::{
        BudgetFormData, BudgetId, create_budget, delete_budget, get_all_budgets, get_budget,
        update_budget,
    },
};

/// The state needed for the budget API.
#[derive(Debug, Clone)]
pub struct BudgetApiState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BudgetApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

fn not_found_or(error: Error) -> Response {
    match error {
        Error::NotFound | Error::UpdateMissingBudget | Error::DeleteMissingBudget => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Budget not found" })),
        )
            .into_response(),
        error => error.into_json_response(),
    }
}

/// List every budget, most recent month first.
pub async fn list_budgets(State(state): State<BudgetApiState>) -> Response {
    let Ok(connection) = state.db_connection.lock() else {
        tracing::error!("could not acquire database lock");
        return Error::DatabaseLockError.into_json_response();
    };

    match get_all_budgets(&connection) {
        Ok(budgets) => Json(budgets).into_response(),
        Err(error) => error.into_json_response(),
    }
}

/// Create a budget from a JSON body and return it with status 201.
pub async fn create_budget_json(
    State(state): State<BudgetApiState>,
    body: Result<Json<BudgetFormData>, JsonRejection>,
) -> Response {
    let new_budget = match body
        .map_err(Error::from)
        .and_then(|Json(body)| body.validate())
    {
        Ok(new_budget) => new_budget,
        Err(error) => return error.into_json_response(),
    };

    let Ok(connection) = state.db_connection.lock() else {
        tracing::error!("could not acquire database lock");
        return Error::DatabaseLockError.into_json_response();
    };

    match create_budget(new_budget, &connection) {
        Ok(budget) => (StatusCode::CREATED, Json(budget)).into_response(),
        Err(error) => error.into_json_response(),
    }
}

/// Get a single budget.
pub async fn get_budget_json(
    Path(budget_id): Path<BudgetId>,
    State(state): State<BudgetApiState>,
) -> Response {
    let Ok(connection) = state.db_connection.lock() else {
        tracing::error!("could not acquire database lock");
        return Error::DatabaseLockError.into_json_response();
    };

    match get_budget(budget_id, &connection) {
        Ok(budget) => Json(budget).into_response(),
        Err(error) => not_found_or(error),
    }
}

/// Replace a budget with the JSON body.
pub async fn update_budget_json(
    Path(budget_id): Path<BudgetId>,
    State(state): State<BudgetApiState>,
    body: Result<Json<BudgetFormData>, JsonRejection>,
) -> Response {
    let budget = match body
        .map_err(Error::from)
        .and_then(|Json(body)| body.validate())
    {
        Ok(budget) => budget,
        Err(error) => return error.into_json_response(),
    };

    let Ok(connection) = state.db_connection.lock() else {
        tracing::error!("could not acquire database lock");
        return Error::DatabaseLockError.into_json_response();
    };

    match update_budget(budget_id, budget, &connection) {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(error) => not_found_or(error),
    }
}

/// Delete a budget.
pub async fn delete_budget_json(
    Path(budget_id): Path<BudgetId>,
    State(state): State<BudgetApiState>,
) -> Response {
    let Ok(connection) = state.db_connection.lock() else {
        tracing::error!("could not acquire database lock");
        return Error::DatabaseLockError.into_json_response();
    };

    match delete_budget(budget_id, &connection) {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(error) => not_found_or(error),
    }
}
