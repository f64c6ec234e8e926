//! Budget deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    budget::{BudgetId, delete_budget},
};

/// The state needed for deleting a budget.
#[derive(Debug, Clone)]
pub struct DeleteBudgetState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteBudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle budget deletion. Returns success alert or error.
pub async fn delete_budget_endpoint(
    Path(budget_id): Path<BudgetId>,
    State(state): State<DeleteBudgetState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_budget(budget_id, &connection) {
        Ok(()) => Alert::SuccessSimple {
            message: "Budget deleted successfully".to_owned(),
        }
        .into_response(),
        Err(Error::DeleteMissingBudget) => Error::DeleteMissingBudget.into_alert_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while deleting budget {budget_id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use rust_decimal_macros::dec;

    use crate::{
        Error,
        budget::{NewBudget, create_budget, get_budget},
        category::{NewCategory, create_category},
        db::initialize,
    };

    use super::{DeleteBudgetState, delete_budget_endpoint};

    fn get_state() -> DeleteBudgetState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        DeleteBudgetState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn deletes_budget() {
        let state = get_state();
        let budget = {
            let connection = state.db_connection.lock().unwrap();
            let category =
                create_category(NewCategory::new("Food", "#fff", None).unwrap(), &connection)
                    .unwrap();
            create_budget(
                NewBudget::new(category.id, dec!(10), 1, 2025).unwrap(),
                &connection,
            )
            .unwrap()
        };

        let response = delete_budget_endpoint(Path(budget.id), State(state.clone())).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            get_budget(budget.id, &state.db_connection.lock().unwrap()),
            Err(Error::NotFound)
        );
    }

    #[tokio::test]
    async fn missing_budget_is_not_found() {
        let response = delete_budget_endpoint(Path(3), State(get_state())).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
