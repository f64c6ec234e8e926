//! JSON endpoint for the dashboard aggregates.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    dashboard::summary::load_summary,
    period::{Period, PeriodQuery},
};

/// The state needed for the dashboard API.
#[derive(Debug, Clone)]
pub struct DashboardApiState {
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Return every dashboard aggregate for the month in the query, or the current month.
pub async fn get_dashboard_json(
    State(state): State<DashboardApiState>,
    Query(query): Query<PeriodQuery>,
) -> Response {
    let period = match Period::from_query(&query, &state.local_timezone) {
        Ok(period) => period,
        Err(error) => return error.into_json_response(),
    };

    let Ok(connection) = state.db_connection.lock() else {
        tracing::error!("could not acquire database lock");
        return Error::DatabaseLockError.into_json_response();
    };

    match load_summary(period, &connection) {
        Ok((summary, _)) => Json(summary).into_response(),
        Err(error) => error.into_json_response(),
    }
}
