//! Budget creation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    budget::{
        BudgetFormData, create_budget,
        form::{BudgetFormAction, budget_form_view},
        list::budgets_page_url,
    },
    category::{Category, get_all_categories},
    endpoints,
    html::{FORM_CONTAINER_STYLE, LINK_STYLE, base, dollar_input_styles},
    navigation::NavBar,
    period::{Period, PeriodQuery},
};

/// The state needed for creating a budget.
#[derive(Debug, Clone)]
pub struct CreateBudgetState {
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateBudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the budget creation page, defaulting to the month in the query or the current month.
pub async fn get_new_budget_page(
    State(state): State<CreateBudgetState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Response, Error> {
    let period = Period::from_query(&query, &state.local_timezone)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    Ok(new_budget_view(&BudgetFormData::for_period(&period), &categories).into_response())
}

/// Handle budget creation form submission.
///
/// Invalid fields re-render the form with an error message. A missing
/// category or a second budget for the same month respond with an error alert.
pub async fn create_budget_endpoint(
    State(state): State<CreateBudgetState>,
    Form(form_data): Form<BudgetFormData>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let new_budget = match form_data.validate() {
        Ok(new_budget) => new_budget,
        Err(error) => {
            let categories = match get_all_categories(&connection) {
                Ok(categories) => categories,
                Err(error) => return error.into_alert_response(),
            };

            return budget_form_view(
                BudgetFormAction::Create(endpoints::POST_BUDGET),
                &form_data,
                &categories,
                &format!("Error: {error}"),
            )
            .into_response();
        }
    };

    match create_budget(new_budget, &connection) {
        Ok(budget) => {
            tracing::info!(
                "Created budget {} for category {} in {}/{}",
                budget.id,
                budget.category_id,
                budget.month,
                budget.year
            );

            (
                HxRedirect(budgets_page_url(budget.month, budget.year)),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error @ (Error::DuplicateBudget { .. } | Error::InvalidCategory(_))) => {
            error.into_alert_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a budget: {error}");
            error.into_alert_response()
        }
    }
}

fn new_budget_view(values: &BudgetFormData, categories: &[Category]) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_BUDGET_VIEW).into_html();
    let form = budget_form_view(
        BudgetFormAction::Create(endpoints::POST_BUDGET),
        values,
        categories,
        "",
    );

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold mb-4" { "New Budget" }

            @if categories.is_empty() {
                p class="mb-4 text-gray-600 dark:text-gray-400"
                {
                    "Budgets are set per category. "
                    a href=(endpoints::NEW_CATEGORY_VIEW) class=(LINK_STYLE)
                    {
                        "Create a category"
                    }
                    " first."
                }
            }

            (form)
        }
    };

    base("Create Budget", &[dollar_input_styles()], &content)
}
