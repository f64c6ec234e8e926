//! Budget editing page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
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
        BudgetFormData, BudgetId,
        form::{BudgetFormAction, budget_form_view},
        get_budget,
        list::budgets_page_url,
        update_budget,
    },
    category::{Category, get_all_categories},
    endpoints,
    html::{FORM_CONTAINER_STYLE, base, dollar_input_styles},
    navigation::NavBar,
};

/// The state needed for the edit budget page and endpoint.
#[derive(Debug, Clone)]
pub struct EditBudgetState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditBudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the budget editing page, or the 404 page if the budget does not exist.
pub async fn get_edit_budget_page(
    Path(budget_id): Path<BudgetId>,
    State(state): State<EditBudgetState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let budget = get_budget(budget_id, &connection)?;
    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    Ok(edit_budget_view(budget_id, &BudgetFormData::from(&budget), &categories).into_response())
}

/// Handle budget update form submission.
pub async fn update_budget_endpoint(
    Path(budget_id): Path<BudgetId>,
    State(state): State<EditBudgetState>,
    Form(form_data): Form<BudgetFormData>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let budget = match form_data.validate() {
        Ok(budget) => budget,
        Err(error) => {
            let categories = match get_all_categories(&connection) {
                Ok(categories) => categories,
                Err(error) => return error.into_alert_response(),
            };
            let update_endpoint = endpoints::format_endpoint(endpoints::BUDGET, budget_id);

            return budget_form_view(
                BudgetFormAction::Update(&update_endpoint),
                &form_data,
                &categories,
                &format!("Error: {error}"),
            )
            .into_response();
        }
    };
    let redirect_url = budgets_page_url(budget.month, budget.year);

    match update_budget(budget_id, budget, &connection) {
        Ok(()) => (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response(),
        Err(
            error @ (Error::UpdateMissingBudget
            | Error::DuplicateBudget { .. }
            | Error::InvalidCategory(_)),
        ) => error.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating budget {budget_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

fn edit_budget_view(budget_id: BudgetId, values: &BudgetFormData, categories: &[Category]) -> Markup {
    let edit_endpoint = endpoints::format_endpoint(endpoints::EDIT_BUDGET_VIEW, budget_id);
    let update_endpoint = endpoints::format_endpoint(endpoints::BUDGET, budget_id);
    let nav_bar = NavBar::new(&edit_endpoint).into_html();
    let form = budget_form_view(
        BudgetFormAction::Update(&update_endpoint),
        values,
        categories,
        "",
    );

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold mb-4" { "Edit Budget" }
            (form)
        }
    };

    base("Edit Budget", &[dollar_input_styles()], &content)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use axum_extra::extract::Form;
    use rusqlite::Connection;
    use rust_decimal_macros::dec;

    use crate::{
        budget::{BudgetFormData, NewBudget, create_budget, get_budget},
        category::{NewCategory, create_category},
        db::initialize,
        test_utils::{
            assert_form_input_with_value, assert_form_submit_button_with_text,
            assert_hx_endpoint, assert_hx_redirect, assert_valid_html, get_selected_option,
            must_get_form, parse_html_document,
        },
    };

    use super::{EditBudgetState, get_edit_budget_page, update_budget_endpoint};

    fn get_state() -> EditBudgetState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        for name in ["Food", "Rent"] {
            create_category(NewCategory::new(name, "#fff", None).unwrap(), &connection).unwrap();
        }
        create_budget(NewBudget::new(1, dec!(300), 5, 2025).unwrap(), &connection).unwrap();

        EditBudgetState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn edit_page_is_prefilled() {
        let response = get_edit_budget_page(Path(1), State(get_state()))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, "/budgets/1", "hx-put");
        assert_eq!(get_selected_option(&form, "category_id"), Some("1".to_owned()));
        assert_eq!(get_selected_option(&form, "month"), Some("5".to_owned()));
        assert_form_input_with_value(&form, "amount", "number", "300.00");
        assert_form_submit_button_with_text(&form, "Update Budget");
    }

    #[tokio::test]
    async fn edit_page_for_missing_budget_is_not_found() {
        let result = get_edit_budget_page(Path(9), State(get_state())).await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_redirects_to_budget_month() {
        let state = get_state();
        let form = BudgetFormData {
            category_id: Some(2),
            amount: dec!(1200),
            month: 6,
            year: 2025,
        };

        let response = update_budget_endpoint(Path(1), State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, "/budgets?month=2025-06");
        let budget = get_budget(1, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(budget.category_id, 2);
        assert_eq!(budget.amount, dec!(1200));
    }

    #[tokio::test]
    async fn update_missing_budget_is_not_found() {
        let form = BudgetFormData {
            category_id: Some(2),
            amount: dec!(1200),
            month: 6,
            year: 2025,
        };

        let response = update_budget_endpoint(Path(9), State(get_state()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
