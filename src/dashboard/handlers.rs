//! HTTP handlers for the dashboard page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::Category,
    dashboard::{
        cards::summary_cards_view,
        charts::{
            DashboardChart, budget_vs_actual_chart, category_spending_chart, charts_script,
            charts_view, daily_spending_chart,
        },
        summary::{DashboardSummary, load_summary},
        tables::recent_transactions_table,
    },
    endpoints,
    html::{HeadElement, base, link, month_navigation},
    navigation::NavBar,
    period::{Period, PeriodQuery},
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for accessing transactions, categories and budgets.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display a page with an overview of the spending in a month.
///
/// The month is taken from the `month` query parameter (YYYY-MM) and
/// defaults to the current month in the local timezone.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Response, Error> {
    let period = Period::from_query(&query, &state.local_timezone)?;

    let (summary, categories) = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        load_summary(period, &connection)?
    };

    if categories.is_empty() && summary.transaction_count == 0 {
        return Ok(dashboard_no_data_view(&period).into_response());
    }

    let charts = build_dashboard_charts(&summary);

    Ok(dashboard_view(&summary, &categories, &charts).into_response())
}

/// Creates the dashboard charts from the month's summary.
fn build_dashboard_charts(summary: &DashboardSummary) -> [DashboardChart; 3] {
    [
        DashboardChart {
            id: "daily-spending-chart",
            options: daily_spending_chart(&summary.daily_series).map(|chart| chart.to_string()),
            empty_message: "No spending recorded this month.",
        },
        DashboardChart {
            id: "category-spending-chart",
            options: category_spending_chart(&summary.category_breakdown)
                .map(|chart| chart.to_string()),
            empty_message: "No spending to break down by category.",
        },
        DashboardChart {
            id: "budget-vs-actual-chart",
            options: budget_vs_actual_chart(&summary.budget_utilization)
                .map(|chart| chart.to_string()),
            empty_message: "No budgets set for this month.",
        },
    ]
}

/// Renders the dashboard page when there are no categories or transactions.
fn dashboard_no_data_view(period: &Period) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "adding a transaction");
    let new_category_link = link(endpoints::NEW_CATEGORY_VIEW, "creating a category");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            (month_navigation(endpoints::DASHBOARD_VIEW, period))

            h2 class="text-xl font-bold mt-8"
            {
                "Nothing here yet..."
            }

            p
            {
                "Get started by " (new_transaction_link) " or " (new_category_link) "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

fn dashboard_view(
    summary: &DashboardSummary,
    categories: &[Category],
    charts: &[DashboardChart],
) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            div class="w-full" { (month_navigation(endpoints::DASHBOARD_VIEW, &summary.period)) }

            (summary_cards_view(summary))

            (charts_view(charts))

            (recent_transactions_table(&summary.recent_transactions, categories))
        }
    );

    let scripts = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(charts),
    ];

    base("Dashboard", &scripts, &content)
}
