//! The page listing the budgets of a month against what has been spent.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use rust_decimal::Decimal;
use time::Month;

use crate::{
    AppState, Error,
    budget::{Budget, get_budgets_for_period},
    category::{Category, CategoryId, color_swatch, get_all_categories},
    dashboard::{percent_of_budget, spent_in_category},
    endpoints,
    html::{
        CARD_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base, edit_delete_action_links,
        format_currency, month_navigation,
    },
    navigation::NavBar,
    period::{Period, PeriodQuery},
    transaction::{Transaction, get_transactions_in_period},
};

/// The label shown for a budget whose category was deleted.
const UNKNOWN_CATEGORY_LABEL: &str = "Unknown category";

/// The URL of the budgets page for `month` of `year`.
///
/// Falls back to the current month's page if the month is out of range.
pub fn budgets_page_url(month: u8, year: i32) -> String {
    match Month::try_from(month)
        .ok()
        .and_then(|month| Period::new(year, month).ok())
    {
        Some(period) => format!("{}?{}", endpoints::BUDGETS_VIEW, period.to_query_string()),
        None => endpoints::BUDGETS_VIEW.to_owned(),
    }
}

/// The state needed for the budgets page.
#[derive(Debug, Clone)]
pub struct BudgetsPageState {
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for BudgetsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A budget with its category and how much has been spent against it.
struct BudgetRow<'a> {
    budget: &'a Budget,
    category: Option<&'a Category>,
    spent: Decimal,
}

impl BudgetRow<'_> {
    fn percent_spent(&self) -> Decimal {
        percent_of_budget(self.spent, self.budget.amount)
    }

    fn message(&self) -> String {
        let percent = self.percent_spent();

        if percent > Decimal::from(90) {
            "You've almost spent your entire budget!".to_owned()
        } else if percent > Decimal::from(75) {
            "You've spent 75% of your budget.".to_owned()
        } else {
            format!(
                "You still have {} left to spend.",
                format_currency(self.budget.amount.saturating_sub(self.spent))
            )
        }
    }

    fn progress_bar_color(&self) -> &'static str {
        let percent = self.percent_spent();

        if percent > Decimal::from(90) {
            "bg-red-500"
        } else if percent > Decimal::from(75) {
            "bg-yellow-400"
        } else {
            "bg-green-500"
        }
    }

    fn progress_bar_width(&self) -> String {
        let percent = self
            .percent_spent()
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);

        format!("width: {:.0}%;", percent)
    }
}

/// Render the budgets for the month in the query, or the current month.
pub async fn get_budgets_page(
    State(state): State<BudgetsPageState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Response, Error> {
    let period = Period::from_query(&query, &state.local_timezone)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let budgets = get_budgets_for_period(&period, &connection)
        .inspect_err(|error| tracing::error!("Could not get budgets for {period}: {error}"))?;
    let transactions = get_transactions_in_period(&period, &connection)
        .inspect_err(|error| tracing::error!("Could not get transactions for {period}: {error}"))?;
    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    Ok(budgets_view(&period, &budgets, &categories, &transactions).into_response())
}

fn budget_rows<'a>(
    budgets: &'a [Budget],
    categories: &'a [Category],
    transactions: &[Transaction],
) -> Vec<BudgetRow<'a>> {
    let categories_by_id: HashMap<CategoryId, &Category> = categories
        .iter()
        .map(|category| (category.id, category))
        .collect();

    budgets
        .iter()
        .map(|budget| BudgetRow {
            budget,
            category: categories_by_id.get(&budget.category_id).copied(),
            spent: spent_in_category(transactions, budget.category_id),
        })
        .collect()
}

fn budgets_view(
    period: &Period,
    budgets: &[Budget],
    categories: &[Category],
    transactions: &[Transaction],
) -> Markup {
    let nav_bar = NavBar::new(endpoints::BUDGETS_VIEW).into_html();
    let rows = budget_rows(budgets, categories, transactions);
    let total_budgeted = budgets
        .iter()
        .fold(Decimal::ZERO, |total, budget| total.saturating_add(budget.amount));
    let new_budget_url = format!(
        "{}?{}",
        endpoints::NEW_BUDGET_VIEW,
        period.to_query_string()
    );

    let budget_card = |row: &BudgetRow| {
        let edit_url = endpoints::format_endpoint(endpoints::EDIT_BUDGET_VIEW, row.budget.id);
        let delete_url = endpoints::format_endpoint(endpoints::BUDGET, row.budget.id);
        let category_name = row
            .category
            .map(|category| category.name.to_string())
            .unwrap_or_else(|| UNKNOWN_CATEGORY_LABEL.to_owned());
        let confirm_message = format!(
            "Are you sure you want to delete the {category_name} budget for {}?",
            period.label()
        );

        html! {
            article class={(CARD_STYLE) " space-y-3"} data-budget-id=(row.budget.id)
            {
                header class="flex items-center justify-between gap-2"
                {
                    div class="flex items-center gap-2"
                    {
                        @if let Some(category) = row.category {
                            (color_swatch(category.color.as_ref()))
                        }
                        h3 class="font-semibold" { (category_name) }
                    }

                    span class="font-mono text-sm"
                    {
                        (format_currency(row.spent)) " of " (format_currency(row.budget.amount))
                    }
                }

                div
                    class="w-full h-2.5 rounded-full bg-gray-200 dark:bg-gray-700"
                    role="progressbar"
                    aria-valuemin="0"
                    aria-valuemax="100"
                    aria-valuenow=(format!("{:.0}", row.percent_spent()))
                {
                    div
                        class={"h-2.5 rounded-full " (row.progress_bar_color())}
                        style=(row.progress_bar_width())
                    {}
                }

                p class="text-sm text-gray-600 dark:text-gray-400" { (row.message()) }

                div class="flex gap-4 text-sm"
                {
                    (edit_delete_action_links(
                        &edit_url,
                        &delete_url,
                        &confirm_message,
                        "closest article",
                        "delete",
                    ))
                }
            }
        }
    };

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Budgets" }

                    a href=(new_budget_url) class=(LINK_STYLE) { "Create Budget" }
                }

                (month_navigation(endpoints::BUDGETS_VIEW, period))

                @if rows.is_empty() {
                    p class="text-center text-gray-500 dark:text-gray-400"
                    {
                        "No budgets set for " (period.label()) ". "
                        a href=(new_budget_url) class=(LINK_STYLE) { "Set a budget" }
                    }
                } @else {
                    p class="text-sm text-gray-600 dark:text-gray-400"
                    {
                        "Total budgeted: "
                        span class="font-mono" { (format_currency(total_budgeted)) }
                    }

                    div class="grid gap-4 md:grid-cols-2"
                    {
                        @for row in &rows {
                            (budget_card(row))
                        }
                    }
                }
            }
        }
    };

    base("Budgets", &[], &content)
}
