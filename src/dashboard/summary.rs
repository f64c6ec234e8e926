//! Collects everything the dashboard shows for one month.

use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    Error,
    budget::{Budget, get_budgets_for_period},
    category::{Category, UNCATEGORIZED_LABEL, get_all_categories},
    dashboard::aggregation::{
        BudgetUtilization, CategorySpend, DailySpend, TopCategory, compute_budget_remaining,
        compute_budget_utilization, compute_category_breakdown, compute_daily_series,
        compute_top_category, compute_totals,
    },
    period::Period,
    transaction::{Transaction, get_transactions_in_period},
};

/// How many of the month's transactions the dashboard lists.
pub(super) const RECENT_TRANSACTION_LIMIT: usize = 5;

/// The name shown for the top category when nothing has been spent.
pub(super) const NO_EXPENSES_LABEL: &str = "No expenses yet";

/// The top category together with the name to show for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopCategorySummary {
    /// The category reference and its total.
    #[serde(flatten)]
    pub top: TopCategory,
    /// The category name, "Uncategorized" if the category no longer exists,
    /// or "No expenses yet" if nothing was spent.
    pub name: String,
}

/// The aggregated view of one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// The month the summary is for, e.g. "2025-03".
    pub period: Period,
    /// The total spent in the month.
    pub total_expenses: Decimal,
    /// The month's budgets minus the month's spending.
    pub budget_remaining: Decimal,
    /// The category with the most spending.
    pub top_category: TopCategorySummary,
    /// The spending per category.
    pub category_breakdown: Vec<CategorySpend>,
    /// The spending per day of the month.
    pub daily_series: Vec<DailySpend>,
    /// The spending against each category's budget.
    pub budget_utilization: Vec<BudgetUtilization>,
    /// The number of transactions in the month.
    pub transaction_count: usize,
    /// The most recent transactions of the month, newest first.
    pub recent_transactions: Vec<Transaction>,
}

impl DashboardSummary {
    /// Aggregate the transactions and budgets of `period`.
    ///
    /// `transactions` and `budgets` should only contain records from `period`,
    /// with the transactions sorted newest first.
    pub fn new(
        period: Period,
        transactions: Vec<Transaction>,
        categories: &[Category],
        budgets: &[Budget],
    ) -> Self {
        let top = compute_top_category(&transactions);
        let top_category = TopCategorySummary {
            name: top_category_name(&top, categories),
            top,
        };

        Self {
            period,
            total_expenses: compute_totals(&transactions),
            budget_remaining: compute_budget_remaining(&transactions, budgets),
            top_category,
            category_breakdown: compute_category_breakdown(&transactions, categories),
            daily_series: compute_daily_series(&transactions),
            budget_utilization: compute_budget_utilization(categories, budgets, &transactions),
            transaction_count: transactions.len(),
            recent_transactions: transactions
                .into_iter()
                .take(RECENT_TRANSACTION_LIMIT)
                .collect(),
        }
    }
}

fn top_category_name(top: &TopCategory, categories: &[Category]) -> String {
    if top.amount.is_zero() {
        return NO_EXPENSES_LABEL.to_owned();
    }

    top.category_id
        .and_then(|category_id| {
            categories
                .iter()
                .find(|category| category.id == category_id)
        })
        .map(|category| category.name.to_string())
        .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_owned())
}

/// Read the records of `period` and aggregate them into a [DashboardSummary].
///
/// The caller should hold the database lock for the whole call so the
/// aggregates agree with each other.
pub(super) fn load_summary(
    period: Period,
    connection: &Connection,
) -> Result<(DashboardSummary, Vec<Category>), Error> {
    let transactions = get_transactions_in_period(&period, connection)
        .inspect_err(|error| tracing::error!("Could not get transactions for {period}: {error}"))?;
    let categories = get_all_categories(connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;
    let budgets = get_budgets_for_period(&period, connection)
        .inspect_err(|error| tracing::error!("Could not get budgets for {period}: {error}"))?;

    let summary = DashboardSummary::new(period, transactions, &categories, &budgets);

    Ok((summary, categories))
}
