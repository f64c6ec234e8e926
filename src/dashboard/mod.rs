//! Dashboard module
//!
//! Provides an overview page of the spending in one month: summary cards,
//! charts, budget utilization and the most recent transactions. The same
//! aggregates are available as JSON.

mod aggregation;
mod api;
mod cards;
mod charts;
mod handlers;
mod summary;
mod tables;

pub use aggregation::{
    BudgetUtilization, CategorySpend, DailySpend, TopCategory, compute_budget_remaining,
    compute_budget_utilization, compute_category_breakdown, compute_daily_series,
    compute_top_category, compute_totals, percent_of_budget, spent_in_category,
};
pub use api::get_dashboard_json;
pub use handlers::get_dashboard_page;
pub use summary::{DashboardSummary, TopCategorySummary};
