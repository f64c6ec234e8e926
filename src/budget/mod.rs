//! Monthly spending limits per category.

mod api;
mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod form;
mod list;

pub use api::{
    create_budget_json, delete_budget_json, get_budget_json, list_budgets, update_budget_json,
};
pub use create::{create_budget_endpoint, get_new_budget_page};
pub use db::{
    create_budget, create_budget_table, delete_budget, get_all_budgets, get_budget,
    get_budgets_for_period, update_budget,
};
pub use delete::delete_budget_endpoint;
pub use domain::{Budget, BudgetFormData, BudgetId, NewBudget};
pub use edit::{get_edit_budget_page, update_budget_endpoint};
pub use list::get_budgets_page;
