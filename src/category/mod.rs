//! Categories for grouping transactions, e.g. "Groceries" or "Rent".

mod api;
mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod form;
mod list;
mod view;

pub use api::{
    create_category_json, delete_category_json, get_category_json, list_categories,
    update_category_json,
};
pub use create::{create_category_endpoint, get_new_category_page};
pub use db::{
    category_exists, count_transactions_per_category, create_category, create_category_table,
    delete_category, get_all_categories, get_category, update_category,
};
pub use delete::delete_category_endpoint;
pub use domain::{
    Category, CategoryColor, CategoryFormData, CategoryId, CategoryName, DEFAULT_CATEGORY_COLOR,
    NewCategory,
};
pub use edit::{get_edit_category_page, update_category_endpoint};
pub use list::get_categories_page;
pub use view::{UNCATEGORIZED_LABEL, category_badge, color_swatch};
