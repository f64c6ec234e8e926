//! Transactions record money that was spent, optionally grouped by category.

mod api;
mod core;
mod create;
mod delete;
mod edit;
mod form;
mod list;

pub use api::{
    create_transaction_json, delete_transaction_json, get_transaction_json, list_transactions,
    update_transaction_json,
};
pub use core::{
    Transaction, TransactionBuilder, TransactionId, create_transaction, create_transaction_table,
    delete_transaction, get_all_transactions, get_transaction, get_transactions_in_period,
    update_transaction,
};
pub use create::{create_transaction_endpoint, get_new_transaction_page};
pub use delete::delete_transaction_endpoint;
pub use edit::{get_edit_transaction_page, update_transaction_endpoint};
pub use form::TransactionForm;
pub use list::get_transactions_page;
