//! Sets up the application's SQLite database and shared column helpers.

use std::str::FromStr;

use rusqlite::{Connection, Row, Transaction as SqlTransaction, types::Type};
use rust_decimal::Decimal;

use crate::{
    budget::create_budget_table, category::create_category_table,
    transaction::create_transaction_table,
};

/// Create the tables for transactions, categories and budgets.
///
/// The tables are created in a single exclusive transaction, so either all
/// tables exist afterwards or none of the changes are kept.
///
/// # Errors
/// Returns an error if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_category_table(&transaction)?;
    create_transaction_table(&transaction)?;
    create_budget_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Read a decimal amount that was stored as text in column `index`.
///
/// Amounts are stored as text so that SQLite never rounds them through a float.
pub(crate) fn get_decimal(row: &Row, index: usize) -> Result<Decimal, rusqlite::Error> {
    let text: String = row.get(index)?;

    Decimal::from_str(&text).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error))
    })
}
