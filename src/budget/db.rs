//! Database operations for budgets.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error,
    budget::{Budget, BudgetId, NewBudget},
    category::category_exists,
    db::get_decimal,
    period::Period,
};

/// Check that the budget's category exists and that no other budget is set
/// for the same category and month.
fn check_budget(
    budget: &NewBudget,
    existing_id: Option<BudgetId>,
    connection: &Connection,
) -> Result<(), Error> {
    if !category_exists(budget.category_id, connection)? {
        return Err(Error::InvalidCategory(Some(budget.category_id)));
    }

    let duplicate_id: Option<BudgetId> = connection
        .query_row(
            "SELECT id FROM budget WHERE category_id = ?1 AND month = ?2 AND year = ?3",
            (budget.category_id, budget.month, budget.year),
            |row| row.get(0),
        )
        .optional()?;

    match duplicate_id {
        Some(id) if Some(id) != existing_id => Err(Error::DuplicateBudget {
            category_id: budget.category_id,
            month: budget.month,
            year: budget.year,
        }),
        _ => Ok(()),
    }
}

/// Create a budget and return it with its generated ID.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCategory] if the category does not exist,
/// - [Error::DuplicateBudget] if the category already has a budget for the month,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_budget(budget: NewBudget, connection: &Connection) -> Result<Budget, Error> {
    check_budget(&budget, None, connection)?;

    connection
        .prepare(
            "INSERT INTO budget (category_id, amount, month, year) VALUES (?1, ?2, ?3, ?4)
             RETURNING id, category_id, amount, month, year",
        )?
        .query_row(
            (
                budget.category_id,
                budget.amount.to_string(),
                budget.month,
                budget.year,
            ),
            map_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve a single budget by ID.
pub fn get_budget(budget_id: BudgetId, connection: &Connection) -> Result<Budget, Error> {
    connection
        .prepare("SELECT id, category_id, amount, month, year FROM budget WHERE id = :id")?
        .query_row(&[(":id", &budget_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve every budget, most recent month first.
pub fn get_all_budgets(connection: &Connection) -> Result<Vec<Budget>, Error> {
    connection
        .prepare(
            "SELECT id, category_id, amount, month, year FROM budget
             ORDER BY year DESC, month DESC, id ASC",
        )?
        .query_map([], map_row)?
        .map(|maybe_budget| maybe_budget.map_err(Error::from))
        .collect()
}

/// Retrieve the budgets set for the month of `period`, in the order they were created.
pub fn get_budgets_for_period(period: &Period, connection: &Connection) -> Result<Vec<Budget>, Error> {
    connection
        .prepare(
            "SELECT id, category_id, amount, month, year FROM budget
             WHERE year = ?1 AND month = ?2
             ORDER BY id ASC",
        )?
        .query_map((period.year(), period.month_number()), map_row)?
        .map(|maybe_budget| maybe_budget.map_err(Error::from))
        .collect()
}

/// Replace every field of a budget.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingBudget] if there is no budget with `budget_id`,
/// - [Error::InvalidCategory] if the category does not exist,
/// - [Error::DuplicateBudget] if another budget is set for the same category and month,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_budget(
    budget_id: BudgetId,
    budget: NewBudget,
    connection: &Connection,
) -> Result<(), Error> {
    match get_budget(budget_id, connection) {
        Ok(_) => {}
        Err(Error::NotFound) => return Err(Error::UpdateMissingBudget),
        Err(error) => return Err(error),
    }

    check_budget(&budget, Some(budget_id), connection)?;

    let rows_affected = connection.execute(
        "UPDATE budget SET category_id = ?1, amount = ?2, month = ?3, year = ?4 WHERE id = ?5",
        (
            budget.category_id,
            budget.amount.to_string(),
            budget.month,
            budget.year,
            budget_id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingBudget);
    }

    Ok(())
}

/// Delete a budget by ID. Returns an error if the budget doesn't exist.
pub fn delete_budget(budget_id: BudgetId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM budget WHERE id = ?1", [budget_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingBudget);
    }

    Ok(())
}

/// Initialize the budget table and indexes.
///
/// `category_id` is not a foreign key, so deleting a category leaves its
/// budgets pointing at the old ID.
pub fn create_budget_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS budget (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            category_id INTEGER NOT NULL,
            amount TEXT NOT NULL,
            month INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
            year INTEGER NOT NULL,
            UNIQUE(category_id, month, year)
        );

        CREATE INDEX IF NOT EXISTS idx_budget_year_month ON budget(year, month);",
    )
}

fn map_row(row: &Row) -> Result<Budget, rusqlite::Error> {
    Ok(Budget {
        id: row.get(0)?,
        category_id: row.get(1)?,
        amount: get_decimal(row, 2)?,
        month: row.get(3)?,
        year: row.get(4)?,
    })
}
