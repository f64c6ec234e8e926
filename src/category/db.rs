//! Database operations for categories.

use std::collections::HashMap;

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryColor, CategoryId, CategoryName, NewCategory},
};

/// Create a category and return it with its generated ID.
pub fn create_category(category: NewCategory, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare(
            "INSERT INTO category (name, color, description) VALUES (?1, ?2, ?3)
             RETURNING id, name, color, description;",
        )?
        .query_row(
            (
                category.name.as_ref(),
                category.color.as_ref(),
                category.description,
            ),
            map_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve a single category by ID.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name, color, description FROM category WHERE id = :id;")?
        .query_row(&[(":id", &category_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all categories ordered alphabetically by name.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, name, color, description FROM category ORDER BY name COLLATE NOCASE ASC, id ASC;",
        )?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Whether a category with `category_id` exists.
pub fn category_exists(category_id: CategoryId, connection: &Connection) -> Result<bool, Error> {
    connection
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM category WHERE id = ?1);",
            [category_id],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Replace every field of a category. Returns an error if the category doesn't exist.
pub fn update_category(
    category_id: CategoryId,
    category: NewCategory,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE category SET name = ?1, color = ?2, description = ?3 WHERE id = ?4",
        (
            category.name.as_ref(),
            category.color.as_ref(),
            category.description,
            category_id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingCategory);
    }

    Ok(())
}

/// Delete a category by ID. Returns an error if the category doesn't exist.
///
/// Transactions and budgets that refer to the category are left as they are.
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM category WHERE id = ?1", [category_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingCategory);
    }

    Ok(())
}

/// Count the transactions that refer to each category.
///
/// Categories without transactions are not included.
pub fn count_transactions_per_category(
    connection: &Connection,
) -> Result<HashMap<CategoryId, u32>, Error> {
    let result: Result<HashMap<CategoryId, u32>, rusqlite::Error> = connection
        .prepare(
            "SELECT category_id, COUNT(1) FROM \"transaction\" \
             WHERE category_id IS NOT NULL GROUP BY category_id",
        )?
        .query_map((), |row| {
            let category_id = row.get(0)?;
            let count = row.get(1)?;

            Ok((category_id, count))
        })?
        .collect();

    result.map_err(Error::from)
}

/// Initialize the category table and indexes.
///
/// IDs are never reused, so a transaction or budget that refers to a deleted
/// category cannot end up pointing at a newer one.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            color TEXT NOT NULL,
            description TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_category_name ON category(name);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let raw_color: String = row.get(2)?;
    let description = row.get(3)?;

    Ok(Category {
        id,
        name: CategoryName::new_unchecked(&raw_name),
        color: CategoryColor::new_unchecked(&raw_color),
        description,
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        Error,
        category::{
            Category, CategoryColor, CategoryName, NewCategory, category_exists,
            count_transactions_per_category, create_category, delete_category,
            get_all_categories, get_category, update_category,
        },
        db::initialize,
        transaction::{Transaction, create_transaction},
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    fn new_category(name: &str) -> NewCategory {
        NewCategory::new(name, "#123456", None).unwrap()
    }

    #[test]
    fn create_returns_stored_category() {
        let connection = get_test_connection();

        let got = create_category(
            NewCategory::new("Groceries", "#0f0", Some("Food and household")).unwrap(),
            &connection,
        )
        .unwrap();

        let want = Category {
            id: got.id,
            name: CategoryName::new_unchecked("Groceries"),
            color: CategoryColor::new_unchecked("#0f0"),
            description: Some("Food and household".to_owned()),
        };
        assert_eq!(got, want);
        assert_eq!(get_category(got.id, &connection), Ok(want));
    }

    #[test]
    fn get_missing_category_is_not_found() {
        let connection = get_test_connection();

        assert_eq!(get_category(42, &connection), Err(Error::NotFound));
    }

    #[test]
    fn get_all_sorts_by_name() {
        let connection = get_test_connection();
        for name in ["Transport", "groceries", "Bills"] {
            create_category(new_category(name), &connection).unwrap();
        }

        let names: Vec<String> = get_all_categories(&connection)
            .unwrap()
            .into_iter()
            .map(|category| category.name.to_string())
            .collect();

        assert_eq!(names, vec!["Bills", "groceries", "Transport"]);
    }

    #[test]
    fn update_replaces_all_fields() {
        let connection = get_test_connection();
        let category = create_category(
            NewCategory::new("Fun", "#fff", Some("Going out")).unwrap(),
            &connection,
        )
        .unwrap();

        update_category(
            category.id,
            NewCategory::new("Entertainment", "#000000", None).unwrap(),
            &connection,
        )
        .unwrap();

        let got = get_category(category.id, &connection).unwrap();
        assert_eq!(got.name.as_ref(), "Entertainment");
        assert_eq!(got.color.as_ref(), "#000000");
        assert_eq!(got.description, None);
    }

    #[test]
    fn update_missing_category_fails() {
        let connection = get_test_connection();

        let got = update_category(1, new_category("Nope"), &connection);

        assert_eq!(got, Err(Error::UpdateMissingCategory));
    }

    #[test]
    fn delete_leaves_transactions_dangling() {
        let connection = get_test_connection();
        let category = create_category(new_category("Food"), &connection).unwrap();
        let transaction = create_transaction(
            Transaction::build(dec!(10), date!(2025 - 03 - 01), "Lunch")
                .category_id(Some(category.id)),
            &connection,
        )
        .unwrap();

        delete_category(category.id, &connection).unwrap();

        assert!(!category_exists(category.id, &connection).unwrap());
        let transaction = crate::transaction::get_transaction(transaction.id, &connection).unwrap();
        assert_eq!(transaction.category_id, Some(category.id));
    }

    #[test]
    fn delete_missing_category_fails() {
        let connection = get_test_connection();

        assert_eq!(
            delete_category(7, &connection),
            Err(Error::DeleteMissingCategory)
        );
    }

    #[test]
    fn counts_transactions_per_category() {
        let connection = get_test_connection();
        let food = create_category(new_category("Food"), &connection).unwrap();
        let rent = create_category(new_category("Rent"), &connection).unwrap();
        let day = date!(2025 - 03 - 01);
        for (count, category_id) in [(3, Some(food.id)), (1, Some(rent.id)), (2, None)] {
            for _ in 0..count {
                create_transaction(
                    Transaction::build(dec!(1), day, "Thing").category_id(category_id),
                    &connection,
                )
                .unwrap();
            }
        }

        let counts = count_transactions_per_category(&connection).unwrap();

        assert_eq!(counts[&food.id], 3);
        assert_eq!(counts[&rent.id], 1);
        assert_eq!(counts.len(), 2);
    }
}
