use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use rust_decimal::Decimal;
use time::{Duration, OffsetDateTime};

use finance_tracker::{
    NewBudget, NewCategory, Period, Transaction, create_budget, create_category,
    create_transaction, get_local_offset, initialize_db,
};

/// A utility for creating a demo database for the finance_tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The local timezone used to pick the current month, e.g. "Pacific/Auckland".
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,
}

/// The demo categories with their color and monthly budget in dollars.
const CATEGORIES: [(&str, &str, i64); 5] = [
    ("Groceries", "#22c55e", 600),
    ("Rent", "#3b82f6", 1800),
    ("Transport", "#f59e0b", 200),
    ("Entertainment", "#ec4899", 150),
    ("Utilities", "#8b5cf6", 250),
];

/// Recurring demo expenses: description, category index (if any), amount in
/// cents and how many days apart they are.
const EXPENSES: [(&str, Option<usize>, i64, i64); 7] = [
    ("Supermarket", Some(0), 8_750, 4),
    ("Rent", Some(1), 45_000, 7),
    ("Bus fare", Some(2), 420, 2),
    ("Fuel", Some(2), 6_500, 9),
    ("Cinema", Some(3), 1_850, 10),
    ("Power bill", Some(4), 13_420, 30),
    ("Coffee", None, 550, 3),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    let Some(local_offset) = get_local_offset(&args.timezone) else {
        eprintln!("\"{}\" is not a valid timezone.", args.timezone);
        exit(1);
    };
    let today = OffsetDateTime::now_utc().to_offset(local_offset).date();
    let period = Period::containing(today);

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating categories and budgets for {}...", period.label());
    let mut category_ids = Vec::with_capacity(CATEGORIES.len());

    for (name, color, budget) in CATEGORIES {
        let category = create_category(NewCategory::new(name, color, None)?, &conn)?;
        create_budget(
            NewBudget::new(
                category.id,
                Decimal::from(budget),
                period.month_number(),
                period.year(),
            )?,
            &conn,
        )?;
        category_ids.push(category.id);
    }

    println!("Creating transactions...");
    let mut transaction_count = 0;

    for (description, category_index, cents, interval_days) in EXPENSES {
        let mut date = period.first_day();

        while date <= today && period.contains(date) {
            create_transaction(
                Transaction::build(Decimal::new(cents, 2), date, description)
                    .category_id(category_index.map(|index| category_ids[index])),
                &conn,
            )?;
            transaction_count += 1;
            date += Duration::days(interval_days);
        }
    }

    println!("Created {transaction_count} transactions.");
    println!("Success!");

    Ok(())
}
