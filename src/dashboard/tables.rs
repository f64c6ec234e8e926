//! The table of the month's most recent transactions.

use std::collections::HashMap;

use maud::{Markup, html};

use crate::{
    category::{Category, CategoryId, category_badge},
    endpoints,
    html::{LINK_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    transaction::Transaction,
};

/// Renders the most recent transactions with their category.
///
/// Transactions whose category no longer exists are shown as uncategorized.
pub(super) fn recent_transactions_table(
    transactions: &[Transaction],
    categories: &[Category],
) -> Markup {
    let categories_by_id: HashMap<CategoryId, &Category> = categories
        .iter()
        .map(|category| (category.id, category))
        .collect();

    html! {
        section id="recent-transactions" class="w-full mx-auto mb-4"
        {
            div class="flex justify-between items-baseline mb-4"
            {
                h3 class="text-xl font-semibold" { "Recent Transactions" }

                a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "View all" }
            }

            @if transactions.is_empty() {
                p class="text-gray-500 dark:text-gray-400" { "No transactions this month." }
            } @else {
                div class="overflow-x-auto rounded-lg shadow"
                {
                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Amount" }
                            }
                        }

                        tbody
                        {
                            @for transaction in transactions {
                                tr class=(TABLE_ROW_STYLE)
                                {
                                    td class=(TABLE_CELL_STYLE) { (transaction.date) }
                                    td class=(TABLE_CELL_STYLE) { (transaction.description) }
                                    td class=(TABLE_CELL_STYLE)
                                    {
                                        (category_badge(
                                            transaction
                                                .category_id
                                                .and_then(|id| categories_by_id.get(&id).copied())
                                        ))
                                    }
                                    td class={(TABLE_CELL_STYLE) " text-right font-mono"}
                                    {
                                        (format_currency(transaction.amount))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        category::{Category, CategoryColor, CategoryName},
        transaction::Transaction,
    };

    use super::recent_transactions_table;

    #[test]
    fn shows_category_or_uncategorized() {
        let categories = [Category {
            id: 1,
            name: CategoryName::new_unchecked("Food"),
            color: CategoryColor::default(),
            description: None,
        }];
        let transactions = [
            Transaction {
                id: 1,
                amount: dec!(12.5),
                date: date!(2025 - 03 - 10),
                description: "Lunch".to_owned(),
                category_id: Some(1),
            },
            Transaction {
                id: 2,
                amount: dec!(3),
                date: date!(2025 - 03 - 09),
                description: "Parking".to_owned(),
                category_id: Some(99),
            },
        ];

        let html = Html::parse_fragment(
            &recent_transactions_table(&transactions, &categories).into_string(),
        );

        let rows: Vec<Vec<String>> = html
            .select(&Selector::parse("tbody tr").unwrap())
            .map(|row| {
                row.select(&Selector::parse("td").unwrap())
                    .map(|cell| cell.text().collect::<String>().trim().to_owned())
                    .collect()
            })
            .collect();

        assert_eq!(
            rows,
            vec![
                vec!["2025-03-10", "Lunch", "Food", "$12.50"],
                vec!["2025-03-09", "Parking", "Uncategorized", "$3.00"],
            ]
        );
    }

    #[test]
    fn empty_month_shows_message() {
        let html = Html::parse_fragment(&recent_transactions_table(&[], &[]).into_string());

        let message: String = html
            .select(&Selector::parse("p").unwrap())
            .next()
            .unwrap()
            .text()
            .collect();
        assert_eq!(message, "No transactions this month.");
    }
}
