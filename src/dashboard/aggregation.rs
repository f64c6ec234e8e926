//! Aggregates a month of transactions, categories and budgets for the dashboard.
//!
//! Every function here is pure: no database access, no clock and no errors.
//! Amounts are summed with [Decimal] arithmetic exactly as they are stored,
//! regardless of their sign. Sums and percentages saturate at the limits of
//! [Decimal] instead of overflowing.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    budget::Budget,
    category::{Category, CategoryId, UNCATEGORIZED_LABEL},
    transaction::Transaction,
};

/// The total spent in one category, or in the uncategorized bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySpend {
    /// The category, `None` for the uncategorized bucket.
    pub category_id: Option<CategoryId>,
    /// The category name, or "Uncategorized".
    pub name: String,
    /// The category color, `None` for the uncategorized bucket.
    pub color: Option<String>,
    /// The sum of the transaction amounts.
    pub amount: Decimal,
}

/// The category reference with the largest total spend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TopCategory {
    /// The winning category reference, which may no longer exist.
    ///
    /// `None` if there were no transactions or uncategorized spending won.
    pub category_id: Option<CategoryId>,
    /// The total spent in the category.
    pub amount: Decimal,
}

/// The total spent on one day of the month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySpend {
    /// The day of the month, 1 to 31.
    pub day: u8,
    /// The sum of the transaction amounts on that day.
    pub amount: Decimal,
}

/// How much of a category's budget has been spent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetUtilization {
    /// The category the row is for.
    pub category_id: CategoryId,
    /// The category name.
    pub category_name: String,
    /// The budget for the category, zero if it has none.
    pub budget_amount: Decimal,
    /// The amount spent in the category.
    pub actual_amount: Decimal,
    /// The percentage of the budget spent, capped at 100 and rounded to two decimal places.
    ///
    /// Zero when the budget is zero.
    pub percent_used: Decimal,
    /// The percentage of the budget spent without the cap.
    pub percent_used_unclamped: Decimal,
    /// Whether more was spent than budgeted.
    pub is_over_budget: bool,
}

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// The sum of all transaction amounts, zero for no transactions.
pub fn compute_totals(transactions: &[Transaction]) -> Decimal {
    sum(transactions.iter().map(|transaction| transaction.amount))
}

/// The total spent in the category `category_id`.
pub fn spent_in_category(transactions: &[Transaction], category_id: CategoryId) -> Decimal {
    sum(transactions
        .iter()
        .filter(|transaction| transaction.category_id == Some(category_id))
        .map(|transaction| transaction.amount))
}

/// `spent` as a percentage of `budget`, rounded to two decimal places.
///
/// Zero when the budget is zero or negative. Saturates at [Decimal::MAX] when
/// the budget is tiny compared to the spend.
pub fn percent_of_budget(spent: Decimal, budget: Decimal) -> Decimal {
    if budget <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    spent
        .checked_div(budget)
        .and_then(|ratio| ratio.checked_mul(ONE_HUNDRED))
        .map(|percent| percent.round_dp(2))
        .unwrap_or(if spent.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

fn sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Total the transactions per category.
///
/// Transactions without a category, or whose category is not in `categories`,
/// are totalled in a single "Uncategorized" entry. Entries are in the order
/// their first transaction appears.
pub fn compute_category_breakdown(
    transactions: &[Transaction],
    categories: &[Category],
) -> Vec<CategorySpend> {
    let categories_by_id: HashMap<CategoryId, &Category> = categories
        .iter()
        .map(|category| (category.id, category))
        .collect();

    let mut breakdown: Vec<CategorySpend> = Vec::new();
    let mut positions: HashMap<Option<CategoryId>, usize> = HashMap::new();

    for transaction in transactions {
        let category = transaction
            .category_id
            .and_then(|category_id| categories_by_id.get(&category_id).copied());
        let key = category.map(|category| category.id);

        let position = *positions.entry(key).or_insert_with(|| {
            breakdown.push(CategorySpend {
                category_id: key,
                name: category
                    .map(|category| category.name.to_string())
                    .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_owned()),
                color: category.map(|category| category.color.to_string()),
                amount: Decimal::ZERO,
            });
            breakdown.len() - 1
        });

        let spend = &mut breakdown[position];
        spend.amount = spend.amount.saturating_add(transaction.amount);
    }

    breakdown
}

/// Find the category reference with the strictly largest total.
///
/// Transactions are grouped by their raw category reference, so a deleted
/// category can still win. Ties go to the group whose first transaction
/// appears first.
pub fn compute_top_category(transactions: &[Transaction]) -> TopCategory {
    let mut order: Vec<Option<CategoryId>> = Vec::new();
    let mut totals: HashMap<Option<CategoryId>, Decimal> = HashMap::new();

    for transaction in transactions {
        let total = totals.entry(transaction.category_id).or_insert_with(|| {
            order.push(transaction.category_id);
            Decimal::ZERO
        });
        *total = total.saturating_add(transaction.amount);
    }

    let mut top: Option<TopCategory> = None;

    for category_id in order {
        let amount = totals[&category_id];

        match &top {
            Some(current) if amount <= current.amount => {}
            _ => {
                top = Some(TopCategory {
                    category_id,
                    amount,
                })
            }
        }
    }

    top.unwrap_or_default()
}

/// Total the transactions per day of the month.
///
/// Only days with transactions are included, in ascending order.
pub fn compute_daily_series(transactions: &[Transaction]) -> Vec<DailySpend> {
    let mut totals: BTreeMap<u8, Decimal> = BTreeMap::new();

    for transaction in transactions {
        let total = totals.entry(transaction.date.day()).or_default();
        *total = total.saturating_add(transaction.amount);
    }

    totals
        .into_iter()
        .map(|(day, amount)| DailySpend { day, amount })
        .collect()
}

/// Compare the spending in each category against its budget.
///
/// There is one entry per category, in the order of `categories`. A category
/// uses the first budget in `budgets` that refers to it, or a budget of zero
/// if there is none.
pub fn compute_budget_utilization(
    categories: &[Category],
    budgets: &[Budget],
    transactions: &[Transaction],
) -> Vec<BudgetUtilization> {
    let mut spent_by_category: HashMap<CategoryId, Decimal> = HashMap::new();

    for transaction in transactions {
        if let Some(category_id) = transaction.category_id {
            let spent = spent_by_category.entry(category_id).or_default();
            *spent = spent.saturating_add(transaction.amount);
        }
    }

    categories
        .iter()
        .map(|category| {
            let budget_amount = budgets
                .iter()
                .find(|budget| budget.category_id == category.id)
                .map(|budget| budget.amount)
                .unwrap_or(Decimal::ZERO);
            let actual_amount = spent_by_category
                .get(&category.id)
                .copied()
                .unwrap_or(Decimal::ZERO);

            let percent_used_unclamped = percent_of_budget(actual_amount, budget_amount);

            BudgetUtilization {
                category_id: category.id,
                category_name: category.name.to_string(),
                budget_amount,
                actual_amount,
                percent_used: percent_used_unclamped.min(ONE_HUNDRED),
                percent_used_unclamped,
                is_over_budget: actual_amount > budget_amount,
            }
        })
        .collect()
}

/// The total of `budgets` minus the total of `transactions`.
///
/// Negative when more was spent than budgeted.
pub fn compute_budget_remaining(transactions: &[Transaction], budgets: &[Budget]) -> Decimal {
    let budgeted = sum(budgets.iter().map(|budget| budget.amount));

    budgeted.saturating_sub(compute_totals(transactions))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use time::{Date, Month};

    use crate::{
        budget::Budget,
        category::{Category, CategoryColor, CategoryId, CategoryName},
        transaction::Transaction,
    };

    use super::{
        BudgetUtilization, CategorySpend, DailySpend, TopCategory, compute_budget_remaining,
        compute_budget_utilization, compute_category_breakdown, compute_daily_series,
        compute_top_category, compute_totals, percent_of_budget, spent_in_category,
    };

    fn transaction(amount: Decimal, day: u8, category_id: Option<CategoryId>) -> Transaction {
        Transaction {
            id: 0,
            amount,
            date: Date::from_calendar_date(2025, Month::March, day).unwrap(),
            description: "Test".to_owned(),
            category_id,
        }
    }

    fn category(id: CategoryId, name: &str, color: &str) -> Category {
        Category {
            id,
            name: CategoryName::new_unchecked(name),
            color: CategoryColor::new_unchecked(color),
            description: None,
        }
    }

    fn budget(category_id: CategoryId, amount: Decimal) -> Budget {
        Budget {
            id: 0,
            category_id,
            amount,
            month: 3,
            year: 2025,
        }
    }

    #[test]
    fn totals_of_nothing_is_zero() {
        assert_eq!(compute_totals(&[]), Decimal::ZERO);
    }

    #[test]
    fn totals_are_exact_and_order_independent() {
        let mut transactions = vec![
            transaction(dec!(0.1), 1, None),
            transaction(dec!(0.2), 2, Some(1)),
            transaction(dec!(10.05), 3, Some(2)),
        ];

        let forwards = compute_totals(&transactions);
        transactions.reverse();
        let backwards = compute_totals(&transactions);

        assert_eq!(forwards, dec!(10.35));
        assert_eq!(forwards, backwards);
    }

    #[test]
    fn breakdown_groups_by_category_in_first_seen_order() {
        let categories = vec![
            category(1, "Food", "#f00"),
            category(2, "Transport", "#0f0"),
        ];
        let transactions = vec![
            transaction(dec!(5), 1, Some(2)),
            transaction(dec!(10), 2, None),
            transaction(dec!(7.5), 3, Some(1)),
            transaction(dec!(2.5), 4, Some(2)),
        ];

        let got = compute_category_breakdown(&transactions, &categories);

        assert_eq!(
            got,
            vec![
                CategorySpend {
                    category_id: Some(2),
                    name: "Transport".to_owned(),
                    color: Some("#0f0".to_owned()),
                    amount: dec!(7.5),
                },
                CategorySpend {
                    category_id: None,
                    name: "Uncategorized".to_owned(),
                    color: None,
                    amount: dec!(10),
                },
                CategorySpend {
                    category_id: Some(1),
                    name: "Food".to_owned(),
                    color: Some("#f00".to_owned()),
                    amount: dec!(7.5),
                },
            ]
        );
    }

    #[test]
    fn breakdown_puts_deleted_categories_in_uncategorized() {
        let categories = vec![category(1, "Food", "#f00")];
        let transactions = vec![
            transaction(dec!(4), 1, Some(99)),
            transaction(dec!(6), 2, None),
        ];

        let got = compute_category_breakdown(&transactions, &categories);

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].name, "Uncategorized");
        assert_eq!(got[0].category_id, None);
        assert_eq!(got[0].amount, dec!(10));
    }

    #[test]
    fn breakdown_sums_to_totals() {
        let categories = vec![category(1, "Food", "#f00"), category(2, "Rent", "#00f")];
        let transactions = vec![
            transaction(dec!(1.11), 1, Some(1)),
            transaction(dec!(2.22), 2, Some(2)),
            transaction(dec!(3.33), 3, Some(3)),
            transaction(dec!(4.44), 4, None),
            transaction(dec!(5.55), 5, Some(1)),
        ];

        let breakdown_total: Decimal = compute_category_breakdown(&transactions, &categories)
            .iter()
            .map(|spend| spend.amount)
            .sum();

        assert_eq!(breakdown_total, compute_totals(&transactions));
    }

    #[test]
    fn top_category_of_nothing_is_empty() {
        assert_eq!(compute_top_category(&[]), TopCategory::default());
        assert_eq!(
            compute_top_category(&[]),
            TopCategory {
                category_id: None,
                amount: Decimal::ZERO
            }
        );
    }

    #[test]
    fn top_category_has_largest_total() {
        let transactions = vec![
            transaction(dec!(20), 1, Some(1)),
            transaction(dec!(25), 2, Some(2)),
            transaction(dec!(10), 3, Some(1)),
        ];

        assert_eq!(
            compute_top_category(&transactions),
            TopCategory {
                category_id: Some(1),
                amount: dec!(30)
            }
        );
    }

    #[test]
    fn top_category_tie_goes_to_first_seen() {
        let transactions = vec![
            transaction(dec!(30), 1, Some(1)),
            transaction(dec!(30), 2, Some(2)),
        ];

        assert_eq!(
            compute_top_category(&transactions),
            TopCategory {
                category_id: Some(1),
                amount: dec!(30)
            }
        );
    }

    #[test]
    fn top_category_can_be_uncategorized() {
        let transactions = vec![
            transaction(dec!(5), 1, Some(1)),
            transaction(dec!(50), 2, None),
        ];

        assert_eq!(
            compute_top_category(&transactions),
            TopCategory {
                category_id: None,
                amount: dec!(50)
            }
        );
    }

    #[test]
    fn daily_series_is_sparse_and_sorted() {
        let transactions = vec![
            transaction(dec!(5), 12, None),
            transaction(dec!(10), 5, Some(1)),
            transaction(dec!(20), 5, Some(2)),
        ];

        assert_eq!(
            compute_daily_series(&transactions),
            vec![
                DailySpend {
                    day: 5,
                    amount: dec!(30)
                },
                DailySpend {
                    day: 12,
                    amount: dec!(5)
                },
            ]
        );
    }

    #[test]
    fn daily_series_of_nothing_is_empty() {
        assert!(compute_daily_series(&[]).is_empty());
    }

    #[test]
    fn utilization_has_one_row_per_category() {
        let categories = vec![
            category(1, "Food", "#f00"),
            category(2, "Rent", "#00f"),
            category(3, "Fun", "#0f0"),
        ];
        let budgets = vec![budget(1, dec!(200)), budget(2, dec!(1000))];
        let transactions = vec![
            transaction(dec!(50), 1, Some(1)),
            transaction(dec!(1200), 1, Some(2)),
            transaction(dec!(9), 1, None),
        ];

        let got = compute_budget_utilization(&categories, &budgets, &transactions);

        assert_eq!(
            got,
            vec![
                BudgetUtilization {
                    category_id: 1,
                    category_name: "Food".to_owned(),
                    budget_amount: dec!(200),
                    actual_amount: dec!(50),
                    percent_used: dec!(25),
                    percent_used_unclamped: dec!(25),
                    is_over_budget: false,
                },
                BudgetUtilization {
                    category_id: 2,
                    category_name: "Rent".to_owned(),
                    budget_amount: dec!(1000),
                    actual_amount: dec!(1200),
                    percent_used: dec!(100),
                    percent_used_unclamped: dec!(120),
                    is_over_budget: true,
                },
                BudgetUtilization {
                    category_id: 3,
                    category_name: "Fun".to_owned(),
                    budget_amount: Decimal::ZERO,
                    actual_amount: Decimal::ZERO,
                    percent_used: Decimal::ZERO,
                    percent_used_unclamped: Decimal::ZERO,
                    is_over_budget: false,
                },
            ]
        );
    }

    #[test]
    fn utilization_without_budget_is_zero_percent_and_over() {
        let categories = vec![category(1, "Food", "#f00")];
        let transactions = vec![transaction(dec!(50), 1, Some(1))];

        let got = compute_budget_utilization(&categories, &[], &transactions);

        assert_eq!(got[0].percent_used, Decimal::ZERO);
        assert_eq!(got[0].percent_used_unclamped, Decimal::ZERO);
        assert!(got[0].is_over_budget);
    }

    #[test]
    fn utilization_uses_first_matching_budget() {
        let categories = vec![category(1, "Food", "#f00")];
        let budgets = vec![budget(1, dec!(100)), budget(1, dec!(400))];
        let transactions = vec![transaction(dec!(50), 1, Some(1))];

        let got = compute_budget_utilization(&categories, &budgets, &transactions);

        assert_eq!(got[0].budget_amount, dec!(100));
        assert_eq!(got[0].percent_used, dec!(50));
    }

    #[test]
    fn utilization_rounds_percent() {
        let categories = vec![category(1, "Food", "#f00")];
        let budgets = vec![budget(1, dec!(3))];
        let transactions = vec![transaction(dec!(1), 1, Some(1))];

        let got = compute_budget_utilization(&categories, &budgets, &transactions);

        assert_eq!(got[0].percent_used, dec!(33.33));
    }

    #[test]
    fn remaining_can_be_negative() {
        let budgets = vec![budget(1, dec!(200)), budget(2, dec!(300))];
        let transactions = vec![
            transaction(dec!(400), 1, Some(1)),
            transaction(dec!(200), 2, None),
        ];

        assert_eq!(compute_budget_remaining(&transactions, &budgets), dec!(-100));
    }

    #[test]
    fn remaining_without_budgets_is_negative_spend() {
        let transactions = vec![transaction(dec!(12.5), 1, None)];

        assert_eq!(compute_budget_remaining(&transactions, &[]), dec!(-12.5));
        assert_eq!(compute_budget_remaining(&[], &[]), Decimal::ZERO);
    }

    #[test]
    fn utilization_of_tiny_budget_saturates() {
        let categories = [category(1, "Food", "#fff")];
        let budgets = [budget(1, dec!(0.0000000000000000000000000001))];
        let transactions = [transaction(dec!(5), 3, Some(1))];

        let got = compute_budget_utilization(&categories, &budgets, &transactions);

        assert_eq!(got[0].percent_used, dec!(100));
        assert_eq!(got[0].percent_used_unclamped, Decimal::MAX);
        assert!(got[0].is_over_budget);
    }

    #[test]
    fn huge_amounts_saturate_instead_of_overflowing() {
        let transactions = [
            transaction(Decimal::MAX, 1, Some(1)),
            transaction(Decimal::MAX, 1, Some(1)),
        ];

        assert_eq!(compute_totals(&transactions), Decimal::MAX);
        assert_eq!(compute_daily_series(&transactions)[0].amount, Decimal::MAX);
        assert_eq!(compute_top_category(&transactions).amount, Decimal::MAX);
        assert_eq!(
            compute_budget_remaining(&transactions, &[budget(1, dec!(10))]),
            dec!(10) - Decimal::MAX
        );
    }

    #[test]
    fn percent_of_budget_is_rounded() {
        assert_eq!(percent_of_budget(dec!(50), dec!(200)), dec!(25));
        assert_eq!(percent_of_budget(dec!(1), dec!(3)), dec!(33.33));
        assert_eq!(percent_of_budget(dec!(50), dec!(0)), dec!(0));
    }

    #[test]
    fn spent_in_category_ignores_other_categories() {
        let transactions = [
            transaction(dec!(10), 1, Some(1)),
            transaction(dec!(20), 2, Some(2)),
            transaction(dec!(5), 3, Some(1)),
            transaction(dec!(7), 3, None),
        ];

        assert_eq!(spent_in_category(&transactions, 1), dec!(15));
        assert_eq!(spent_in_category(&transactions, 3), dec!(0));
    }
}
