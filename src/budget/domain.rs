//! Core budget domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, category::CategoryId, period::Period, validation};

/// Database identifier for a budget.
pub type BudgetId = i64;

/// The most that should be spent in a category during one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Budget {
    /// The ID of the budget.
    pub id: BudgetId,
    /// The category the budget limits.
    ///
    /// The category may have been deleted since the budget was set.
    pub category_id: CategoryId,
    /// The amount that may be spent.
    pub amount: Decimal,
    /// The month number, 1 to 12.
    pub month: u8,
    /// The year, 2000 to 2100.
    pub year: i32,
}

/// A validated budget that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBudget {
    pub category_id: CategoryId,
    pub amount: Decimal,
    pub month: u8,
    pub year: i32,
}

impl NewBudget {
    /// Validate the fields of a budget.
    ///
    /// Whether the category exists is checked when the budget is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not positive, or the month or year
    /// are out of range.
    pub fn new(
        category_id: CategoryId,
        amount: Decimal,
        month: u8,
        year: i32,
    ) -> Result<Self, Error> {
        Ok(Self {
            category_id,
            amount: validation::positive_amount(amount)?,
            month: validation::month(month)?,
            year: validation::year(year)?,
        })
    }
}

/// Form data for budget creation and editing.
///
/// Also used as the JSON body of the budget API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetFormData {
    /// Empty when no category was selected.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    pub amount: Decimal,
    pub month: u8,
    pub year: i32,
}

impl BudgetFormData {
    /// An empty form for `period` with no category or amount chosen yet.
    pub fn for_period(period: &Period) -> Self {
        Self {
            category_id: None,
            amount: Decimal::ZERO,
            month: period.month_number(),
            year: period.year(),
        }
    }

    /// Validate the form into a [NewBudget].
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidCategory] if no category was selected, or an
    /// error from [NewBudget::new].
    pub fn validate(&self) -> Result<NewBudget, Error> {
        let category_id = self.category_id.ok_or(Error::InvalidCategory(None))?;

        NewBudget::new(category_id, self.amount, self.month, self.year)
    }
}

impl From<&Budget> for BudgetFormData {
    fn from(budget: &Budget) -> Self {
        Self {
            category_id: Some(budget.category_id),
            amount: budget.amount,
            month: budget.month,
            year: budget.year,
        }
    }
}
