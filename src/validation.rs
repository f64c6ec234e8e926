//! Checks shared by the transaction, category and budget forms.

use rust_decimal::{Decimal, RoundingStrategy};
use unicode_segmentation::UnicodeSegmentation;

use crate::Error;

/// The fewest user-perceived characters a description or name may have.
pub const MIN_TEXT_LENGTH: usize = 2;

/// The earliest year a budget may be set for.
pub const MIN_BUDGET_YEAR: i32 = 2000;

/// The latest year a budget may be set for.
pub const MAX_BUDGET_YEAR: i32 = 2100;

/// Round `amount` to whole cents and check that it is strictly greater than zero.
///
/// # Errors
/// Returns [Error::NonPositiveAmount] for amounts that are zero or negative
/// once rounded, e.g. `0.004`.
pub fn positive_amount(amount: Decimal) -> Result<Decimal, Error> {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    if rounded <= Decimal::ZERO {
        return Err(Error::NonPositiveAmount(amount));
    }

    Ok(rounded)
}

/// Whether `text` has at least [MIN_TEXT_LENGTH] user-perceived characters after trimming.
pub fn is_long_enough(text: &str) -> bool {
    text.trim().graphemes(true).count() >= MIN_TEXT_LENGTH
}

/// Check that `description` is long enough and return it trimmed.
///
/// # Errors
/// Returns [Error::DescriptionTooShort] if the description has fewer than two characters.
pub fn description(description: &str) -> Result<String, Error> {
    if !is_long_enough(description) {
        return Err(Error::DescriptionTooShort);
    }

    Ok(description.trim().to_owned())
}

/// Check that `month` is a calendar month number.
///
/// # Errors
/// Returns [Error::InvalidMonth] if `month` is not in 1 to 12.
pub fn month(month: u8) -> Result<u8, Error> {
    if !(1..=12).contains(&month) {
        return Err(Error::InvalidMonth(month));
    }

    Ok(month)
}

/// Check that `year` is in the range budgets may be set for.
///
/// # Errors
/// Returns [Error::InvalidYear] if `year` is not in 2000 to 2100.
pub fn year(year: i32) -> Result<i32, Error> {
    if !(MIN_BUDGET_YEAR..=MAX_BUDGET_YEAR).contains(&year) {
        return Err(Error::InvalidYear(year));
    }

    Ok(year)
}
