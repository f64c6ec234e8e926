use maud::{Markup, html};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    category::{Category, CategoryId},
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    transaction::{Transaction, TransactionBuilder},
    validation,
};

/// The form data for creating or editing a transaction.
///
/// Also used as the JSON body of the transaction API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionForm {
    /// The value of the transaction in dollars.
    pub amount: Decimal,
    /// The date when the transaction ocurred.
    pub date: Date,
    /// Text detailing the transaction.
    pub description: String,
    /// The category of the transaction, if any.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

impl TransactionForm {
    /// Check the amount and description, returning a builder for the transaction.
    ///
    /// Whether the category exists is checked when the transaction is stored.
    ///
    /// # Errors
    /// Returns [Error::NonPositiveAmount] or [Error::DescriptionTooShort].
    pub fn validate(self) -> Result<TransactionBuilder, Error> {
        let amount = validation::positive_amount(self.amount)?;
        let description = validation::description(&self.description)?;

        Ok(Transaction::build(amount, self.date, &description).category_id(self.category_id))
    }
}

pub struct TransactionFormDefaults<'a> {
    pub amount: Option<Decimal>,
    pub date: Date,
    pub description: Option<&'a str>,
    pub category_id: Option<CategoryId>,
}

pub fn transaction_form_fields(
    defaults: &TransactionFormDefaults<'_>,
    available_categories: &[Category],
) -> Markup {
    let amount_str = defaults.amount.map(|amount| format!("{:.2}", amount));

    html! {
        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            // w-full needed to ensure input takes the full width when prefilled with a value
            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    placeholder="0.00"
                    min="0.01"
                    required
                    value=[amount_str.as_deref()]
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="description"
                class=(FORM_LABEL_STYLE)
            {
                "Description"
            }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Description"
                minlength="2"
                value=[defaults.description]
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="category_id"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            select
                name="category_id"
                id="category_id"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" selected[defaults.category_id.is_none()] { "Uncategorized" }

                @for category in available_categories {
                    option
                        value=(category.id)
                        selected[Some(category.id) == defaults.category_id]
                    {
                        (category.name)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use scraper::Html;
    use time::macros::date;

    use crate::{
        Error,
        category::{Category, CategoryColor, CategoryName},
        test_utils::{get_select_options, get_selected_option},
    };

    use super::{TransactionForm, TransactionFormDefaults, transaction_form_fields};

    #[test]
    fn parses_form_with_empty_category() {
        let form: TransactionForm = serde_html_form::from_str(
            "amount=12.30&date=2025-03-04&description=Coffee&category_id=",
        )
        .unwrap();

        assert_eq!(form.amount, dec!(12.30));
        assert_eq!(form.date, date!(2025 - 03 - 04));
        assert_eq!(form.category_id, None);
    }

    #[test]
    fn validate_rejects_non_positive_amount() {
        let form = TransactionForm {
            amount: dec!(0),
            date: date!(2025 - 03 - 04),
            description: "Coffee".to_owned(),
            category_id: None,
        };

        assert_eq!(form.validate(), Err(Error::NonPositiveAmount(dec!(0))));
    }

    #[test]
    fn validate_rejects_short_description() {
        let form = TransactionForm {
            amount: dec!(1),
            date: date!(2025 - 03 - 04),
            description: " C ".to_owned(),
            category_id: None,
        };

        assert_eq!(form.validate(), Err(Error::DescriptionTooShort));
    }

    #[test]
    fn selects_default_category() {
        let categories = vec![
            Category {
                id: 1,
                name: CategoryName::new_unchecked("Food"),
                color: CategoryColor::default(),
                description: None,
            },
            Category {
                id: 2,
                name: CategoryName::new_unchecked("Rent"),
                color: CategoryColor::default(),
                description: None,
            },
        ];
        let fields = transaction_form_fields(
            &TransactionFormDefaults {
                amount: Some(dec!(5)),
                date: date!(2025 - 03 - 04),
                description: Some("Lunch"),
                category_id: Some(2),
            },
            &categories,
        );
        let html = Html::parse_fragment(&format!("<form>{}</form>", fields.into_string()));
        let form = crate::test_utils::must_get_form(&html);

        assert_eq!(
            get_select_options(&form, "category_id"),
            vec![
                ("".to_owned(), "Uncategorized".to_owned()),
                ("1".to_owned(), "Food".to_owned()),
                ("2".to_owned(), "Rent".to_owned()),
            ]
        );
        assert_eq!(get_selected_option(&form, "category_id"), Some("2".to_owned()));
    }
}
