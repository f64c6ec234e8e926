//! The form shared by the new and edit budget pages.

use maud::{Markup, html};
use rust_decimal::Decimal;
use time::Month;

use crate::{
    budget::BudgetFormData,
    category::Category,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    validation::{MAX_BUDGET_YEAR, MIN_BUDGET_YEAR},
};

/// Where a budget form is submitted to.
pub enum BudgetFormAction<'a> {
    Create(&'a str),
    Update(&'a str),
}

fn month_options() -> impl Iterator<Item = (u8, Month)> {
    (1..=12u8).filter_map(|number| Month::try_from(number).ok().map(|month| (number, month)))
}

pub fn budget_form_view(
    action: BudgetFormAction<'_>,
    values: &BudgetFormData,
    categories: &[Category],
    error_message: &str,
) -> Markup {
    let (hx_post, hx_put, submit_label) = match action {
        BudgetFormAction::Create(endpoint) => (Some(endpoint), None, "Create Budget"),
        BudgetFormAction::Update(endpoint) => (None, Some(endpoint), "Update Budget"),
    };
    let amount = (values.amount > Decimal::ZERO).then(|| format!("{:.2}", values.amount));

    html! {
        form
            hx-post=[hx_post]
            hx-put=[hx_put]
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="category_id" class=(FORM_LABEL_STYLE) { "Category" }

                select
                    id="category_id"
                    name="category_id"
                    required
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[values.category_id.is_none()] { "Select a category" }

                    @for category in categories {
                        option
                            value=(category.id)
                            selected[values.category_id == Some(category.id)]
                        {
                            (category.name)
                        }
                    }
                }
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper w-full"
                {
                    input
                        id="amount"
                        type="number"
                        name="amount"
                        step="0.01"
                        min="0.01"
                        placeholder="0.00"
                        value=[amount]
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div class="flex gap-4"
            {
                div class="w-full"
                {
                    label for="month" class=(FORM_LABEL_STYLE) { "Month" }

                    select
                        id="month"
                        name="month"
                        required
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for (number, month) in month_options() {
                            option value=(number) selected[values.month == number] { (month) }
                        }
                    }
                }

                div class="w-full"
                {
                    label for="year" class=(FORM_LABEL_STYLE) { "Year" }

                    input
                        id="year"
                        type="number"
                        name="year"
                        min=(MIN_BUDGET_YEAR)
                        max=(MAX_BUDGET_YEAR)
                        value=(values.year)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_label) }
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use scraper::Html;

    use crate::{
        budget::BudgetFormData,
        category::{Category, CategoryColor, CategoryName},
        test_utils::{
            assert_form_error_message, assert_form_input_with_value, assert_hx_endpoint,
            assert_valid_html, get_select_options, get_selected_option, must_get_form,
        },
    };

    use super::{BudgetFormAction, budget_form_view};

    fn render(values: &BudgetFormData, error_message: &str) -> Html {
        let categories = vec![Category {
            id: 4,
            name: CategoryName::new_unchecked("Groceries"),
            color: CategoryColor::default(),
            description: None,
        }];

        Html::parse_fragment(
            &budget_form_view(
                BudgetFormAction::Update("/budgets/1"),
                values,
                &categories,
                error_message,
            )
            .into_string(),
        )
    }

    #[test]
    fn month_select_lists_every_month() {
        let html = render(
            &BudgetFormData {
                category_id: Some(4),
                amount: dec!(120),
                month: 7,
                year: 2025,
            },
            "",
        );
        assert_valid_html(&html);
        let form = must_get_form(&html);

        let months: Vec<String> = get_select_options(&form, "month")
            .into_iter()
            .map(|(_, label)| label)
            .collect();

        assert_eq!(
            months,
            vec![
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December"
            ]
        );
        assert_eq!(get_selected_option(&form, "month"), Some("7".to_owned()));
        assert_eq!(get_selected_option(&form, "category_id"), Some("4".to_owned()));
        assert_form_input_with_value(&form, "amount", "number", "120.00");
        assert_form_input_with_value(&form, "year", "number", "2025");
        assert_hx_endpoint(&form, "/budgets/1", "hx-put");
    }

    #[test]
    fn shows_error_message() {
        let html = render(
            &BudgetFormData {
                category_id: None,
                amount: dec!(0),
                month: 1,
                year: 2025,
            },
            "Error: bad amount",
        );
        let form = must_get_form(&html);

        assert_form_error_message(&form, "Error: bad amount");
        assert_eq!(get_selected_option(&form, "category_id"), Some("".to_owned()));
    }
}
