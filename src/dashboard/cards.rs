//! Summary cards at the top of the dashboard.
//!
//! Shows the month's total expenses, how much budget is left, the top
//! category and the number of transactions.

use maud::{Markup, html};
use rust_decimal::Decimal;

use crate::{
    dashboard::summary::DashboardSummary,
    html::{CARD_STYLE, format_currency},
};

const CARD_TITLE_STYLE: &str = "text-sm font-medium text-gray-600 dark:text-gray-400";
const CARD_VALUE_STYLE: &str = "text-2xl font-bold mt-1";
const CARD_NOTE_STYLE: &str = "text-sm text-gray-500 dark:text-gray-400 mt-1";

/// Renders the four summary cards for a month.
pub(super) fn summary_cards_view(summary: &DashboardSummary) -> Markup {
    let is_over_budget = summary.budget_remaining < Decimal::ZERO;
    let remaining_value_style = if is_over_budget {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    };

    html! {
        section
            id="summary-cards"
            class="w-full grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4 my-4"
        {
            (card(
                "Total Expenses",
                html! { (format_currency(summary.total_expenses)) },
                "",
                &format!("Spent in {}", summary.period.label()),
            ))

            (card(
                "Budget Remaining",
                html! { (format_currency(summary.budget_remaining)) },
                remaining_value_style,
                if is_over_budget { "Over budget" } else { "Still available to spend" },
            ))

            (card(
                "Top Category",
                html! { (summary.top_category.name) },
                "",
                &format_currency(summary.top_category.top.amount),
            ))

            (card(
                "Transactions",
                html! { (summary.transaction_count) },
                "",
                "Recorded this month",
            ))
        }
    }
}

fn card(title: &str, value: Markup, value_style: &str, note: &str) -> Markup {
    html! {
        div class=(CARD_STYLE) data-card=(title)
        {
            h3 class=(CARD_TITLE_STYLE) { (title) }
            p class={(CARD_VALUE_STYLE) " " (value_style)} { (value) }
            p class=(CARD_NOTE_STYLE) { (note) }
        }
    }
}
