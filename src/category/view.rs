//! Small pieces of markup for showing a category next to other data.

use maud::{Markup, html};

use crate::category::Category;

/// The label shown for transactions without a category, or whose category was deleted.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// A small colored dot for a category.
pub fn color_swatch(color: &str) -> Markup {
    html! {
        span
            class="inline-block w-3 h-3 rounded-full shrink-0"
            style=(format!("background-color: {color};"))
            aria-hidden="true"
        {}
    }
}

/// A badge with the category's color and name, or a grey "Uncategorized" badge.
pub fn category_badge(category: Option<&Category>) -> Markup {
    html! {
        @match category {
            Some(category) => {
                span
                    class="inline-flex items-center gap-1.5 px-2.5 py-0.5 rounded-full text-xs font-medium bg-gray-100 text-gray-800 dark:bg-gray-700 dark:text-gray-200"
                {
                    (color_swatch(category.color.as_ref()))
                    (category.name)
                }
            }
            None => {
                span
                    class="inline-flex items-center px-2.5 py-0.5 rounded-full text-xs font-medium text-gray-500 border border-dashed border-gray-300 dark:text-gray-400 dark:border-gray-600"
                {
                    (UNCATEGORIZED_LABEL)
                }
            }
        }
    }
}
