//! The form shared by the new and edit category pages.

use maud::{Markup, html};

use crate::{
    category::CategoryFormData,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// Where a category form is submitted to.
pub enum CategoryFormAction<'a> {
    Create(&'a str),
    Update(&'a str),
}

pub fn category_form_view(
    action: CategoryFormAction<'_>,
    values: &CategoryFormData,
    error_message: &str,
) -> Markup {
    let (hx_post, hx_put, submit_label) = match action {
        CategoryFormAction::Create(endpoint) => (Some(endpoint), None, "Create Category"),
        CategoryFormAction::Update(endpoint) => (None, Some(endpoint), "Update Category"),
    };

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
                label
                    for="name"
                    class=(FORM_LABEL_STYLE)
                {
                    "Name"
                }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="Groceries"
                    value=(values.name)
                    minlength="2"
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label
                    for="color"
                    class=(FORM_LABEL_STYLE)
                {
                    "Color"
                }

                input
                    id="color"
                    type="color"
                    name="color"
                    value=(values.color)
                    required
                    class="block h-10 w-20 p-1 rounded border border-gray-300 dark:border-gray-600";
            }

            div
            {
                label
                    for="description"
                    class=(FORM_LABEL_STYLE)
                {
                    "Description (optional)"
                }

                textarea
                    id="description"
                    name="description"
                    rows="3"
                    placeholder="What belongs in this category?"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    (values.description.as_deref().unwrap_or_default())
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
