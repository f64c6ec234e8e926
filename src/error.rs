//! Defines the app level error type and conversions to rendered HTML pages, alerts and JSON.
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde_json::json;

use crate::{
    alert::Alert, category::CategoryId, html::error_view,
    internal_server_error::InternalServerError, not_found::NotFoundError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An amount of zero or less was used for a transaction or budget.
    #[error("amount must be at least 0.01, got {0}")]
    NonPositiveAmount(Decimal),

    /// A transaction description was shorter than two characters.
    #[error("Description must be at least 2 characters")]
    DescriptionTooShort,

    /// A category name was shorter than two characters.
    #[error("Category name must be at least 2 characters")]
    CategoryNameTooShort,

    /// A category color was not a 3 or 6 digit hex color.
    #[error("\"{0}\" is not a valid hex color, use a color like #fff or #3b82f6")]
    InvalidColor(String),

    /// A budget month outside of 1 to 12.
    #[error("{0} is not a valid month, expected a number from 1 to 12")]
    InvalidMonth(u8),

    /// A budget year outside of the supported range.
    #[error("{0} is not a valid year, expected a year from 2000 to 2100")]
    InvalidYear(i32),

    /// A period string could not be parsed as a calendar month, e.g. "2025-13".
    #[error("\"{0}\" is not a valid month, expected the format YYYY-MM")]
    InvalidPeriod(String),

    /// A JSON request body was malformed or did not match the expected fields.
    #[error("invalid JSON body: {0}")]
    InvalidJson(String),

    /// The category ID used to create a transaction or budget did not match a valid category.
    #[error("the category ID does not refer to a valid category")]
    InvalidCategory(Option<CategoryId>),

    /// A budget already exists for the category and month.
    ///
    /// Each category has at most one budget per calendar month so that the
    /// dashboard never has to choose between competing budgets.
    #[error("a budget for category {category_id} already exists for {month}/{year}")]
    DuplicateBudget {
        /// The category the budget belongs to.
        category_id: CategoryId,
        /// The month of the existing budget.
        month: u8,
        /// The year of the existing budget.
        year: i32,
    },

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to update a category that does not exist
    #[error("tried to update a category that is not in the database")]
    UpdateMissingCategory,

    /// Tried to delete a category that does not exist
    #[error("tried to delete a category that is not in the database")]
    DeleteMissingCategory,

    /// Tried to update a budget that does not exist
    #[error("tried to update a budget that is not in the database")]
    UpdateMissingBudget,

    /// Tried to delete a budget that does not exist
    #[error("tried to delete a budget that is not in the database")]
    DeleteMissingBudget,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::InvalidPeriod(period) => (
                StatusCode::BAD_REQUEST,
                error_view(
                    "Bad Request",
                    "400",
                    "Invalid Month",
                    &format!(
                        "\"{period}\" is not a valid month. Use the format YYYY-MM, e.g. 2025-03."
                    ),
                ),
            )
                .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

/// The parts of an error that are shown to the client.
struct ErrorDescription {
    status_code: StatusCode,
    message: String,
    details: String,
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected JSON body: {rejection}");
        Error::InvalidJson(rejection.body_text())
    }
}

impl Error {
    fn describe(self) -> ErrorDescription {
        let (status_code, message, details) = match self {
            Error::NonPositiveAmount(amount) => (
                StatusCode::BAD_REQUEST,
                "Invalid amount".to_owned(),
                format!("The amount must be at least 0.01, got {amount}."),
            ),
            Error::DescriptionTooShort => (
                StatusCode::BAD_REQUEST,
                "Invalid description".to_owned(),
                "The description must be at least 2 characters.".to_owned(),
            ),
            Error::CategoryNameTooShort => (
                StatusCode::BAD_REQUEST,
                "Invalid category name".to_owned(),
                "The category name must be at least 2 characters.".to_owned(),
            ),
            Error::InvalidColor(color) => (
                StatusCode::BAD_REQUEST,
                "Invalid color".to_owned(),
                format!("\"{color}\" is not a valid hex color. Use a color like #fff or #3b82f6."),
            ),
            Error::InvalidMonth(month) => (
                StatusCode::BAD_REQUEST,
                "Invalid month".to_owned(),
                format!("{month} is not a valid month. Choose a month from 1 to 12."),
            ),
            Error::InvalidYear(year) => (
                StatusCode::BAD_REQUEST,
                "Invalid year".to_owned(),
                format!("{year} is not a valid year. Choose a year from 2000 to 2100."),
            ),
            Error::InvalidPeriod(period) => (
                StatusCode::BAD_REQUEST,
                "Invalid month".to_owned(),
                format!("\"{period}\" is not a valid month. Use the format YYYY-MM."),
            ),
            Error::InvalidJson(reason) => (
                StatusCode::BAD_REQUEST,
                "Invalid request body".to_owned(),
                format!("The request body is not valid: {reason}"),
            ),
            Error::InvalidCategory(category_id) => (
                StatusCode::BAD_REQUEST,
                "Invalid category ID".to_owned(),
                match category_id {
                    Some(id) => format!("Could not find a category with the ID {id}."),
                    None => "A category must be selected.".to_owned(),
                },
            ),
            Error::DuplicateBudget { month, year, .. } => (
                StatusCode::CONFLICT,
                "Duplicate budget".to_owned(),
                format!(
                    "This category already has a budget for {month}/{year}. \
                    Edit the existing budget instead."
                ),
            ),
            Error::UpdateMissingTransaction => (
                StatusCode::NOT_FOUND,
                "Could not update transaction".to_owned(),
                "The transaction could not be found.".to_owned(),
            ),
            Error::DeleteMissingTransaction => (
                StatusCode::NOT_FOUND,
                "Could not delete transaction".to_owned(),
                "The transaction could not be found. \
                Try refreshing the page to see if the transaction has already been deleted."
                    .to_owned(),
            ),
            Error::UpdateMissingCategory => (
                StatusCode::NOT_FOUND,
                "Could not update category".to_owned(),
                "The category could not be found.".to_owned(),
            ),
            Error::DeleteMissingCategory => (
                StatusCode::NOT_FOUND,
                "Could not delete category".to_owned(),
                "The category could not be found. \
                Try refreshing the page to see if the category has already been deleted."
                    .to_owned(),
            ),
            Error::UpdateMissingBudget => (
                StatusCode::NOT_FOUND,
                "Could not update budget".to_owned(),
                "The budget could not be found.".to_owned(),
            ),
            Error::DeleteMissingBudget => (
                StatusCode::NOT_FOUND,
                "Could not delete budget".to_owned(),
                "The budget could not be found. \
                Try refreshing the page to see if the budget has already been deleted."
                    .to_owned(),
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                "Not found".to_owned(),
                "The requested resource could not be found.".to_owned(),
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid Timezone Settings".to_owned(),
                format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong".to_owned(),
                "An unexpected error occurred, check the server logs for more details.".to_owned(),
            ),
        };

        ErrorDescription {
            status_code,
            message,
            details,
        }
    }

    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let ErrorDescription {
            status_code,
            message,
            details,
        } = self.describe();

        let alert = Alert::Error { message, details };

        (status_code, alert.into_html()).into_response()
    }

    /// Convert the error into an HTTP response with a JSON body of the form `{"error": "..."}`.
    pub fn into_json_response(self) -> Response {
        let ErrorDescription {
            status_code,
            details,
            ..
        } = self.describe();

        (status_code, Json(json!({ "error": details }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use rust_decimal_macros::dec;

    use crate::{
        Error,
        test_utils::{assert_valid_html, parse_html_fragment},
    };

    #[tokio::test]
    async fn validation_errors_are_bad_requests() {
        let errors = [
            Error::NonPositiveAmount(dec!(-1)),
            Error::DescriptionTooShort,
            Error::CategoryNameTooShort,
            Error::InvalidColor("red".to_owned()),
            Error::InvalidMonth(13),
            Error::InvalidYear(1999),
            Error::InvalidCategory(Some(3)),
            Error::InvalidJson("missing field `amount`".to_owned()),
        ];

        for error in errors {
            let response = error.into_alert_response();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn duplicate_budget_is_a_conflict() {
        let error = Error::DuplicateBudget {
            category_id: 1,
            month: 3,
            year: 2025,
        };

        let response = error.into_json_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn alert_response_is_valid_html() {
        let response = Error::DeleteMissingBudget.into_alert_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
    }

    #[tokio::test]
    async fn json_response_contains_error_message() {
        let response = Error::InvalidMonth(0).into_json_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json["error"],
            "0 is not a valid month. Choose a month from 1 to 12."
        );
    }
}
