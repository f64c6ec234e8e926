//! JSON endpoints for categories.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState, Error,
    category::{
        CategoryFormData, CategoryId, create_category, delete_category, get_all_categories,
        get_category, update_category,
    },
};

/// The state needed for the category API.
#[derive(Debug, Clone)]
pub struct CategoryApiState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

fn not_found_or(error: Error) -> Response {
    match error {
        Error::NotFound | Error::UpdateMissingCategory | Error::DeleteMissingCategory => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Category not found" })),
        )
            .into_response(),
        error => error.into_json_response(),
    }
}

/// List all categories sorted by name.
pub async fn list_categories(State(state): State<CategoryApiState>) -> Response {
    let Ok(connection) = state.db_connection.lock() else {
        tracing::error!("could not acquire database lock");
        return Error::DatabaseLockError.into_json_response();
    };

    match get_all_categories(&connection) {
        Ok(categories) => Json(categories).into_response(),
        Err(error) => error.into_json_response(),
    }
}

/// Create a category from a JSON body and return it with status 201.
pub async fn create_category_json(
    State(state): State<CategoryApiState>,
    body: Result<Json<CategoryFormData>, JsonRejection>,
) -> Response {
    let new_category = match body
        .map_err(Error::from)
        .and_then(|Json(body)| body.validate())
    {
        Ok(new_category) => new_category,
        Err(error) => return error.into_json_response(),
    };

    let Ok(connection) = state.db_connection.lock() else {
        tracing::error!("could not acquire database lock");
        return Error::DatabaseLockError.into_json_response();
    };

    match create_category(new_category, &connection) {
        Ok(category) => (StatusCode::CREATED, Json(category)).into_response(),
        Err(error) => error.into_json_response(),
    }
}

/// Get a single category.
pub async fn get_category_json(
    Path(category_id): Path<CategoryId>,
    State(state): State<CategoryApiState>,
) -> Response {
    let Ok(connection) = state.db_connection.lock() else {
        tracing::error!("could not acquire database lock");
        return Error::DatabaseLockError.into_json_response();
    };

    match get_category(category_id, &connection) {
        Ok(category) => Json(category).into_response(),
        Err(error) => not_found_or(error),
    }
}

/// Replace a category with the JSON body.
pub async fn update_category_json(
    Path(category_id): Path<CategoryId>,
    State(state): State<CategoryApiState>,
    body: Result<Json<CategoryFormData>, JsonRejection>,
) -> Response {
    let category = match body
        .map_err(Error::from)
        .and_then(|Json(body)| body.validate())
    {
        Ok(category) => category,
        Err(error) => return error.into_json_response(),
    };

    let Ok(connection) = state.db_connection.lock() else {
        tracing::error!("could not acquire database lock");
        return Error::DatabaseLockError.into_json_response();
    };

    match update_category(category_id, category, &connection) {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(error) => not_found_or(error),
    }
}

/// Delete a category, leaving its transactions and budgets in place.
pub async fn delete_category_json(
    Path(category_id): Path<CategoryId>,
    State(state): State<CategoryApiState>,
) -> Response {
    let Ok(connection) = state.db_connection.lock() else {
        tracing::error!("could not acquire database lock");
        return Error::DatabaseLockError.into_json_response();
    };

    match delete_category(category_id, &connection) {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(error) => not_found_or(error),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json,
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        category::{CategoryFormData, NewCategory, create_category},
        db::initialize,
        test_utils::parse_json_body,
    };

    use super::{
        CategoryApiState, create_category_json, delete_category_json, get_category_json,
        list_categories, update_category_json,
    };

    fn get_state() -> CategoryApiState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        CategoryApiState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn body(name: &str, color: &str) -> CategoryFormData {
        CategoryFormData {
            name: name.to_owned(),
            color: color.to_owned(),
            description: None,
        }
    }

    #[tokio::test]
    async fn create_returns_created_category() {
        let state = get_state();

        let response = create_category_json(State(state), Ok(Json(body("Rent", "#abc")))).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            parse_json_body(response).await,
            json!({"id": 1, "name": "Rent", "color": "#abc", "description": null})
        );
    }

    #[tokio::test]
    async fn create_rejects_invalid_color() {
        let state = get_state();

        let response = create_category_json(State(state), Ok(Json(body("Rent", "#abcd")))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = parse_json_body(response).await;
        assert!(json["error"].as_str().unwrap().contains("#abcd"));
    }

    #[tokio::test]
    async fn list_is_sorted_by_name() {
        let state = get_state();
        {
            let connection = state.db_connection.lock().unwrap();
            for name in ["Zoo", "Apples"] {
                create_category(NewCategory::new(name, "#fff", None).unwrap(), &connection)
                    .unwrap();
            }
        }

        let response = list_categories(State(state)).await;

        let json = parse_json_body(response).await;
        assert_eq!(json[0]["name"], "Apples");
        assert_eq!(json[1]["name"], "Zoo");
    }

    #[tokio::test]
    async fn missing_category_is_not_found() {
        let state = get_state();

        let get_response = get_category_json(Path(3), State(state.clone())).await;
        let update_response =
            update_category_json(Path(3), State(state.clone()), Ok(Json(body("Rent", "#fff")))).await;
        let delete_response = delete_category_json(Path(3), State(state)).await;

        for response in [get_response, update_response, delete_response] {
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            assert_eq!(
                parse_json_body(response).await,
                json!({"error": "Category not found"})
            );
        }
    }

    #[tokio::test]
    async fn update_and_delete_report_success() {
        let state = get_state();
        let category = create_category(
            NewCategory::new("Rent", "#fff", None).unwrap(),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let update_response = update_category_json(
            Path(category.id),
            State(state.clone()),
            Ok(Json(body("Housing", "#000"))),
        )
        .await;
        let delete_response = delete_category_json(Path(category.id), State(state)).await;

        for response in [update_response, delete_response] {
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(parse_json_body(response).await, json!({"success": true}));
        }
    }
}
