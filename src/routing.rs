//! Application router configuration for the HTML pages, the HTMX form
//! endpoints and the JSON API.

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
    response::Redirect,
    routing::{get, put},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    AppState,
    budget::{
        create_budget_endpoint, create_budget_json, delete_budget_endpoint, delete_budget_json,
        get_budget_json, get_budgets_page, get_edit_budget_page, get_new_budget_page,
        list_budgets, update_budget_endpoint, update_budget_json,
    },
    category::{
        create_category_endpoint, create_category_json, delete_category_endpoint,
        delete_category_json, get_categories_page, get_category_json, get_edit_category_page,
        get_new_category_page, list_categories, update_category_endpoint, update_category_json,
    },
    dashboard::{get_dashboard_json, get_dashboard_page},
    endpoints,
    internal_server_error::get_internal_server_error_page,
    logging::logging_middleware,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, create_transaction_json, delete_transaction_endpoint,
        delete_transaction_json, get_edit_transaction_page, get_new_transaction_page,
        get_transaction_json, get_transactions_page, list_transactions,
        update_transaction_endpoint, update_transaction_json,
    },
};

/// Return a router with all the app's routes.
///
/// Every request is traced and logged, and static files are served from
/// the `static/` directory.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::NEW_TRANSACTION_VIEW, get(get_new_transaction_page))
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page),
        )
        .route(endpoints::NEW_CATEGORY_VIEW, get(get_new_category_page))
        .route(endpoints::EDIT_CATEGORY_VIEW, get(get_edit_category_page))
        .route(endpoints::NEW_BUDGET_VIEW, get(get_new_budget_page))
        .route(endpoints::EDIT_BUDGET_VIEW, get(get_edit_budget_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    // The list pages share their path with the form endpoints that create records.
    let form_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS_VIEW,
            get(get_transactions_page).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            put(update_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::CATEGORIES_VIEW,
            get(get_categories_page).post(create_category_endpoint),
        )
        .route(
            endpoints::CATEGORY,
            put(update_category_endpoint).delete(delete_category_endpoint),
        )
        .route(
            endpoints::BUDGETS_VIEW,
            get(get_budgets_page).post(create_budget_endpoint),
        )
        .route(
            endpoints::BUDGET,
            put(update_budget_endpoint).delete(delete_budget_endpoint),
        );

    let api_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            get(list_transactions).post(create_transaction_json),
        )
        .route(
            endpoints::TRANSACTION_API,
            get(get_transaction_json)
                .put(update_transaction_json)
                .delete(delete_transaction_json),
        )
        .route(
            endpoints::CATEGORIES_API,
            get(list_categories).post(create_category_json),
        )
        .route(
            endpoints::CATEGORY_API,
            get(get_category_json)
                .put(update_category_json)
                .delete(delete_category_json),
        )
        .route(
            endpoints::BUDGETS_API,
            get(list_budgets).post(create_budget_json),
        )
        .route(
            endpoints::BUDGET_API,
            get(get_budget_json)
                .put(update_budget_json)
                .delete(delete_budget_json),
        )
        .route(endpoints::DASHBOARD_API, get(get_dashboard_json));

    let router = page_routes
        .merge(form_routes)
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware));

    add_tracing_layer(router)
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
