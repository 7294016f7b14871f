//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use crate::{
    AppState,
    category::{
        create_category_endpoint, delete_category_endpoint, get_category_endpoint,
        list_categories_endpoint, search_categories_endpoint, update_category_endpoint,
    },
    endpoints,
};

/// Return a router with all the app's routes.
///
/// Authentication is expected to happen in a layer in front of this router.
/// That layer may insert a [crate::UserID] into the request extensions to
/// attribute changes to a user.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::CATEGORIES,
            get(list_categories_endpoint).post(create_category_endpoint),
        )
        .route(
            endpoints::SEARCH_CATEGORIES,
            get(search_categories_endpoint),
        )
        .route(
            endpoints::CATEGORY,
            get(get_category_endpoint)
                .put(update_category_endpoint)
                .patch(update_category_endpoint)
                .delete(delete_category_endpoint),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": "Resource not found"})),
    )
        .into_response()
}
