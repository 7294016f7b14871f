//! Category listing endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{CategoryWithCount, get_all_categories},
    product::count_products_per_category,
};

const FAILURE_MESSAGE: &str = "Error getting categories";

/// The state needed for listing categories.
#[derive(Debug, Clone)]
pub struct ListCategoriesEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListCategoriesEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Respond with every category and the number of products in each.
///
/// Responds with 404 if there are no categories.
pub async fn list_categories_endpoint(
    State(state): State<ListCategoriesEndpointState>,
) -> Response {
    match get_categories_with_counts(&state.db_connection) {
        Ok(categories) => Json(categories).into_response(),
        Err(error) => error.into_json_response(FAILURE_MESSAGE),
    }
}

fn get_categories_with_counts(
    db_connection: &Mutex<Connection>,
) -> Result<Vec<CategoryWithCount>, Error> {
    let connection = db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    if categories.is_empty() {
        return Err(Error::NoCategories);
    }

    let products_per_category = count_products_per_category(&connection).inspect_err(|error| {
        tracing::error!("Could not count products per category: {error}")
    })?;

    let categories_with_counts = categories
        .into_iter()
        .map(|category| CategoryWithCount {
            product_count: *products_per_category.get(&category.id).unwrap_or(&0),
            category,
        })
        .collect();

    Ok(categories_with_counts)
}
