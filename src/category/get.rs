//! Single category lookup endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{CategoryId, get_category},
};

const FAILURE_MESSAGE: &str = "Error getting category";

/// The state needed for getting a category.
#[derive(Debug, Clone)]
pub struct GetCategoryEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for GetCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Respond with the category with the ID `category_id`.
pub async fn get_category_endpoint(
    WithRejection(Path(category_id), _): WithRejection<Path<CategoryId>, Error>,
    State(state): State<GetCategoryEndpointState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response(FAILURE_MESSAGE);
        }
    };

    match get_category(category_id, &connection) {
        Ok(category) => Json(category).into_response(),
        Err(error) => error.into_json_response(FAILURE_MESSAGE),
    }
}
