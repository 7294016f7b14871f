//! Category search endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{Category, SearchQuery, search_categories},
};

const FAILURE_MESSAGE: &str = "Error searching category";

/// The state needed for searching categories.
#[derive(Debug, Clone)]
pub struct SearchCategoriesEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SearchCategoriesEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Respond with the categories whose name or description contains the
/// `query` parameter, ignoring case.
///
/// Responds with 400 if `query` is missing or blank.
pub async fn search_categories_endpoint(
    State(state): State<SearchCategoriesEndpointState>,
    WithRejection(Query(search), _): WithRejection<Query<SearchQuery>, Error>,
) -> Response {
    match find_categories(search, &state.db_connection) {
        Ok(categories) => Json(categories).into_response(),
        Err(error) => error.into_json_response(FAILURE_MESSAGE),
    }
}

fn find_categories(
    search: SearchQuery,
    db_connection: &Mutex<Connection>,
) -> Result<Vec<Category>, Error> {
    let query = search
        .query
        .as_deref()
        .map(str::trim)
        .filter(|query| !query.is_empty())
        .ok_or(Error::EmptySearchQuery)?;

    let connection = db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    search_categories(query, &connection)
}

#[cfg(test)]
mod search_categories_endpoint_tests {
    use std::marker::PhantomData;

    use axum::{
        extract::{FromRef, Query, State},
        http::StatusCode,
    };
    use axum_extra::extract::WithRejection;
    use serde_json::json;

    use crate::{
        AppState,
        category::{SearchQuery, search_categories_endpoint},
        test_utils::{get_test_app_state, insert_test_category, parse_json_body},
    };

    use super::SearchCategoriesEndpointState;

    async fn search(app_state: &AppState, query: Option<&str>) -> axum::response::Response {
        search_categories_endpoint(
            State(SearchCategoriesEndpointState::from_ref(app_state)),
            WithRejection(
                Query(SearchQuery {
                    query: query.map(str::to_owned),
                }),
                PhantomData,
            ),
        )
        .await
    }

    #[tokio::test]
    async fn search_returns_matching_categories() {
        let app_state = get_test_app_state();
        let footwear = insert_test_category(&app_state, "Footwear");
        insert_test_category(&app_state, "Hats");

        let response = search(&app_state, Some("WEAR")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = parse_json_body(response).await;
        assert_eq!(body, json!([serde_json::to_value(&footwear).unwrap()]));
    }

    #[tokio::test]
    async fn search_without_match_returns_empty_array() {
        let app_state = get_test_app_state();
        insert_test_category(&app_state, "Hats");

        let response = search(&app_state, Some("wear")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = parse_json_body(response).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn search_without_query_returns_bad_request() {
        let app_state = get_test_app_state();

        for query in [None, Some(""), Some("   ")] {
            let response = search(&app_state, query).await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = parse_json_body(response).await;
            assert_eq!(body, json!({"message": "Search query is required"}));
        }
    }
}
