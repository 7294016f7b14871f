//! Category management for an e-commerce backend.
//!
//! This library provides a JSON REST API for creating, listing, searching,
//! updating and deleting product categories. Every change to a category is
//! recorded in an activity log, and listing categories reports how many
//! products reference each one.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use tokio::signal;

mod app_state;
pub mod audit;
pub mod category;
mod db;
pub mod endpoints;
mod json_body;
mod logging;
pub mod product;
mod request_context;
mod routing;
#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use json_body::JsonBody;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use request_context::{RequestContext, UserID};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used as a category name.
    #[error("Category name is required")]
    EmptyCategoryName,

    /// A search was requested without a search term.
    #[error("Search query is required")]
    EmptySearchQuery,

    /// The category name is already used by another category.
    ///
    /// Category names are unique and compared case-sensitively, so "Shoes"
    /// and "shoes" may coexist.
    #[error("Category already exists")]
    DuplicateCategoryName,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("Category not found")]
    NotFound,

    /// Tried to update a category that does not exist
    #[error("Category not found")]
    UpdateMissingCategory,

    /// Tried to delete a category that does not exist
    #[error("Category not found")]
    DeleteMissingCategory,

    /// The request could not be read, e.g. a malformed JSON body or a
    /// category ID that is not an integer.
    #[error("{0}")]
    InvalidRequest(String),

    /// Listing categories found none in the database.
    #[error("No categories found")]
    NoCategories,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("category.name") =>
            {
                Error::DuplicateCategoryName
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

/// The JSON body sent to the client when a request fails.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Error {
    /// The HTTP status code that the error translates to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::EmptyCategoryName
            | Error::EmptySearchQuery
            | Error::DuplicateCategoryName
            | Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound
            | Error::UpdateMissingCategory
            | Error::DeleteMissingCategory
            | Error::NoCategories => StatusCode::NOT_FOUND,
            Error::SqlError(_) | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert the error into a JSON response.
    ///
    /// Client errors (4xx) are reported with the error's own message.
    /// Anything else is an internal error: the response carries
    /// `failure_message` (e.g. "Error creating category") and the error text.
    fn into_json_response(self, failure_message: &str) -> Response {
        let status = self.status_code();

        let body = if status.is_client_error() {
            ErrorBody {
                message: self.to_string(),
                error: None,
            }
        } else {
            tracing::error!("{failure_message}: {self}");

            ErrorBody {
                message: failure_message.to_owned(),
                error: Some(self.to_string()),
            }
        };

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        self.into_json_response("Error processing request")
    }
}
