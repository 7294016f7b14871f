//! Category deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    AppState, Error,
    audit::{AuditAction, AuditEntity, AuditEvent, AuditLog, record_activity},
    category::{CategoryId, delete_category},
    request_context::RequestContext,
};

const FAILURE_MESSAGE: &str = "Error deleting category";

/// The state needed for deleting a category.
#[derive(Clone)]
pub struct DeleteCategoryEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub audit_log: Arc<dyn AuditLog>,
}

impl FromRef<AppState> for DeleteCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            audit_log: state.audit_log.clone(),
        }
    }
}

/// The body of a successful response that has nothing else to return.
#[derive(Debug, Serialize)]
pub struct SuccessMessage {
    pub message: String,
}

/// Handle category deletion. Responds with a confirmation message.
pub async fn delete_category_endpoint(
    WithRejection(Path(category_id), _): WithRejection<Path<CategoryId>, Error>,
    State(state): State<DeleteCategoryEndpointState>,
    context: RequestContext,
) -> Response {
    let deleted = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_json_response(FAILURE_MESSAGE);
            }
        };

        delete_category(category_id, &connection)
    };

    match deleted {
        Ok(category) => {
            record_activity(
                state.audit_log.as_ref(),
                AuditEvent::new(
                    AuditAction::DeleteCategory,
                    AuditEntity::Category,
                    category.id,
                    category.name.as_ref(),
                    context,
                ),
            );

            Json(SuccessMessage {
                message: "Category deleted successfully".to_owned(),
            })
            .into_response()
        }
        Err(error) => error.into_json_response(FAILURE_MESSAGE),
    }
}
