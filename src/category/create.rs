//! Category creation endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error, JsonBody,
    audit::{AuditAction, AuditEntity, AuditEvent, AuditLog, record_activity},
    category::{
        Category, CategoryName, CreateCategoryData, create_category, normalize_description,
    },
    request_context::RequestContext,
};

const FAILURE_MESSAGE: &str = "Error creating category";

/// The state needed for creating a category.
#[derive(Clone)]
pub struct CreateCategoryEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub audit_log: Arc<dyn AuditLog>,
}

impl FromRef<AppState> for CreateCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            audit_log: state.audit_log.clone(),
        }
    }
}

/// Handle category creation. Responds with 201 and the new category.
///
/// A request without a body is treated as a category without a name.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryEndpointState>,
    context: RequestContext,
    JsonBody(new_category): JsonBody<CreateCategoryData>,
) -> Response {
    let category = match create_category_from_data(new_category, &state.db_connection) {
        Ok(category) => category,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    record_activity(
        state.audit_log.as_ref(),
        AuditEvent::new(
            AuditAction::AddCategory,
            AuditEntity::Category,
            category.id,
            category.name.as_ref(),
            context,
        ),
    );

    (StatusCode::CREATED, Json(category)).into_response()
}

fn create_category_from_data(
    new_category: CreateCategoryData,
    db_connection: &Mutex<Connection>,
) -> Result<Category, Error> {
    let name = CategoryName::new(new_category.name.as_deref().unwrap_or_default())?;
    let description = normalize_description(new_category.description.as_deref());

    let connection = db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    create_category(name, description, &connection)
}
