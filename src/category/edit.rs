//! Category update endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use rusqlite::Connection;

use crate::{
    AppState, Error, JsonBody,
    audit::{AuditAction, AuditEntity, AuditEvent, AuditLog, record_activity},
    category::{
        Category, CategoryId, CategoryName, CategoryUpdate, UpdateCategoryData,
        normalize_description, update_category,
    },
    request_context::RequestContext,
};

const FAILURE_MESSAGE: &str = "Error updating category";

/// The state needed for updating a category.
#[derive(Clone)]
pub struct UpdateCategoryEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub audit_log: Arc<dyn AuditLog>,
}

impl FromRef<AppState> for UpdateCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            audit_log: state.audit_log.clone(),
        }
    }
}

/// Handle a partial category update. Responds with the updated category.
///
/// Fields missing from the request body are left unchanged. An empty
/// description clears the category's description.
pub async fn update_category_endpoint(
    WithRejection(Path(category_id), _): WithRejection<Path<CategoryId>, Error>,
    State(state): State<UpdateCategoryEndpointState>,
    context: RequestContext,
    JsonBody(form_data): JsonBody<UpdateCategoryData>,
) -> Response {
    let category = match apply_update(category_id, form_data, &state.db_connection) {
        Ok(category) => category,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    record_activity(
        state.audit_log.as_ref(),
        AuditEvent::new(
            AuditAction::UpdateCategory,
            AuditEntity::Category,
            category.id,
            category.name.as_ref(),
            context,
        ),
    );

    Json(category).into_response()
}

fn apply_update(
    category_id: CategoryId,
    form_data: UpdateCategoryData,
    db_connection: &Mutex<Connection>,
) -> Result<Category, Error> {
    let update = CategoryUpdate {
        name: form_data
            .name
            .as_deref()
            .map(CategoryName::new)
            .transpose()?,
        description: form_data
            .description
            .as_deref()
            .map(|description| normalize_description(Some(description))),
    };

    let connection = db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    update_category(category_id, update, &connection)
}
