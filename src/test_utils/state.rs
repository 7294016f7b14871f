use std::marker::PhantomData;

use axum::extract::Path;
use axum_extra::extract::WithRejection;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    audit::{AuditEvent, AuditLog},
    category::{Category, CategoryId, CategoryName, create_category},
};

pub(crate) fn get_test_app_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");

    AppState::new(connection).expect("Could not initialize app state")
}

#[track_caller]
pub(crate) fn insert_test_category(state: &AppState, name: &str) -> Category {
    create_category(
        CategoryName::new_unchecked(name),
        None,
        &state.db_connection.lock().unwrap(),
    )
    .expect("Could not create test category")
}

/// The path extractor for `category_id`, as the category handlers receive it.
pub(crate) fn category_path(category_id: CategoryId) -> WithRejection<Path<CategoryId>, Error> {
    WithRejection(Path(category_id), PhantomData)
}

/// An audit log that always fails, for checking that requests succeed anyway.
pub(crate) struct FailingAuditLog;

impl AuditLog for FailingAuditLog {
    fn record(&self, _event: &AuditEvent) -> Result<(), Error> {
        Err(Error::DatabaseLockError)
    }
}
