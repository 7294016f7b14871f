//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    audit::{AuditLog, SQLiteAuditLog},
    db::initialize,
};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,

    /// Where activity events (e.g., "Add Category") are recorded.
    pub audit_log: Arc<dyn AuditLog>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// Activity events are written to the same database.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));
        let audit_log = Arc::new(SQLiteAuditLog::new(connection.clone()));

        Ok(Self {
            db_connection: connection,
            audit_log,
        })
    }

    /// Replace the audit log, e.g. to send activity events somewhere other
    /// than the application database.
    pub fn with_audit_log(mut self, audit_log: Arc<dyn AuditLog>) -> Self {
        self.audit_log = audit_log;
        self
    }
}
