//! Storing audit events in the application database.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, types::Type};

use crate::{
    Error,
    audit::{AuditAction, AuditEntity, AuditEvent, AuditLog},
    request_context::UserID,
};

/// An [AuditLog] that writes events to the `activity_log` table.
#[derive(Debug, Clone)]
pub struct SQLiteAuditLog {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteAuditLog {
    /// Create an audit log that writes to the database behind `connection`.
    ///
    /// The `activity_log` table must already exist, see [create_activity_log_table].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl AuditLog for SQLiteAuditLog {
    fn record(&self, event: &AuditEvent) -> Result<(), Error> {
        let connection = self
            .connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        insert_audit_event(event, &connection)
    }
}

fn insert_audit_event(event: &AuditEvent, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO activity_log (action, description, entity, entity_id, user_id, ip_address, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
        (
            event.action.as_str(),
            &event.description,
            event.entity.as_str(),
            event.entity_id,
            event.user_id.map(|user_id| user_id.as_i64()),
            &event.ip_address,
            event.created_at,
        ),
    )?;

    Ok(())
}

/// Retrieve all recorded events, oldest first.
pub fn get_audit_events(connection: &Connection) -> Result<Vec<AuditEvent>, Error> {
    connection
        .prepare(
            "SELECT action, description, entity, entity_id, user_id, ip_address, created_at
            FROM activity_log ORDER BY id ASC;",
        )?
        .query_map([], map_row)?
        .map(|maybe_event| maybe_event.map_err(|error| error.into()))
        .collect()
}

/// Initialize the activity log table.
pub fn create_activity_log_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS activity_log (
            id INTEGER PRIMARY KEY,
            action TEXT NOT NULL,
            description TEXT NOT NULL,
            entity TEXT NOT NULL,
            entity_id INTEGER NOT NULL,
            user_id INTEGER,
            ip_address TEXT,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_activity_log_entity ON activity_log(entity, entity_id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<AuditEvent, rusqlite::Error> {
    let raw_action: String = row.get(0)?;
    let action = AuditAction::parse(&raw_action).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            Type::Text,
            format!("unknown audit action \"{raw_action}\"").into(),
        )
    })?;
    let raw_entity: String = row.get(2)?;
    let entity = AuditEntity::parse(&raw_entity).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            Type::Text,
            format!("unknown audit entity \"{raw_entity}\"").into(),
        )
    })?;
    let user_id: Option<i64> = row.get(4)?;

    Ok(AuditEvent {
        action,
        description: row.get(1)?,
        entity,
        entity_id: row.get(3)?,
        user_id: user_id.map(UserID::new),
        ip_address: row.get(5)?,
        created_at: row.get(6)?,
    })
}
