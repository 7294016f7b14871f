//! Activity logging for changes made through the API.
//!
//! Recording an event is best-effort: handlers record events after their
//! primary change has been saved, and a failure to record is logged rather
//! than returned to the client.

mod db;
mod domain;

pub use db::{SQLiteAuditLog, create_activity_log_table, get_audit_events};
pub use domain::{AuditAction, AuditEntity, AuditEvent};

use crate::Error;

/// A destination for audit events.
pub trait AuditLog: Send + Sync {
    /// Record a single event.
    ///
    /// # Errors
    /// Returns an error if the event could not be saved.
    fn record(&self, event: &AuditEvent) -> Result<(), Error>;
}

/// Record `event` in `audit_log`, logging instead of returning any failure.
pub fn record_activity(audit_log: &dyn AuditLog, event: AuditEvent) {
    match audit_log.record(&event) {
        Ok(()) => tracing::debug!("Recorded activity: {}", event.description),
        Err(error) => tracing::error!(
            "Could not record activity \"{}\" for {} {}: {error}",
            event.action,
            event.entity,
            event.entity_id
        ),
    }
}

#[cfg(test)]
mod record_activity_tests {
    use std::sync::Mutex;

    use crate::{
        Error,
        audit::{AuditAction, AuditEntity, AuditEvent, AuditLog, record_activity},
        request_context::RequestContext,
    };

    struct FailingAuditLog;

    impl AuditLog for FailingAuditLog {
        fn record(&self, _event: &AuditEvent) -> Result<(), Error> {
            Err(Error::DatabaseLockError)
        }
    }

    #[derive(Default)]
    struct MemoryAuditLog {
        events: Mutex<Vec<AuditEvent>>,
    }

    impl AuditLog for MemoryAuditLog {
        fn record(&self, event: &AuditEvent) -> Result<(), Error> {
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    fn test_event() -> AuditEvent {
        AuditEvent::new(
            AuditAction::AddCategory,
            AuditEntity::Category,
            1,
            "Shoes",
            RequestContext::default(),
        )
    }

    #[test]
    fn records_event() {
        let audit_log = MemoryAuditLog::default();
        let event = test_event();

        record_activity(&audit_log, event.clone());

        assert_eq!(audit_log.events.lock().unwrap().as_slice(), &[event]);
    }

    #[test]
    fn swallows_failures() {
        record_activity(&FailingAuditLog, test_event());
    }
}
