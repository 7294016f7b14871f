//! Audit event types.

use std::fmt::Display;

use time::OffsetDateTime;

use crate::{
    db::current_timestamp,
    request_context::{RequestContext, UserID},
};

/// What was done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    AddCategory,
    UpdateCategory,
    DeleteCategory,
}

impl AuditAction {
    /// The action as it is stored in the activity log, e.g. "Add Category".
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::AddCategory => "Add Category",
            AuditAction::UpdateCategory => "Update Category",
            AuditAction::DeleteCategory => "Delete Category",
        }
    }

    /// Parse an action stored in the activity log.
    pub fn parse(action: &str) -> Option<Self> {
        [
            AuditAction::AddCategory,
            AuditAction::UpdateCategory,
            AuditAction::DeleteCategory,
        ]
        .into_iter()
        .find(|candidate| candidate.as_str() == action)
    }

    fn past_tense(&self) -> &'static str {
        match self {
            AuditAction::AddCategory => "added",
            AuditAction::UpdateCategory => "updated",
            AuditAction::DeleteCategory => "deleted",
        }
    }
}

impl Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of record an action was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditEntity {
    Category,
}

impl AuditEntity {
    /// The entity type as it is stored in the activity log.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEntity::Category => "category",
        }
    }

    /// Parse an entity type stored in the activity log.
    pub fn parse(entity: &str) -> Option<Self> {
        match entity {
            "category" => Some(AuditEntity::Category),
            _ => None,
        }
    }
}

impl Display for AuditEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single recorded action: who did what to which record, and from where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub description: String,
    pub entity: AuditEntity,
    pub entity_id: i64,
    pub user_id: Option<UserID>,
    pub ip_address: Option<String>,
    pub created_at: OffsetDateTime,
}

impl AuditEvent {
    /// Create an event for `action` on the record `entity_id`, timestamped now.
    ///
    /// `entity_name` is used in the description, e.g. `Category "Shoes" was added`.
    pub fn new(
        action: AuditAction,
        entity: AuditEntity,
        entity_id: i64,
        entity_name: &str,
        context: RequestContext,
    ) -> Self {
        let description = format!(
            "{} \"{entity_name}\" was {}",
            capitalize(entity.as_str()),
            action.past_tense()
        );

        Self {
            action,
            description,
            entity,
            entity_id,
            user_id: context.user_id,
            ip_address: context.ip_address.map(|address| address.to_string()),
            created_at: current_timestamp(),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
