//! Audit trail for project changes.
//!
//! Entries are append-only. Saves produce one `Update` entry per changed field
//! (or a single `Create` entry); the admin log screen filters them with
//! `AuditQuery`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::form::FieldChange;
use crate::types::{AuditAction, AuditLogEntry, Project, UserRole};
use crate::util::contains_ci;

/// Target type recorded for project entries.
pub const TARGET_PROJECT: &str = "Project";

/// Who performed an audited action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: String,
    pub name: String,
    pub role: UserRole,
}

impl Actor {
    pub fn new(name: impl Into<String>, role: UserRole) -> Self {
        let name = name.into();
        Self {
            id: format!("u-{}", name.to_lowercase().replace(' ', "-")),
            name,
            role,
        }
    }
}

fn new_entry_id() -> String {
    format!("audit-{}", Uuid::new_v4())
}

/// One `Update` entry per changed field of `project_id`.
pub fn audit_entries_for_changes(
    actor: &Actor,
    project_id: &str,
    changes: &[FieldChange],
    timestamp: DateTime<Utc>,
) -> Vec<AuditLogEntry> {
    changes
        .iter()
        .map(|change| AuditLogEntry {
            id: new_entry_id(),
            timestamp,
            user_id: actor.id.clone(),
            user_name: actor.name.clone(),
            user_role: actor.role,
            action: AuditAction::Update,
            target_type: TARGET_PROJECT.to_string(),
            target_id: project_id.to_string(),
            description: format!("Updated {} on project {}", change.field, project_id),
            old_value: Some(change.old.to_string()),
            new_value: Some(change.new.to_string()),
        })
        .collect()
}

pub fn audit_entry_for_create(
    actor: &Actor,
    project: &Project,
    timestamp: DateTime<Utc>,
) -> AuditLogEntry {
    AuditLogEntry {
        id: new_entry_id(),
        timestamp,
        user_id: actor.id.clone(),
        user_name: actor.name.clone(),
        user_role: actor.role,
        action: AuditAction::Create,
        target_type: TARGET_PROJECT.to_string(),
        target_id: project.id.clone(),
        description: format!("Created project {}", project.name),
        old_value: None,
        new_value: None,
    }
}

// =============================================================================
// Log filtering
// =============================================================================

/// Criteria for the audit log screen. All set criteria must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditQuery {
    /// Case-insensitive substring of description, user name or target id.
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub action: Option<AuditAction>,
    #[serde(default)]
    pub role: Option<UserRole>,
}

impl AuditQuery {
    pub fn matches(&self, entry: &AuditLogEntry) -> bool {
        let matches_search = contains_ci(&entry.description, &self.search)
            || contains_ci(&entry.user_name, &self.search)
            || contains_ci(&entry.target_id, &self.search);
        let matches_action = self.action.map_or(true, |a| entry.action == a);
        let matches_role = self.role.map_or(true, |r| entry.user_role == r);
        matches_search && matches_action && matches_role
    }

    pub fn filter<'a>(&self, entries: &'a [AuditLogEntry]) -> Vec<&'a AuditLogEntry> {
        entries.iter().filter(|e| self.matches(e)).collect()
    }
}
