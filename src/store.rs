//! Save hand-off.
//!
//! The form engine performs no I/O; a confirmed submit hands a `SaveRequest`
//! to a `ProjectSink`. `NoopSink` only logs. `InMemoryStore` keeps projects and
//! their audit trail in memory.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::audit::{audit_entries_for_changes, audit_entry_for_create, Actor};
use crate::error::DashboardError;
use crate::form::FieldChange;
use crate::types::{AuditLogEntry, Project};

/// What a confirmed submit hands over.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    /// Id of the record being edited; `None` when creating.
    pub original_id: Option<String>,
    pub project: Project,
    /// Changed fields, empty when creating.
    pub changes: Vec<FieldChange>,
}

impl SaveRequest {
    pub fn is_create(&self) -> bool {
        self.original_id.is_none()
    }
}

/// Persistence collaborator for the form engine.
pub trait ProjectSink {
    /// Persist the request. Returns the saved project's id.
    fn save(&mut self, request: SaveRequest) -> Result<String, DashboardError>;
}

/// Accepts every save and keeps nothing.
#[derive(Debug, Default)]
pub struct NoopSink {
    pub saves: usize,
}

impl ProjectSink for NoopSink {
    fn save(&mut self, request: SaveRequest) -> Result<String, DashboardError> {
        self.saves += 1;
        log::info!(
            "Saving project {} ({} changes, discarded)",
            request.project.name,
            request.changes.len()
        );
        Ok(request.original_id.unwrap_or(request.project.id))
    }
}

/// Projects and audit entries held in memory.
pub struct InMemoryStore {
    projects: Vec<Project>,
    audit_log: Vec<AuditLogEntry>,
    actor: Actor,
    clock: fn() -> DateTime<Utc>,
}

impl InMemoryStore {
    pub fn new(projects: Vec<Project>, actor: Actor) -> Self {
        Self {
            projects,
            audit_log: Vec::new(),
            actor,
            clock: Utc::now,
        }
    }

    /// Replace the timestamp source for audit entries.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_audit_log(mut self, entries: Vec<AuditLogEntry>) -> Self {
        self.audit_log = entries;
        self
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Newest first.
    pub fn audit_log(&self) -> &[AuditLogEntry] {
        &self.audit_log
    }

    fn next_id(&self) -> String {
        let mut n = self.projects.len() + 1;
        loop {
            let id = format!("PRJ-{:03}", n);
            if self.get(&id).is_none() {
                return id;
            }
            n += 1;
        }
    }

    fn record(&mut self, entries: Vec<AuditLogEntry>) {
        // Newest first, in the order the changes were listed.
        self.audit_log.splice(0..0, entries);
    }
}

impl ProjectSink for InMemoryStore {
    fn save(&mut self, request: SaveRequest) -> Result<String, DashboardError> {
        let now = (self.clock)();
        let SaveRequest {
            original_id,
            mut project,
            changes,
        } = request;

        match original_id {
            None => {
                if project.id.is_empty() {
                    project.id = self.next_id();
                }
                if self.get(&project.id).is_some() {
                    return Err(DashboardError::SaveFailed(format!(
                        "project {} already exists",
                        project.id
                    )));
                }
                let entry = audit_entry_for_create(&self.actor, &project, now);
                let id = project.id.clone();
                log::info!("Created project {} ({})", id, project.name);
                self.projects.push(project);
                self.record(vec![entry]);
                Ok(id)
            }
            Some(id) => {
                let slot = self
                    .projects
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| DashboardError::SaveFailed(format!("unknown project {}", id)))?;
                project.id = id.clone();
                *slot = project;
                let entries = audit_entries_for_changes(&self.actor, &id, &changes, now);
                log::info!("Updated project {} ({} fields)", id, entries.len());
                self.record(entries);
                Ok(id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::diff;
    use crate::test_utils::sample_project;
    use crate::types::{AuditAction, UserRole};
    use chrono::TimeZone;

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 20, 8, 0, 0).unwrap()
    }

    fn store() -> InMemoryStore {
        InMemoryStore::new(
            vec![sample_project("PRJ-001"), sample_project("PRJ-002")],
            Actor::new("Manager", UserRole::Manager),
        )
        .with_clock(fixed_clock)
    }

    #[test]
    fn test_create_assigns_id_and_audits() {
        let mut store = store();
        let mut project = sample_project("");
        project.name = "New CRM".to_string();

        let id = store
            .save(SaveRequest {
                original_id: None,
                project,
                changes: Vec::new(),
            })
            .unwrap();
        assert_eq!(id, "PRJ-003");
        assert_eq!(store.projects().len(), 3);
        assert_eq!(store.audit_log().len(), 1);
        assert_eq!(store.audit_log()[0].action, AuditAction::Create);
        assert_eq!(store.audit_log()[0].timestamp, fixed_clock());
    }

    #[test]
    fn test_create_rejects_duplicate_id() {
        let mut store = store();
        let err = store
            .save(SaveRequest {
                original_id: None,
                project: sample_project("PRJ-001"),
                changes: Vec::new(),
            })
            .unwrap_err();
        assert!(matches!(err, DashboardError::SaveFailed(_)));
    }

    #[test]
    fn test_update_replaces_and_audits_each_change() {
        let mut store = store();
        let original = store.get("PRJ-002").unwrap().clone();
        let mut draft = original.clone();
        draft.name = "Renamed".to_string();
        draft.manager_rating = 3;

        store
            .save(SaveRequest {
                original_id: Some("PRJ-002".to_string()),
                changes: diff(&original, &draft),
                project: draft,
            })
            .unwrap();
        assert_eq!(store.get("PRJ-002").unwrap().name, "Renamed");
        assert_eq!(store.audit_log().len(), 2);
        assert!(store.audit_log().iter().all(|e| e.target_id == "PRJ-002"));
    }

    #[test]
    fn test_update_unknown_project_fails() {
        let mut store = store();
        let result = store.save(SaveRequest {
            original_id: Some("missing".to_string()),
            project: sample_project("missing"),
            changes: Vec::new(),
        });
        assert!(matches!(result, Err(DashboardError::SaveFailed(_))));
    }

    #[test]
    fn test_noop_sink_counts() {
        let mut sink = NoopSink::default();
        let id = sink
            .save(SaveRequest {
                original_id: Some("x".to_string()),
                project: sample_project("x"),
                changes: Vec::new(),
            })
            .unwrap();
        assert_eq!(id, "x");
        assert_eq!(sink.saves, 1);
    }
}
