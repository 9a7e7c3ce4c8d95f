//! Error types for the dashboard core
//!
//! Nothing here performs fallible I/O except config loading, so errors split
//! into three groups:
//! - Notices: blocking no-op conditions ("nothing to save", comparison limits)
//! - User-correctable: field validation, locked fields, illegal navigation
//! - Environment: config and I/O failures, collaborator save failures

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

/// Field name -> message, in field-name order.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum DashboardError {
    // Notices
    #[error("No changes to save")]
    NothingToSave,

    #[error("Select at least {min} projects to compare")]
    ComparisonTooFew { min: usize },

    #[error("At most {limit} projects can be compared at once")]
    ComparisonLimitReached { limit: usize },

    // User-correctable
    #[error("Validation failed: {}", format_field_errors(.0))]
    Validation(FieldErrors),

    #[error("Field {0} cannot be changed after the project is created")]
    FieldLocked(String),

    #[error("Field {field} expects a {expected} value")]
    FieldType { field: String, expected: &'static str },

    #[error("Cannot move to step {target} from step {current}")]
    StepUnavailable { current: String, target: String },

    // Environment
    #[error("Config file not found at {0}")]
    ConfigNotFound(PathBuf),

    #[error("Failed to parse config: {0}")]
    ConfigParse(String),

    #[error("Could not find home directory")]
    NoHomeDir,

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Save failed: {0}")]
    SaveFailed(String),
}

fn format_field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, msg)| format!("{}: {}", field, msg))
        .collect::<Vec<_>>()
        .join("; ")
}

impl DashboardError {
    /// Returns true for blocking notices that are not failures.
    pub fn is_notice(&self) -> bool {
        matches!(
            self,
            DashboardError::NothingToSave
                | DashboardError::ComparisonTooFew { .. }
                | DashboardError::ComparisonLimitReached { .. }
        )
    }

    /// Returns true if the user can fix this by editing input
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            DashboardError::Validation(_)
                | DashboardError::FieldLocked(_)
                | DashboardError::FieldType { .. }
                | DashboardError::StepUnavailable { .. }
        )
    }

    /// Field-keyed errors, empty for every other kind.
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            DashboardError::Validation(errors) => errors.clone(),
            DashboardError::FieldLocked(field) => {
                FieldErrors::from([(field.clone(), "locked".to_string())])
            }
            DashboardError::FieldType { field, expected } => {
                FieldErrors::from([(field.clone(), format!("expects {}", expected))])
            }
            _ => FieldErrors::new(),
        }
    }

    /// Get a user-friendly recovery suggestion
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DashboardError::NothingToSave => "Edit at least one field before saving.",
            DashboardError::ComparisonTooFew { .. } => "Select more projects to compare.",
            DashboardError::ComparisonLimitReached { .. } => {
                "Deselect a project before adding another."
            }
            DashboardError::Validation(_) => "Fix the highlighted fields and try again.",
            DashboardError::FieldLocked(_) => "Create a new project to use a different sign date.",
            DashboardError::FieldType { .. } => "Enter a value of the expected type.",
            DashboardError::StepUnavailable { .. } => "Complete the current step first.",
            DashboardError::ConfigNotFound(_) => {
                "Create ~/.projdash/config.json, for example with {}"
            }
            DashboardError::ConfigParse(_) => "Check the config file is valid JSON.",
            DashboardError::NoHomeDir => "Pass an explicit config path.",
            DashboardError::IoError(_) => "Check file permissions.",
            DashboardError::SaveFailed(_) => "Try saving again.",
        }
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        DashboardError::IoError(err.to_string())
    }
}

/// Serializable error representation for presentation consumers
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    pub field_errors: FieldErrors,
    pub recovery_suggestion: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeKind {
    Blocking,
    Correctable,
    Failure,
}

impl From<&DashboardError> for Notice {
    fn from(err: &DashboardError) -> Self {
        let kind = if err.is_notice() {
            NoticeKind::Blocking
        } else if err.is_user_correctable() {
            NoticeKind::Correctable
        } else {
            NoticeKind::Failure
        };

        Notice {
            message: err.to_string(),
            kind,
            field_errors: err.field_errors(),
            recovery_suggestion: err.recovery_suggestion().to_string(),
        }
    }
}
