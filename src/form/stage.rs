//! Wizard stages and their validators.
//!
//! Stages run strictly in order. Each stage owns one validator; adding a stage
//! means adding a variant, its position in `ORDER`, and a match arm in
//! `validate`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FieldErrors;
use crate::types::{Project, ProjectField, ProjectStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    BasicInfo,
    Implementation,
    Quality,
    Summary,
}

impl Stage {
    pub const ORDER: [Stage; 4] = [
        Stage::BasicInfo,
        Stage::Implementation,
        Stage::Quality,
        Stage::Summary,
    ];

    pub fn first() -> Self {
        Stage::BasicInfo
    }

    /// 0-based position in the wizard.
    pub fn index(&self) -> usize {
        match self {
            Stage::BasicInfo => 0,
            Stage::Implementation => 1,
            Stage::Quality => 2,
            Stage::Summary => 3,
        }
    }

    pub fn next(&self) -> Option<Stage> {
        Self::ORDER.get(self.index() + 1).copied()
    }

    pub fn previous(&self) -> Option<Stage> {
        self.index().checked_sub(1).map(|i| Self::ORDER[i])
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }

    pub fn title(&self) -> &'static str {
        match self {
            Stage::BasicInfo => "Basic information",
            Stage::Implementation => "Implementation",
            Stage::Quality => "Quality & assessment",
            Stage::Summary => "Summary",
        }
    }

    /// Validate the fields this stage owns. An empty map means the stage passes.
    pub fn validate(&self, draft: &Project) -> FieldErrors {
        match self {
            Stage::BasicInfo => validate_basic_info(draft),
            Stage::Implementation => validate_implementation(draft),
            Stage::Quality | Stage::Summary => FieldErrors::new(),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

fn require_text(errors: &mut FieldErrors, field: ProjectField, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field.name().to_string(), message.to_string());
    }
}

fn validate_basic_info(draft: &Project) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require_text(&mut errors, ProjectField::Name, &draft.name, "Project name is required");
    require_text(&mut errors, ProjectField::Client, &draft.client, "Client is required");
    require_text(
        &mut errors,
        ProjectField::SalesRep,
        &draft.sales_rep,
        "Sales owner is required",
    );
    if draft.value_signed == 0 {
        errors.insert(
            ProjectField::ValueSigned.name().to_string(),
            "Contract value must be greater than 0".to_string(),
        );
    }
    errors
}

fn validate_implementation(draft: &Project) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require_text(
        &mut errors,
        ProjectField::ImplRep,
        &draft.impl_rep,
        "Implementation owner is required",
    );
    if draft.kickoff_date.is_none() {
        errors.insert(
            ProjectField::KickoffDate.name().to_string(),
            "Kickoff date is required".to_string(),
        );
    }
    match (draft.kickoff_date, draft.deadline) {
        (_, None) => {
            errors.insert(
                ProjectField::Deadline.name().to_string(),
                "Deadline is required".to_string(),
            );
        }
        (Some(kickoff), Some(deadline)) if deadline < kickoff => {
            errors.insert(
                ProjectField::Deadline.name().to_string(),
                "Deadline must be on or after the kickoff date".to_string(),
            );
        }
        _ => {}
    }
    if draft.status == ProjectStatus::Completed && draft.completion_date.is_none() {
        errors.insert(
            ProjectField::CompletionDate.name().to_string(),
            "Completion date is required for completed projects".to_string(),
        );
    }
    errors
}
