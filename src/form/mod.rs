//! Create/edit project wizard.
//!
//! Holds a draft record and walks it through the ordered `Stage`s. Forward
//! moves are gated by the current stage's validator; backward moves and jumps
//! to earlier stages are free. In edit mode the draft is diffed against the
//! original and a non-empty change list must be confirmed before the save
//! hand-off.

pub mod diff;
pub mod stage;
pub mod summary;

pub use diff::{diff, field_changed, FieldChange};
pub use stage::Stage;
pub use summary::{summarize, FormSummary};

use chrono::{Datelike, NaiveDate};

use crate::error::{DashboardError, FieldErrors};
use crate::store::{ProjectSink, SaveRequest};
use crate::types::{
    FieldValue, IssueKind, IssueLog, Project, ProjectField, ProjectStatus, ProjectType, RiskLevel,
};

/// Fields fixed once a project exists.
pub const LOCKED_IN_EDIT: [ProjectField; 2] = [ProjectField::SignYear, ProjectField::SignMonth];

#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Edit { original: Project },
}

/// Result of pressing save.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Handed to the sink; carries the saved id.
    Saved(String),
    /// Edit mode: these changes must be confirmed with `confirm`.
    NeedsConfirmation(Vec<FieldChange>),
}

#[derive(Debug, Clone)]
pub struct ProjectForm {
    mode: FormMode,
    draft: Project,
    stage: Stage,
    errors: FieldErrors,
    awaiting_confirmation: bool,
}

/// Draft for a new project signed on `today`.
pub fn blank_project(today: NaiveDate) -> Project {
    Project {
        id: String::new(),
        name: String::new(),
        client: String::new(),
        sales_rep: String::new(),
        impl_rep: String::new(),
        sign_year: today.year(),
        sign_month: today.month(),
        kickoff_date: None,
        deadline: None,
        completion_date: None,
        value_signed: 0,
        revenue_recognized: 0,
        status: ProjectStatus::NotStarted,
        risk_level: RiskLevel::Low,
        project_type: Some(ProjectType::New),
        issues: IssueLog::new(),
        days_late: 0,
        manager_note: String::new(),
        manager_rating: 5,
    }
}

impl ProjectForm {
    pub fn create(today: NaiveDate) -> Self {
        Self {
            mode: FormMode::Create,
            draft: blank_project(today),
            stage: Stage::first(),
            errors: FieldErrors::new(),
            awaiting_confirmation: false,
        }
    }

    pub fn edit(original: Project) -> Self {
        Self {
            draft: original.clone(),
            mode: FormMode::Edit { original },
            stage: Stage::first(),
            errors: FieldErrors::new(),
            awaiting_confirmation: false,
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    pub fn original(&self) -> Option<&Project> {
        match &self.mode {
            FormMode::Create => None,
            FormMode::Edit { original } => Some(original),
        }
    }

    pub fn draft(&self) -> &Project {
        &self.draft
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Errors from the last failed validation, minus fields edited since.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_awaiting_confirmation(&self) -> bool {
        self.awaiting_confirmation
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Set one field of the draft and clear that field's error.
    pub fn set(&mut self, field: ProjectField, value: FieldValue) -> Result<(), DashboardError> {
        if self.is_edit() && LOCKED_IN_EDIT.contains(&field) {
            return Err(DashboardError::FieldLocked(field.name().to_string()));
        }
        self.draft.set(field, value)?;
        self.touched(field);
        Ok(())
    }

    pub fn increment(&mut self, kind: IssueKind) {
        self.draft.issues.increment(kind);
        self.touched(ProjectField::Issue(kind));
    }

    /// Decrement a counter; stays at 0.
    pub fn decrement(&mut self, kind: IssueKind) {
        self.draft.issues.decrement(kind);
        self.touched(ProjectField::Issue(kind));
    }

    pub fn toggle_issue(&mut self, kind: IssueKind) {
        let on = !self.draft.issues.has(kind);
        self.draft.issues.set_flag(kind, on);
        self.touched(ProjectField::Issue(kind));
    }

    fn touched(&mut self, field: ProjectField) {
        self.errors.remove(field.name());
        self.awaiting_confirmation = false;
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Validate the current stage and advance when it passes.
    pub fn next(&mut self) -> Result<Stage, DashboardError> {
        let Some(target) = self.stage.next() else {
            return Err(DashboardError::StepUnavailable {
                current: self.stage.to_string(),
                target: "next".to_string(),
            });
        };
        let errors = self.stage.validate(&self.draft);
        if !errors.is_empty() {
            log::debug!("Stage {} blocked by {} errors", self.stage, errors.len());
            self.errors = errors.clone();
            return Err(DashboardError::Validation(errors));
        }
        self.errors.clear();
        log::debug!("Stage {} -> {}", self.stage, target);
        self.stage = target;
        Ok(target)
    }

    pub fn back(&mut self) -> Result<Stage, DashboardError> {
        let target = self.stage.previous().ok_or_else(|| DashboardError::StepUnavailable {
            current: self.stage.to_string(),
            target: "previous".to_string(),
        })?;
        self.stage = target;
        self.awaiting_confirmation = false;
        Ok(target)
    }

    /// Jump to the current stage or any stage before it.
    pub fn jump_to(&mut self, target: Stage) -> Result<(), DashboardError> {
        if target > self.stage {
            return Err(DashboardError::StepUnavailable {
                current: self.stage.to_string(),
                target: target.to_string(),
            });
        }
        self.stage = target;
        self.awaiting_confirmation = false;
        Ok(())
    }

    // =========================================================================
    // Change tracking
    // =========================================================================

    /// Changed fields in edit mode; always empty when creating.
    pub fn changes(&self) -> Vec<FieldChange> {
        self.original()
            .map(|original| diff(original, &self.draft))
            .unwrap_or_default()
    }

    pub fn is_field_changed(&self, field: ProjectField) -> bool {
        self.original()
            .is_some_and(|original| field_changed(original, &self.draft, field))
    }

    pub fn has_unsaved_changes(&self) -> bool {
        !self.changes().is_empty()
    }

    pub fn summary(&self, today: NaiveDate) -> FormSummary {
        summarize(&self.draft, today)
    }

    // =========================================================================
    // Submit
    // =========================================================================

    /// Every stage's errors merged. Moves to the first failing stage.
    fn validate_all(&mut self) -> Result<(), DashboardError> {
        let mut merged = FieldErrors::new();
        let mut first_failing = None;
        for stage in Stage::ORDER {
            let errors = stage.validate(&self.draft);
            if !errors.is_empty() && first_failing.is_none() {
                first_failing = Some(stage);
            }
            merged.extend(errors);
        }
        if let Some(stage) = first_failing {
            self.stage = stage;
            self.errors = merged.clone();
            return Err(DashboardError::Validation(merged));
        }
        Ok(())
    }

    /// Press save. Creating hands the draft to `sink` directly; editing
    /// returns the change list for confirmation and never calls `sink`.
    pub fn submit<S: ProjectSink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Result<SubmitOutcome, DashboardError> {
        self.validate_all()?;
        if !self.is_edit() {
            let id = sink.save(SaveRequest {
                original_id: None,
                project: self.draft.clone(),
                changes: Vec::new(),
            })?;
            return Ok(SubmitOutcome::Saved(id));
        }

        let changes = self.changes();
        if changes.is_empty() {
            return Err(DashboardError::NothingToSave);
        }
        self.awaiting_confirmation = true;
        Ok(SubmitOutcome::NeedsConfirmation(changes))
    }

    /// Confirm the change list returned by `submit` and hand it to `sink`.
    pub fn confirm<S: ProjectSink + ?Sized>(&mut self, sink: &mut S) -> Result<String, DashboardError> {
        let Some(original_id) = self.original().map(|o| o.id.clone()) else {
            return Err(DashboardError::StepUnavailable {
                current: self.stage.to_string(),
                target: "confirmation".to_string(),
            });
        };
        if !self.awaiting_confirmation {
            return Err(DashboardError::StepUnavailable {
                current: self.stage.to_string(),
                target: "confirmation".to_string(),
            });
        }
        let changes = self.changes();
        if changes.is_empty() {
            self.awaiting_confirmation = false;
            return Err(DashboardError::NothingToSave);
        }

        let id = sink.save(SaveRequest {
            original_id: Some(original_id),
            project: self.draft.clone(),
            changes,
        })?;
        self.awaiting_confirmation = false;
        // The saved draft is the new baseline.
        self.mode = FormMode::Edit {
            original: self.draft.clone(),
        };
        Ok(id)
    }

    pub fn cancel_confirmation(&mut self) {
        self.awaiting_confirmation = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NoopSink;
    use crate::test_utils::sample_project;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 15).unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    fn fill_basic(form: &mut ProjectForm) {
        form.set(ProjectField::Name, text("ERP rollout")).unwrap();
        form.set(ProjectField::Client, text("Acme")).unwrap();
        form.set(ProjectField::SalesRep, text("An")).unwrap();
        form.set(ProjectField::ValueSigned, FieldValue::Amount(5_000)).unwrap();
    }

    fn fill_implementation(form: &mut ProjectForm) {
        form.set(ProjectField::ImplRep, text("Binh")).unwrap();
        form.set(ProjectField::KickoffDate, FieldValue::Date(Some(d(2025, 1, 10))))
            .unwrap();
        form.set(ProjectField::Deadline, FieldValue::Date(Some(d(2025, 6, 30))))
            .unwrap();
    }

    #[test]
    fn test_create_defaults() {
        let form = ProjectForm::create(today());
        let draft = form.draft();
        assert_eq!((draft.sign_year, draft.sign_month), (2025, 4));
        assert_eq!(draft.status, ProjectStatus::NotStarted);
        assert_eq!(draft.project_type, Some(ProjectType::New));
        assert_eq!(draft.manager_rating, 5);
        assert_eq!(form.stage(), Stage::BasicInfo);
        assert!(!form.has_unsaved_changes());
    }

    #[test]
    fn test_next_blocked_until_valid() {
        let mut form = ProjectForm::create(today());
        let err = form.next().unwrap_err();
        assert!(err.is_user_correctable());
        assert_eq!(form.stage(), Stage::BasicInfo);
        assert_eq!(form.errors().len(), 4);

        form.set(ProjectField::Name, text("ERP")).unwrap();
        assert!(!form.errors().contains_key("name"));
        assert_eq!(form.errors().len(), 3);

        fill_basic(&mut form);
        assert_eq!(form.next().unwrap(), Stage::Implementation);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_deadline_before_kickoff_blocks_stage_two() {
        let mut form = ProjectForm::create(today());
        fill_basic(&mut form);
        form.next().unwrap();
        fill_implementation(&mut form);
        form.set(ProjectField::KickoffDate, FieldValue::Date(Some(d(2024, 1, 10))))
            .unwrap();
        form.set(ProjectField::Deadline, FieldValue::Date(Some(d(2024, 1, 5))))
            .unwrap();

        assert!(matches!(form.next(), Err(DashboardError::Validation(_))));
        assert_eq!(form.stage(), Stage::Implementation);
        assert!(form.errors().contains_key("deadline"));
    }

    #[test]
    fn test_completed_label_requires_completion_date() {
        let mut form = ProjectForm::create(today());
        fill_basic(&mut form);
        form.next().unwrap();
        fill_implementation(&mut form);
        form.set(
            ProjectField::Status,
            FieldValue::Status(ProjectStatus::Other("Completed".to_string())),
        )
        .unwrap();

        assert_eq!(form.draft().status, ProjectStatus::Completed);
        assert!(form.next().is_err());
        assert!(form.errors().contains_key("completionDate"));
    }

    #[test]
    fn test_back_and_jump() {
        let mut form = ProjectForm::edit(sample_project("p1"));
        assert!(form.back().is_err());
        form.next().unwrap();
        form.next().unwrap();
        assert_eq!(form.stage(), Stage::Quality);

        assert!(matches!(
            form.jump_to(Stage::Summary),
            Err(DashboardError::StepUnavailable { .. })
        ));
        form.jump_to(Stage::BasicInfo).unwrap();
        assert_eq!(form.stage(), Stage::BasicInfo);
        form.next().unwrap();
        assert_eq!(form.back().unwrap(), Stage::BasicInfo);
    }

    #[test]
    fn test_next_past_summary_is_unavailable() {
        let mut form = ProjectForm::edit(sample_project("p1"));
        for _ in 0..3 {
            form.next().unwrap();
        }
        assert_eq!(form.stage(), Stage::Summary);
        assert!(form.next().is_err());
    }

    #[test]
    fn test_sign_date_locked_in_edit_mode() {
        let mut form = ProjectForm::edit(sample_project("p1"));
        let err = form.set(ProjectField::SignYear, FieldValue::Int(2020)).unwrap_err();
        assert!(matches!(err, DashboardError::FieldLocked(ref f) if f == "signYear"));
        assert!(form.set(ProjectField::SignMonth, FieldValue::Int(2)).is_err());

        let mut create = ProjectForm::create(today());
        create.set(ProjectField::SignYear, FieldValue::Int(2020)).unwrap();
        assert_eq!(create.draft().sign_year, 2020);
    }

    #[test]
    fn test_counters_clamp_at_zero() {
        let mut form = ProjectForm::create(today());
        form.decrement(IssueKind::SoftwareError);
        assert_eq!(form.draft().software_errors(), 0);
        form.increment(IssueKind::SoftwareError);
        form.increment(IssueKind::SoftwareError);
        form.decrement(IssueKind::SoftwareError);
        assert_eq!(form.draft().software_errors(), 1);

        form.toggle_issue(IssueKind::Client);
        assert!(form.draft().issues.has(IssueKind::Client));
        form.toggle_issue(IssueKind::Client);
        assert!(!form.draft().issues.has(IssueKind::Client));
    }

    #[test]
    fn test_create_submit_saves_directly() {
        let mut form = ProjectForm::create(today());
        fill_basic(&mut form);
        fill_implementation(&mut form);
        let mut sink = NoopSink::default();
        assert!(matches!(form.submit(&mut sink), Ok(SubmitOutcome::Saved(_))));
        assert_eq!(sink.saves, 1);
    }

    #[test]
    fn test_submit_revalidates_every_stage() {
        let mut form = ProjectForm::create(today());
        fill_basic(&mut form);
        form.next().unwrap();
        form.jump_to(Stage::BasicInfo).unwrap();
        form.set(ProjectField::Client, text("")).unwrap();

        let mut sink = NoopSink::default();
        let err = form.submit(&mut sink).unwrap_err();
        let fields = err.field_errors();
        assert!(fields.contains_key("client"));
        assert!(fields.contains_key("implRep"));
        assert_eq!(form.stage(), Stage::BasicInfo);
        assert_eq!(sink.saves, 0);
    }

    #[test]
    fn test_edit_without_changes_is_refused() {
        let mut form = ProjectForm::edit(sample_project("p1"));
        let mut sink = NoopSink::default();
        let err = form.submit(&mut sink).unwrap_err();
        assert!(matches!(err, DashboardError::NothingToSave));
        assert_eq!(sink.saves, 0);
    }

    #[test]
    fn test_edit_change_list_then_confirm() {
        let mut original = sample_project("p1");
        original.value_signed = 1000;
        let mut form = ProjectForm::edit(original);
        form.set(ProjectField::ValueSigned, FieldValue::Amount(1500)).unwrap();
        assert!(form.is_field_changed(ProjectField::ValueSigned));
        assert!(!form.is_field_changed(ProjectField::Name));

        let mut sink = NoopSink::default();
        let outcome = form.submit(&mut sink).unwrap();
        let SubmitOutcome::NeedsConfirmation(changes) = outcome else {
            panic!("expected confirmation");
        };
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].old, FieldValue::Amount(1000));
        assert_eq!(changes[0].new, FieldValue::Amount(1500));
        assert_eq!(sink.saves, 0);
        assert!(form.is_awaiting_confirmation());

        assert_eq!(form.confirm(&mut sink).unwrap(), "p1");
        assert_eq!(sink.saves, 1);
        assert!(!form.has_unsaved_changes());
    }

    #[test]
    fn test_confirm_requires_pending_submit() {
        let mut form = ProjectForm::edit(sample_project("p1"));
        form.set(ProjectField::ManagerNote, text("watch closely")).unwrap();
        let mut sink = NoopSink::default();
        assert!(form.confirm(&mut sink).is_err());

        form.submit(&mut sink).unwrap();
        form.cancel_confirmation();
        assert!(form.confirm(&mut sink).is_err());
        assert_eq!(sink.saves, 0);
    }

    #[test]
    fn test_summary_uses_live_days_late() {
        let mut project = sample_project("p1");
        project.deadline = Some(d(2025, 4, 10));
        project.days_late = 0;
        let form = ProjectForm::edit(project);
        assert_eq!(form.summary(today()).days_late, 5);
    }
}
