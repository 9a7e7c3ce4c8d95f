//! Figures shown on the wizard's read-only summary step.

use chrono::NaiveDate;
use serde::Serialize;

use crate::schedule::live_days_late;
use crate::types::{IssueKind, Project};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSummary {
    pub signed: u64,
    pub revenue: u64,
    pub remaining: i64,
    /// Live figure from the deadline, not the stored snapshot.
    pub days_late: u32,
    /// Software errors plus the scope and attitude flags.
    pub total_issues: u32,
    pub complaints: u32,
}

pub fn summarize(draft: &Project, today: NaiveDate) -> FormSummary {
    let issues = &draft.issues;
    FormSummary {
        signed: draft.value_signed,
        revenue: draft.revenue_recognized,
        remaining: draft.remaining_value(),
        days_late: live_days_late(draft.deadline, &draft.status, today),
        total_issues: issues.software_errors()
            + u32::from(issues.has(IssueKind::Spec))
            + u32::from(issues.has(IssueKind::Attitude)),
        complaints: issues.complaints(),
    }
}
