//! Insight detectors.
//!
//! Each detector is a pure function over the project list and returns zero or
//! more insights. Thresholds come from `InsightContext` where they are tunable.

use super::engine::{insight_id, InsightContext};
use crate::display::format_optional_date;
use crate::types::{
    AiInsight, InsightCategory, InsightSeverity, IssueKind, Project, ProjectStatus, RiskLevel,
};
use crate::util::percentage;

/// Software errors above which delivery quality is flagged.
const LOW_QUALITY_ERRORS: u32 = 3;

/// Recognised revenue share below which an in-progress project is flagged.
const SLOW_REVENUE_RATIO: f64 = 0.2;

// ---------------------------------------------------------------------------
// Detector 1: Schedule slip
// ---------------------------------------------------------------------------

/// Project more than `schedule_slip_days` late.
pub fn detect_schedule_slip(projects: &[Project], ctx: &InsightContext) -> Vec<AiInsight> {
    projects
        .iter()
        .filter(|p| p.days_late > ctx.schedule_slip_days)
        .map(|p| AiInsight {
            id: insight_id("detect_schedule_slip", &p.id),
            title: "Serious schedule slip".to_string(),
            description: format!(
                "{} is {} days behind its commitment. The {} deadline is unrealistic without extra resources.",
                p.name,
                p.days_late,
                format_optional_date(p.deadline)
            ),
            category: InsightCategory::Schedule,
            severity: InsightSeverity::High,
            project_id: Some(p.id.clone()),
            action_label: Some("Call an urgent meeting".to_string()),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Detector 2: Delivery quality
// ---------------------------------------------------------------------------

pub fn detect_low_quality(projects: &[Project], _ctx: &InsightContext) -> Vec<AiInsight> {
    projects
        .iter()
        .filter(|p| p.software_errors() > LOW_QUALITY_ERRORS)
        .map(|p| AiInsight {
            id: insight_id("detect_low_quality", &p.id),
            title: "Low delivery quality".to_string(),
            description: format!(
                "{} software errors raised during acceptance testing; the next sign-off may slip.",
                p.software_errors()
            ),
            category: InsightCategory::Quality,
            severity: InsightSeverity::High,
            project_id: Some(p.id.clone()),
            action_label: None,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Detector 3: Slow revenue recognition
// ---------------------------------------------------------------------------

/// In-progress project with under 20% of its signed value recognised.
pub fn detect_slow_revenue(projects: &[Project], _ctx: &InsightContext) -> Vec<AiInsight> {
    projects
        .iter()
        .filter(|p| {
            p.status == ProjectStatus::InProgress
                && p.value_signed > 0
                && (p.revenue_recognized as f64 / p.value_signed as f64) < SLOW_REVENUE_RATIO
        })
        .map(|p| AiInsight {
            id: insight_id("detect_slow_revenue", &p.id),
            title: "Low recognised revenue".to_string(),
            description: format!(
                "Only {}% of the signed value is recognised. Push the first acceptance milestone.",
                p.revenue_progress_percent()
            ),
            category: InsightCategory::Financial,
            severity: InsightSeverity::Medium,
            project_id: Some(p.id.clone()),
            action_label: None,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Detector 4: Priority projects (risk board)
// ---------------------------------------------------------------------------

/// HIGH-risk projects ranked by `days_late + software_errors`, top `priority_limit`.
pub fn detect_priority_projects(projects: &[Project], ctx: &InsightContext) -> Vec<AiInsight> {
    let mut high: Vec<&Project> = projects
        .iter()
        .filter(|p| p.risk_level == RiskLevel::High)
        .collect();
    high.sort_by(|a, b| {
        let score = |p: &Project| p.days_late + p.software_errors();
        score(b).cmp(&score(a))
    });

    high.into_iter()
        .take(ctx.priority_limit)
        .map(|p| AiInsight {
            id: insight_id("detect_priority_projects", &p.id),
            title: format!("Handle first: {}", p.name),
            description: format!(
                "{} days late with {} software errors. High risk of losing the client.",
                p.days_late,
                p.software_errors()
            ),
            category: InsightCategory::Schedule,
            severity: InsightSeverity::High,
            project_id: Some(p.id.clone()),
            action_label: Some("View details".to_string()),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Detector 5: Root-cause pattern (risk board)
// ---------------------------------------------------------------------------

/// Share of HIGH-risk projects whose issue log points at staffing (skill or
/// attitude) or at an unclear spec. Silent when nothing is high risk.
pub fn detect_root_cause_pattern(projects: &[Project], _ctx: &InsightContext) -> Vec<AiInsight> {
    let high: Vec<&Project> = projects
        .iter()
        .filter(|p| p.risk_level == RiskLevel::High)
        .collect();
    if high.is_empty() {
        return Vec::new();
    }

    let rooted = high
        .iter()
        .filter(|p| {
            [IssueKind::Skill, IssueKind::Attitude, IssueKind::Spec]
                .iter()
                .any(|k| p.issues.has(*k))
        })
        .count();

    vec![AiInsight {
        id: insight_id("detect_root_cause_pattern", "portfolio"),
        title: "Pattern: root cause".to_string(),
        description: format!(
            "{:.0}% of high-risk projects trace back to overloaded staff or a spec that was unclear from the start.",
            percentage(rooted, high.len())
        ),
        category: InsightCategory::Quality,
        severity: InsightSeverity::Medium,
        project_id: None,
        action_label: None,
    }]
}
