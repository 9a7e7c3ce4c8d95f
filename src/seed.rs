//! Deterministic mock data standing in for the real query interface.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::roster::Roster;
use crate::types::{
    AiInsight, AuditAction, AuditLogEntry, ImportHistoryEntry, ImportSource, ImportStatus,
    InsightCategory, InsightSeverity, IssueKind, IssueLog, Project, ProjectStatus, ProjectType,
    RiskLevel, UserRole,
};

const SALES_REPS: [&str; 6] = [
    "Nguyen Van An",
    "Tran Thi Binh",
    "Le Hoang Cuong",
    "Pham Thu Dung",
    "Vo Minh Em",
    "Dang Quoc Phong",
];

const IMPL_REPS: [&str; 4] = [
    "Hoang Gia Huy",
    "Bui Thanh Lam",
    "Do Khanh Linh",
    "Ngo Duc Manh",
];

pub fn roster() -> Roster {
    Roster {
        years: vec![2025, 2024, 2023],
        sales_reps: SALES_REPS.iter().map(|s| s.to_string()).collect(),
        impl_reps: IMPL_REPS.iter().map(|s| s.to_string()).collect(),
    }
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

// (id, name, client, sales idx, impl idx, year, month, value, revenue, status,
//  risk, days late, software errors, complaints, rating)
type ProjectRow = (
    &'static str,
    &'static str,
    &'static str,
    usize,
    usize,
    i32,
    u32,
    u64,
    u64,
    ProjectStatus,
    RiskLevel,
    u32,
    u32,
    u32,
    u8,
);

fn project_rows() -> Vec<ProjectRow> {
    use ProjectStatus as S;
    use RiskLevel as R;
    vec![
        ("PRJ-001", "ERP rollout phase 1", "Hoa Phat Group", 0, 0, 2024, 3, 2_500_000_000, 2_500_000_000, S::Completed, R::Low, 0, 0, 0, 5),
        ("PRJ-002", "HRM cloud migration", "Vinamilk", 1, 1, 2024, 5, 1_200_000_000, 600_000_000, S::InProgress, R::Medium, 4, 2, 1, 4),
        ("PRJ-003", "Core banking integration", "Techcombank", 2, 2, 2024, 7, 4_800_000_000, 500_000_000, S::Late, R::High, 21, 6, 3, 2),
        ("PRJ-004", "Retail POS upgrade", "Thegioididong", 0, 3, 2024, 9, 900_000_000, 720_000_000, S::WaitingAcceptance, R::Low, 0, 1, 0, 4),
        ("PRJ-005", "Logistics tracking portal", "Viettel Post", 3, 0, 2024, 12, 1_750_000_000, 200_000_000, S::InProgress, R::High, 12, 4, 2, 3),
        ("PRJ-006", "Document management", "EVN", 4, 1, 2025, 1, 650_000_000, 100_000_000, S::InProgress, R::Medium, 0, 0, 1, 4),
        ("PRJ-007", "CRM renewal", "FPT Retail", 1, 2, 2025, 1, 480_000_000, 480_000_000, S::WaitingPayment, R::Low, 0, 0, 0, 5),
        ("PRJ-008", "Factory MES pilot", "Vinfast", 2, 3, 2025, 2, 3_200_000_000, 400_000_000, S::OnHold, R::High, 30, 2, 4, 2),
        ("PRJ-009", "E-invoice rollout", "Masan", 5, 0, 2025, 3, 350_000_000, 50_000_000, S::NotStarted, R::Low, 0, 0, 0, 5),
        ("PRJ-010", "Data warehouse", "Sovico", 3, 1, 2025, 4, 2_100_000_000, 1_050_000_000, S::InProgress, R::Medium, 2, 1, 0, 4),
        ("PRJ-011", "Maintenance contract 2025", "Hoa Phat Group", 0, 2, 2025, 4, 300_000_000, 300_000_000, S::WaitingLiquidation, R::Low, 0, 0, 0, 5),
        ("PRJ-012", "Mobile banking revamp", "Techcombank", 2, 3, 2025, 5, 2_900_000_000, 150_000_000, S::InProgress, R::High, 9, 5, 1, 3),
    ]
}

/// Seed projects, in id order.
pub fn projects() -> Vec<Project> {
    project_rows()
        .into_iter()
        .map(
            |(id, name, client, sales, implementer, year, month, value, revenue, status, risk, late, errors, complaints, rating)| {
                let kickoff = date(year, month, 15);
                let deadline = kickoff.and_then(|k| k.checked_add_months(chrono::Months::new(6)));
                let completion_date = (status == ProjectStatus::Completed).then_some(deadline).flatten();
                let project_type = match id {
                    "PRJ-007" => ProjectType::Renewal,
                    "PRJ-011" => ProjectType::Maintenance,
                    _ => ProjectType::New,
                };
                let mut issues = IssueLog::new()
                    .with(IssueKind::SoftwareError, errors)
                    .with(IssueKind::Complaint, complaints);
                if risk == RiskLevel::High {
                    issues.set_flag(IssueKind::Spec, true);
                }
                if late > 20 {
                    issues.set_flag(IssueKind::Skill, true);
                }
                Project {
                    id: id.to_string(),
                    name: name.to_string(),
                    client: client.to_string(),
                    sales_rep: SALES_REPS[sales].to_string(),
                    impl_rep: IMPL_REPS[implementer].to_string(),
                    sign_year: year,
                    sign_month: month,
                    kickoff_date: kickoff,
                    deadline,
                    completion_date,
                    value_signed: value,
                    revenue_recognized: revenue,
                    status,
                    risk_level: risk,
                    project_type: Some(project_type),
                    issues,
                    days_late: late,
                    manager_note: String::new(),
                    manager_rating: rating,
                }
            },
        )
        .collect()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap_or_default()
}

pub fn audit_log() -> Vec<AuditLogEntry> {
    let entry = |id: &str,
                 ts: DateTime<Utc>,
                 (user_id, user_name, role): (&str, &str, UserRole),
                 action: AuditAction,
                 (target_type, target_id): (&str, &str),
                 description: &str,
                 values: Option<(&str, &str)>| AuditLogEntry {
        id: id.to_string(),
        timestamp: ts,
        user_id: user_id.to_string(),
        user_name: user_name.to_string(),
        user_role: role,
        action,
        target_type: target_type.to_string(),
        target_id: target_id.to_string(),
        description: description.to_string(),
        old_value: values.map(|(old, _)| old.to_string()),
        new_value: values.map(|(_, new)| new.to_string()),
    };

    let admin = ("u-admin", "System Admin", UserRole::Admin);
    let manager = ("u-manager", "Manager", UserRole::Manager);
    let operator = ("u-linh", "Do Khanh Linh", UserRole::Operator);
    let viewer = ("u-viewer", "Board Viewer", UserRole::Viewer);

    vec![
        entry("audit-0006", at(2025, 5, 20, 16, 45), operator, AuditAction::Update, ("Project", "PRJ-012"), "Updated softwareErrors on project PRJ-012", Some(("4", "5"))),
        entry("audit-0005", at(2025, 5, 20, 9, 12), manager, AuditAction::Update, ("Project", "PRJ-003"), "Updated status on project PRJ-003", Some(("In Progress", "Late"))),
        entry("audit-0004", at(2025, 5, 19, 14, 30), viewer, AuditAction::Export, ("System", "REPORT-Q2"), "Exported quarterly project report", None),
        entry("audit-0003", at(2025, 5, 18, 11, 5), manager, AuditAction::Create, ("Project", "PRJ-012"), "Created project Mobile banking revamp", None),
        entry("audit-0002", at(2025, 5, 18, 8, 0), admin, AuditAction::Update, ("User", "u-linh"), "Changed role of Do Khanh Linh", Some(("viewer", "operator"))),
        entry("audit-0001", at(2025, 5, 18, 7, 58), admin, AuditAction::Login, ("System", "AUTH"), "Signed in", None),
    ]
}

pub fn import_history() -> Vec<ImportHistoryEntry> {
    let row = |id: &str,
               ts: DateTime<Utc>,
               file: &str,
               source: ImportSource,
               total: u32,
               failed: u32,
               status: ImportStatus| ImportHistoryEntry {
        id: id.to_string(),
        timestamp: ts,
        file_name: file.to_string(),
        source,
        imported_by: "System Admin".to_string(),
        rows_total: total,
        rows_success: total - failed,
        rows_failed: failed,
        status,
    };
    vec![
        row("imp-003", at(2025, 5, 2, 10, 0), "projects_may.xlsx", ImportSource::Excel, 156, 8, ImportStatus::Partial),
        row("imp-002", at(2025, 4, 1, 9, 30), "https://docs.google.com/spreadsheets/d/pipeline", ImportSource::GoogleSheet, 42, 0, ImportStatus::Success),
        row("imp-001", at(2025, 3, 3, 15, 20), "legacy_export.xlsx", ImportSource::Excel, 20, 20, ImportStatus::Failed),
    ]
}

/// Portfolio-level insights shown on the dashboard panel.
pub fn insights() -> Vec<AiInsight> {
    vec![
        AiInsight {
            id: "ins-portfolio-revenue".to_string(),
            title: "Revenue recognition lagging".to_string(),
            description: "Three in-progress projects have recognised under a fifth of their signed value.".to_string(),
            category: InsightCategory::Financial,
            severity: InsightSeverity::Medium,
            project_id: None,
            action_label: Some("Review milestones".to_string()),
        },
        AiInsight {
            id: "ins-portfolio-workload".to_string(),
            title: "Implementation workload concentrated".to_string(),
            description: "Ngo Duc Manh owns two high-risk projects at once.".to_string(),
            category: InsightCategory::People,
            severity: InsightSeverity::High,
            project_id: None,
            action_label: Some("Rebalance owners".to_string()),
        },
        AiInsight {
            id: "ins-portfolio-client".to_string(),
            title: "Repeat complaints from Techcombank".to_string(),
            description: "Both Techcombank projects logged complaints this quarter.".to_string(),
            category: InsightCategory::Client,
            severity: InsightSeverity::Low,
            project_id: None,
            action_label: None,
        },
    ]
}
