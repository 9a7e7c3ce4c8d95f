use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::DashboardError;
use crate::filter::FilterState;

/// Configuration stored in ~/.projdash/config.json
///
/// Every field is defaulted so a partial (or empty `{}`) file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Filters applied when the dashboard first opens.
    #[serde(default)]
    pub default_filters: FilterState,
    /// Days late beyond which a project crosses the risk matrix threshold line.
    #[serde(default = "default_risk_threshold_days")]
    pub risk_threshold_days: u32,
    /// Rows per page in the project table.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// How many sales reps the distribution chart keeps.
    #[serde(default = "default_sales_distribution_limit")]
    pub sales_distribution_limit: usize,
    /// Maximum number of projects in a side-by-side comparison.
    #[serde(default = "default_comparison_limit")]
    pub comparison_limit: usize,
    #[serde(default = "default_priority_insight_limit")]
    pub priority_insight_limit: usize,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Name recorded on audit entries produced by saves.
    #[serde(default = "default_actor_name")]
    pub actor_name: String,
    #[serde(default = "default_actor_role")]
    pub actor_role: UserRole,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_filters: FilterState::default(),
            risk_threshold_days: default_risk_threshold_days(),
            page_size: default_page_size(),
            sales_distribution_limit: default_sales_distribution_limit(),
            comparison_limit: default_comparison_limit(),
            priority_insight_limit: default_priority_insight_limit(),
            currency_symbol: default_currency_symbol(),
            actor_name: default_actor_name(),
            actor_role: default_actor_role(),
        }
    }
}

fn default_risk_threshold_days() -> u32 {
    7
}

fn default_page_size() -> usize {
    20
}

fn default_sales_distribution_limit() -> usize {
    5
}

fn default_comparison_limit() -> usize {
    3
}

fn default_priority_insight_limit() -> usize {
    3
}

fn default_currency_symbol() -> String {
    "₫".to_string()
}

fn default_actor_name() -> String {
    "Manager".to_string()
}

fn default_actor_role() -> UserRole {
    UserRole::Manager
}

// =============================================================================
// Project enumerations
// =============================================================================

/// Lifecycle status of a project.
///
/// Open enumeration: imported data may carry statuses outside the eight named
/// states, which are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectStatus {
    NotStarted,
    InProgress,
    OnHold,
    /// Legacy explicit status; lateness is normally read from `days_late`.
    Late,
    Completed,
    WaitingAcceptance,
    WaitingLiquidation,
    WaitingPayment,
    Other(String),
}

impl ProjectStatus {
    /// The eight named states, in dropdown order.
    pub fn known() -> [ProjectStatus; 8] {
        [
            ProjectStatus::NotStarted,
            ProjectStatus::InProgress,
            ProjectStatus::OnHold,
            ProjectStatus::Late,
            ProjectStatus::Completed,
            ProjectStatus::WaitingAcceptance,
            ProjectStatus::WaitingLiquidation,
            ProjectStatus::WaitingPayment,
        ]
    }

    /// Canonical label, also the value filters match against.
    pub fn as_str(&self) -> &str {
        match self {
            ProjectStatus::NotStarted => "Not Started",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::OnHold => "On Hold",
            ProjectStatus::Late => "Late",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::WaitingAcceptance => "Waiting Acceptance",
            ProjectStatus::WaitingLiquidation => "Waiting Liquidation",
            ProjectStatus::WaitingPayment => "Waiting Payment",
            ProjectStatus::Other(raw) => raw,
        }
    }

    /// Map an `Other` carrying a known label onto its named state.
    pub fn normalized(self) -> Self {
        match self {
            ProjectStatus::Other(raw) => ProjectStatus::from(raw),
            known => known,
        }
    }
}

impl From<&str> for ProjectStatus {
    fn from(raw: &str) -> Self {
        Self::known()
            .into_iter()
            .find(|s| s.as_str() == raw)
            .unwrap_or_else(|| ProjectStatus::Other(raw.to_string()))
    }
}

impl From<String> for ProjectStatus {
    fn from(raw: String) -> Self {
        ProjectStatus::from(raw.as_str())
    }
}

impl From<ProjectStatus> for String {
    fn from(status: ProjectStatus) -> Self {
        match status {
            ProjectStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse health classification, stored on the record rather than computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "HIGH",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::Low => "LOW",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectType {
    New,
    Renewal,
    Maintenance,
    Other,
}

impl ProjectType {
    pub const ALL: [ProjectType; 4] = [
        ProjectType::New,
        ProjectType::Renewal,
        ProjectType::Maintenance,
        ProjectType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::New => "New",
            ProjectType::Renewal => "Renewal",
            ProjectType::Maintenance => "Maintenance",
            ProjectType::Other => "Other",
        }
    }
}

// =============================================================================
// Issue tracking
// =============================================================================

/// Kinds of quality issue recorded against a project.
///
/// `SoftwareError` and `Complaint` are counters; the rest are flags whose
/// count is 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueKind {
    SoftwareError,
    Complaint,
    Attitude,
    Spec,
    Client,
    Skill,
    Software,
}

impl IssueKind {
    pub const ALL: [IssueKind; 7] = [
        IssueKind::SoftwareError,
        IssueKind::Complaint,
        IssueKind::Attitude,
        IssueKind::Spec,
        IssueKind::Client,
        IssueKind::Skill,
        IssueKind::Software,
    ];

    pub fn is_counter(&self) -> bool {
        matches!(self, IssueKind::SoftwareError | IssueKind::Complaint)
    }

    /// Field name used in change sets and audit entries.
    pub fn field_name(&self) -> &'static str {
        match self {
            IssueKind::SoftwareError => "softwareErrors",
            IssueKind::Complaint => "complaints",
            IssueKind::Attitude => "issueAttitude",
            IssueKind::Spec => "issueSpec",
            IssueKind::Client => "issueClient",
            IssueKind::Skill => "issueSkill",
            IssueKind::Software => "issueSoftware",
        }
    }
}

/// Per-kind issue counts. Zero counts are never stored, so two logs with the
/// same non-zero counts compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueLog(BTreeMap<IssueKind, u32>);

impl IssueLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: IssueKind) -> u32 {
        self.0.get(&kind).copied().unwrap_or(0)
    }

    pub fn has(&self, kind: IssueKind) -> bool {
        self.count(kind) > 0
    }

    pub fn set_count(&mut self, kind: IssueKind, count: u32) {
        let count = if kind.is_counter() { count } else { count.min(1) };
        if count == 0 {
            self.0.remove(&kind);
        } else {
            self.0.insert(kind, count);
        }
    }

    pub fn set_flag(&mut self, kind: IssueKind, on: bool) {
        self.set_count(kind, u32::from(on));
    }

    pub fn increment(&mut self, kind: IssueKind) {
        self.set_count(kind, self.count(kind).saturating_add(1));
    }

    /// Decrement, clamped at zero.
    pub fn decrement(&mut self, kind: IssueKind) {
        self.set_count(kind, self.count(kind).saturating_sub(1));
    }

    pub fn software_errors(&self) -> u32 {
        self.count(IssueKind::SoftwareError)
    }

    pub fn complaints(&self) -> u32 {
        self.count(IssueKind::Complaint)
    }

    /// Flag kinds currently raised.
    pub fn flags(&self) -> impl Iterator<Item = IssueKind> + '_ {
        self.0.keys().copied().filter(|k| !k.is_counter())
    }

    pub fn with(mut self, kind: IssueKind, count: u32) -> Self {
        self.set_count(kind, count);
        self
    }
}

// =============================================================================
// Project
// =============================================================================

/// The central record: one signed implementation project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub client: String,
    pub sales_rep: String,
    pub impl_rep: String,
    pub sign_year: i32,
    pub sign_month: u32,
    pub kickoff_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<NaiveDate>,
    /// Contract value. `revenue_recognized` is expected to stay at or below it,
    /// but nothing enforces that.
    pub value_signed: u64,
    pub revenue_recognized: u64,
    pub status: ProjectStatus,
    pub risk_level: RiskLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<ProjectType>,
    #[serde(default)]
    pub issues: IssueLog,
    /// Stored snapshot; see `schedule::live_days_late` for the live derivation.
    #[serde(default)]
    pub days_late: u32,
    #[serde(default)]
    pub manager_note: String,
    pub manager_rating: u8,
}

impl Project {
    pub fn remaining_value(&self) -> i64 {
        self.value_signed as i64 - self.revenue_recognized as i64
    }

    /// Share of signed value already recognised, rounded and capped at 100.
    pub fn revenue_progress_percent(&self) -> u32 {
        if self.value_signed == 0 {
            return 0;
        }
        let pct = (self.revenue_recognized as f64 / self.value_signed as f64) * 100.0;
        (pct.round() as u32).min(100)
    }

    pub fn software_errors(&self) -> u32 {
        self.issues.software_errors()
    }

    pub fn complaints(&self) -> u32 {
        self.issues.complaints()
    }

    /// Software errors plus complaints: the y axis of the risk matrix.
    pub fn issue_total(&self) -> u32 {
        self.software_errors() + self.complaints()
    }

    pub fn is_late(&self) -> bool {
        self.status == ProjectStatus::Late || self.days_late > 0
    }

    pub fn has_quality_issue(&self) -> bool {
        self.software_errors() > 0 || self.complaints() > 0
    }

    /// Read one field as a comparable value.
    pub fn get(&self, field: ProjectField) -> FieldValue {
        match field {
            ProjectField::Name => FieldValue::Text(self.name.clone()),
            ProjectField::Client => FieldValue::Text(self.client.clone()),
            ProjectField::SalesRep => FieldValue::Text(self.sales_rep.clone()),
            ProjectField::ImplRep => FieldValue::Text(self.impl_rep.clone()),
            ProjectField::SignYear => FieldValue::Int(i64::from(self.sign_year)),
            ProjectField::SignMonth => FieldValue::Int(i64::from(self.sign_month)),
            ProjectField::ValueSigned => FieldValue::Amount(self.value_signed),
            ProjectField::RevenueRecognized => FieldValue::Amount(self.revenue_recognized),
            ProjectField::KickoffDate => FieldValue::Date(self.kickoff_date),
            ProjectField::Deadline => FieldValue::Date(self.deadline),
            ProjectField::CompletionDate => FieldValue::Date(self.completion_date),
            ProjectField::Status => FieldValue::Status(self.status.clone()),
            ProjectField::RiskLevel => FieldValue::Risk(self.risk_level),
            ProjectField::ProjectType => FieldValue::Kind(self.project_type),
            ProjectField::DaysLate => FieldValue::Int(i64::from(self.days_late)),
            ProjectField::ManagerNote => FieldValue::Text(self.manager_note.clone()),
            ProjectField::ManagerRating => FieldValue::Int(i64::from(self.manager_rating)),
            ProjectField::Issue(kind) if kind.is_counter() => {
                FieldValue::Int(i64::from(self.issues.count(kind)))
            }
            ProjectField::Issue(kind) => FieldValue::Flag(self.issues.has(kind)),
        }
    }

    /// Write one field. The value variant must match the field's type.
    pub fn set(&mut self, field: ProjectField, value: FieldValue) -> Result<(), DashboardError> {
        let mismatch = |expected: &'static str| DashboardError::FieldType {
            field: field.name().to_string(),
            expected,
        };
        match (field, value) {
            (ProjectField::Name, FieldValue::Text(v)) => self.name = v,
            (ProjectField::Client, FieldValue::Text(v)) => self.client = v,
            (ProjectField::SalesRep, FieldValue::Text(v)) => self.sales_rep = v,
            (ProjectField::ImplRep, FieldValue::Text(v)) => self.impl_rep = v,
            (ProjectField::ManagerNote, FieldValue::Text(v)) => self.manager_note = v,
            (ProjectField::SignYear, FieldValue::Int(v)) => {
                self.sign_year = i32::try_from(v).map_err(|_| mismatch("year"))?
            }
            (ProjectField::SignMonth, FieldValue::Int(v)) if (1..=12).contains(&v) => {
                self.sign_month = v as u32
            }
            (ProjectField::DaysLate, FieldValue::Int(v)) => {
                self.days_late = u32::try_from(v).map_err(|_| mismatch("non-negative integer"))?
            }
            (ProjectField::ManagerRating, FieldValue::Int(v)) if (1..=5).contains(&v) => {
                self.manager_rating = v as u8
            }
            (ProjectField::ValueSigned, FieldValue::Amount(v)) => self.value_signed = v,
            (ProjectField::RevenueRecognized, FieldValue::Amount(v)) => {
                self.revenue_recognized = v
            }
            (ProjectField::KickoffDate, FieldValue::Date(v)) => self.kickoff_date = v,
            (ProjectField::Deadline, FieldValue::Date(v)) => self.deadline = v,
            (ProjectField::CompletionDate, FieldValue::Date(v)) => self.completion_date = v,
            (ProjectField::Status, FieldValue::Status(v)) => self.status = v.normalized(),
            (ProjectField::RiskLevel, FieldValue::Risk(v)) => self.risk_level = v,
            (ProjectField::ProjectType, FieldValue::Kind(v)) => self.project_type = v,
            (ProjectField::Issue(kind), FieldValue::Int(v)) if kind.is_counter() => {
                let count = u32::try_from(v).map_err(|_| mismatch("non-negative integer"))?;
                self.issues.set_count(kind, count)
            }
            (ProjectField::Issue(kind), FieldValue::Flag(v)) if !kind.is_counter() => {
                self.issues.set_flag(kind, v)
            }
            (field, _) => return Err(mismatch(field.expected_type())),
        }
        Ok(())
    }
}

/// Every editable field of a `Project`, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProjectField {
    Name,
    Client,
    SignYear,
    SignMonth,
    SalesRep,
    ValueSigned,
    RevenueRecognized,
    ImplRep,
    ProjectType,
    KickoffDate,
    Deadline,
    Status,
    CompletionDate,
    RiskLevel,
    DaysLate,
    ManagerNote,
    ManagerRating,
    Issue(IssueKind),
}

impl ProjectField {
    pub fn all() -> Vec<ProjectField> {
        let mut fields = vec![
            ProjectField::Name,
            ProjectField::Client,
            ProjectField::SignYear,
            ProjectField::SignMonth,
            ProjectField::SalesRep,
            ProjectField::ValueSigned,
            ProjectField::RevenueRecognized,
            ProjectField::ImplRep,
            ProjectField::ProjectType,
            ProjectField::KickoffDate,
            ProjectField::Deadline,
            ProjectField::Status,
            ProjectField::CompletionDate,
            ProjectField::RiskLevel,
            ProjectField::DaysLate,
            ProjectField::ManagerNote,
            ProjectField::ManagerRating,
        ];
        fields.extend(IssueKind::ALL.into_iter().map(ProjectField::Issue));
        fields
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProjectField::Name => "name",
            ProjectField::Client => "client",
            ProjectField::SignYear => "signYear",
            ProjectField::SignMonth => "signMonth",
            ProjectField::SalesRep => "salesRep",
            ProjectField::ValueSigned => "valueSigned",
            ProjectField::RevenueRecognized => "revenueRecognized",
            ProjectField::ImplRep => "implRep",
            ProjectField::ProjectType => "projectType",
            ProjectField::KickoffDate => "kickoffDate",
            ProjectField::Deadline => "deadline",
            ProjectField::Status => "status",
            ProjectField::CompletionDate => "completionDate",
            ProjectField::RiskLevel => "riskLevel",
            ProjectField::DaysLate => "daysLate",
            ProjectField::ManagerNote => "managerNote",
            ProjectField::ManagerRating => "managerRating",
            ProjectField::Issue(kind) => kind.field_name(),
        }
    }

    fn expected_type(&self) -> &'static str {
        match self {
            ProjectField::Name
            | ProjectField::Client
            | ProjectField::SalesRep
            | ProjectField::ImplRep
            | ProjectField::ManagerNote => "text",
            ProjectField::SignYear | ProjectField::DaysLate => "integer",
            ProjectField::SignMonth => "month 1-12",
            ProjectField::ManagerRating => "rating 1-5",
            ProjectField::ValueSigned | ProjectField::RevenueRecognized => "amount",
            ProjectField::KickoffDate | ProjectField::Deadline | ProjectField::CompletionDate => {
                "date"
            }
            ProjectField::Status => "status",
            ProjectField::RiskLevel => "risk level",
            ProjectField::ProjectType => "project type",
            ProjectField::Issue(kind) if kind.is_counter() => "non-negative integer",
            ProjectField::Issue(_) => "flag",
        }
    }
}

impl fmt::Display for ProjectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ProjectField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A single field's value, typed loosely enough to compare and display any
/// field of a `Project`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Amount(u64),
    Flag(bool),
    Date(Option<NaiveDate>),
    Status(ProjectStatus),
    Risk(RiskLevel),
    Kind(Option<ProjectType>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(v) => f.write_str(v),
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Amount(v) => write!(f, "{}", v),
            FieldValue::Flag(v) => write!(f, "{}", v),
            FieldValue::Date(Some(d)) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::Date(None) | FieldValue::Kind(None) => f.write_str("—"),
            FieldValue::Status(s) => f.write_str(s.as_str()),
            FieldValue::Risk(r) => f.write_str(r.as_str()),
            FieldValue::Kind(Some(k)) => f.write_str(k.as_str()),
        }
    }
}

// =============================================================================
// Insights
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Schedule,
    People,
    Quality,
    Financial,
    Client,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightSeverity {
    High,
    Medium,
    Low,
}

/// A derived observation about one project or the whole portfolio.
/// Regenerated from project metrics; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiInsight {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: InsightCategory,
    pub severity: InsightSeverity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_label: Option<String>,
}

// =============================================================================
// Admin & audit
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    Operator,
    Viewer,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        UserRole::Admin,
        UserRole::Manager,
        UserRole::Operator,
        UserRole::Viewer,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Login,
    Export,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
    pub user_name: String,
    pub user_role: UserRole,
    pub action: AuditAction,
    /// "Project", "User" or "System".
    pub target_type: String,
    pub target_id: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// =============================================================================
// Data import
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStatus {
    Success,
    Failed,
    Partial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportSource {
    Excel,
    GoogleSheet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportHistoryEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub file_name: String,
    pub source: ImportSource,
    pub imported_by: String,
    pub rows_total: u32,
    pub rows_success: u32,
    pub rows_failed: u32,
    pub status: ImportStatus,
}

impl ImportHistoryEntry {
    /// Percentage of rows imported successfully; 0 when the file was empty.
    pub fn success_rate(&self) -> f64 {
        if self.rows_total == 0 {
            return 0.0;
        }
        f64::from(self.rows_success) / f64::from(self.rows_total) * 100.0
    }
}
