//! Implementation-project dashboard core: filtering, KPI aggregation, risk
//! board, insight generation and the create/edit project wizard, all over
//! in-memory data.

pub mod admin;
pub mod aggregate;
pub mod audit;
pub mod display;
pub mod error;
pub mod filter;
pub mod form;
pub mod import;
pub mod insights;
pub mod risk;
pub mod roster;
pub mod schedule;
pub mod seed;
pub mod state;
pub mod store;
pub mod table;
pub mod types;
pub mod util;

pub use error::{DashboardError, Notice};
pub use filter::{filter_projects, FilterField, FilterState};
pub use form::{ProjectForm, Stage, SubmitOutcome};
pub use state::{load_config, DashboardState, DashboardView, ViewCache, ViewState};
pub use store::{InMemoryStore, NoopSink, ProjectSink, SaveRequest};
pub use types::{Config, Project};

// =============================================================================
// Shared test utilities
// =============================================================================

#[cfg(test)]
pub mod test_utils {
    use chrono::NaiveDate;

    use crate::types::{IssueLog, Project, ProjectStatus, ProjectType, RiskLevel};

    /// A project that passes every wizard stage: in progress, low risk, on
    /// time, no issues, half its value recognised.
    pub fn sample_project(id: &str) -> Project {
        Project {
            id: id.to_string(),
            name: format!("Project {}", id),
            client: format!("Client {}", id),
            sales_rep: "Lan".to_string(),
            impl_rep: "Hoa".to_string(),
            sign_year: 2024,
            sign_month: 1,
            kickoff_date: NaiveDate::from_ymd_opt(2024, 1, 10),
            deadline: NaiveDate::from_ymd_opt(2024, 12, 31),
            completion_date: None,
            value_signed: 1000,
            revenue_recognized: 500,
            status: ProjectStatus::InProgress,
            risk_level: RiskLevel::Low,
            project_type: Some(ProjectType::New),
            issues: IssueLog::new(),
            days_late: 0,
            manager_note: String::new(),
            manager_rating: 5,
        }
    }
}
