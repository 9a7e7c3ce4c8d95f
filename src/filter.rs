//! Filter engine: narrows the project list by the dashboard's six criteria.
//!
//! Criteria are plain strings; an empty string means "no constraint". A
//! non-empty value that matches nothing in the roster simply yields zero
//! projects.

use serde::{Deserialize, Serialize};

use crate::types::Project;

/// The six filterable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Year,
    Month,
    SalesRep,
    ImplRep,
    Status,
    RiskLevel,
}

impl FilterField {
    pub const ALL: [FilterField; 6] = [
        FilterField::Year,
        FilterField::Month,
        FilterField::SalesRep,
        FilterField::ImplRep,
        FilterField::Status,
        FilterField::RiskLevel,
    ];

    /// The project's value for this field, in the same string form criteria use.
    fn project_value(&self, project: &Project) -> String {
        match self {
            FilterField::Year => project.sign_year.to_string(),
            FilterField::Month => project.sign_month.to_string(),
            FilterField::SalesRep => project.sales_rep.clone(),
            FilterField::ImplRep => project.impl_rep.clone(),
            FilterField::Status => project.status.as_str().to_string(),
            FilterField::RiskLevel => project.risk_level.as_str().to_string(),
        }
    }
}

/// Filter criteria. Immutable in use: `with` returns a new state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub year: String,
    pub month: String,
    pub sales_rep: String,
    pub impl_rep: String,
    pub status: String,
    pub risk_level: String,
}

impl FilterState {
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Year => &self.year,
            FilterField::Month => &self.month,
            FilterField::SalesRep => &self.sales_rep,
            FilterField::ImplRep => &self.impl_rep,
            FilterField::Status => &self.status,
            FilterField::RiskLevel => &self.risk_level,
        }
    }

    /// Copy of this state with one criterion replaced.
    pub fn with(&self, field: FilterField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let slot = match field {
            FilterField::Year => &mut next.year,
            FilterField::Month => &mut next.month,
            FilterField::SalesRep => &mut next.sales_rep,
            FilterField::ImplRep => &mut next.impl_rep,
            FilterField::Status => &mut next.status,
            FilterField::RiskLevel => &mut next.risk_level,
        };
        *slot = value.into();
        next
    }

    pub fn reset() -> Self {
        Self::default()
    }

    /// Number of non-empty criteria.
    pub fn active_count(&self) -> usize {
        FilterField::ALL
            .iter()
            .filter(|f| !self.get(**f).is_empty())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    pub fn matches(&self, project: &Project) -> bool {
        FilterField::ALL.iter().all(|field| {
            let wanted = self.get(*field);
            wanted.is_empty() || field.project_value(project) == wanted
        })
    }

    pub fn fingerprint(&self) -> String {
        let parts: Vec<&str> = FilterField::ALL.iter().map(|f| self.get(*f)).collect();
        crate::util::fingerprint(&parts)
    }
}

/// Apply the criteria. Input is untouched; an empty filter returns every project.
pub fn filter_projects(projects: &[Project], criteria: &FilterState) -> Vec<Project> {
    if criteria.is_empty() {
        return projects.to_vec();
    }
    projects
        .iter()
        .filter(|p| criteria.matches(p))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_project;
    use crate::types::{ProjectStatus, RiskLevel};

    fn fixture() -> Vec<Project> {
        let mut a = sample_project("a");
        a.sign_year = 2024;
        a.sign_month = 5;
        a.sales_rep = "Lan".to_string();
        a.risk_level = RiskLevel::High;

        let mut b = sample_project("b");
        b.sign_year = 2025;
        b.sign_month = 1;
        b.sales_rep = "Minh".to_string();
        b.status = ProjectStatus::Completed;

        let mut c = sample_project("c");
        c.sign_year = 2024;
        c.sign_month = 12;
        c.sales_rep = "Lan".to_string();
        c.status = ProjectStatus::Completed;

        vec![a, b, c]
    }

    fn ids(projects: &[Project]) -> Vec<&str> {
        projects.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let projects = fixture();
        assert_eq!(filter_projects(&projects, &FilterState::default()), projects);
    }

    #[test]
    fn test_year_matches_after_coercion() {
        let projects = fixture();
        let f = FilterState::default().with(FilterField::Year, "2024");
        assert_eq!(ids(&filter_projects(&projects, &f)), vec!["a", "c"]);
    }

    #[test]
    fn test_criteria_compose_with_and() {
        let projects = fixture();
        let by_rep = FilterState::default().with(FilterField::SalesRep, "Lan");
        let by_status = FilterState::default().with(FilterField::Status, "Completed");
        let both = by_rep.with(FilterField::Status, "Completed");

        let rep_then_status = filter_projects(&filter_projects(&projects, &by_rep), &by_status);
        let status_then_rep = filter_projects(&filter_projects(&projects, &by_status), &by_rep);
        assert_eq!(ids(&rep_then_status), vec!["c"]);
        assert_eq!(rep_then_status, status_then_rep);
        assert_eq!(filter_projects(&projects, &both), rep_then_status);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let projects = fixture();
        let f = FilterState::default().with(FilterField::Year, "2024");
        let once = filter_projects(&projects, &f);
        let twice = filter_projects(&once, &f);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unknown_value_yields_no_matches() {
        let projects = fixture();
        let f = FilterState::default().with(FilterField::RiskLevel, "EXTREME");
        assert!(filter_projects(&projects, &f).is_empty());
        let f = FilterState::default().with(FilterField::Month, "05");
        assert!(filter_projects(&projects, &f).is_empty());
    }

    #[test]
    fn test_risk_level_filter() {
        let projects = fixture();
        let f = FilterState::default().with(FilterField::RiskLevel, "HIGH");
        assert_eq!(ids(&filter_projects(&projects, &f)), vec!["a"]);
    }

    #[test]
    fn test_active_count_and_reset() {
        let f = FilterState::default()
            .with(FilterField::Year, "2024")
            .with(FilterField::ImplRep, "Hoa");
        assert_eq!(f.active_count(), 2);
        assert!(FilterState::reset().is_empty());
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = FilterState::default().with(FilterField::Year, "2024");
        let b = FilterState::default().with(FilterField::Year, "2024");
        let c = FilterState::default().with(FilterField::Month, "2024");
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_deserializes_partial_json() {
        let f: FilterState = serde_json::from_str(r#"{"salesRep":"Lan"}"#).unwrap();
        assert_eq!(f.sales_rep, "Lan");
        assert_eq!(f.active_count(), 1);
    }
}
