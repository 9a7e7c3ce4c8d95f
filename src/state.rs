use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::aggregate::{
    impl_leaderboard, kpi_summary, monthly_trend, sales_leaderboard, sales_rep_distribution,
    status_distribution, CountSlice, KpiStats, LeaderboardRow, MonthlyPoint,
};
use crate::error::DashboardError;
use crate::filter::{filter_projects, FilterField, FilterState};
use crate::types::{Config, Project};
use crate::util::fingerprint;

// =============================================================================
// Config
// =============================================================================

/// ~/.projdash/config.json
pub fn config_path() -> Result<PathBuf, DashboardError> {
    let home = dirs::home_dir().ok_or(DashboardError::NoHomeDir)?;
    Ok(home.join(".projdash").join("config.json"))
}

/// Load configuration from an explicit path.
pub fn load_config(path: &Path) -> Result<Config, DashboardError> {
    if !path.exists() {
        return Err(DashboardError::ConfigNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;

    serde_json::from_str(&content).map_err(|e| DashboardError::ConfigParse(e.to_string()))
}

/// Load configuration from ~/.projdash/config.json
pub fn load_config_from_home() -> Result<Config, DashboardError> {
    load_config(&config_path()?)
}

// =============================================================================
// Dashboard state
// =============================================================================

/// The project list and the active filters. Never mutated: every change
/// produces a new state, so a fingerprint identifies its derived view.
#[derive(Debug, Clone)]
pub struct DashboardState {
    projects: Arc<[Project]>,
    filters: FilterState,
    projects_key: String,
}

fn projects_key(projects: &[Project]) -> String {
    match serde_json::to_string(projects) {
        Ok(json) => fingerprint(&[&json]),
        Err(e) => {
            // Unique key: never served from cache.
            log::warn!("Could not fingerprint project list: {}", e);
            uuid::Uuid::new_v4().to_string()
        }
    }
}

impl DashboardState {
    pub fn new(projects: Vec<Project>, filters: FilterState) -> Self {
        let projects: Arc<[Project]> = projects.into();
        Self {
            projects_key: projects_key(&projects),
            projects,
            filters,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Same projects (shared, not copied) with new filters.
    pub fn with_filters(&self, filters: FilterState) -> Self {
        Self {
            projects: Arc::clone(&self.projects),
            filters,
            projects_key: self.projects_key.clone(),
        }
    }

    pub fn with_filter(&self, field: FilterField, value: impl Into<String>) -> Self {
        self.with_filters(self.filters.with(field, value))
    }

    pub fn with_projects(&self, projects: Vec<Project>) -> Self {
        Self::new(projects, self.filters.clone())
    }

    pub fn fingerprint(&self) -> String {
        fingerprint(&[&self.projects_key, &self.filters.fingerprint()])
    }

    pub fn filtered(&self) -> Vec<Project> {
        filter_projects(&self.projects, &self.filters)
    }
}

/// Everything the dashboard page renders, derived from one state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub filters: FilterState,
    pub projects: Vec<Project>,
    pub kpi: KpiStats,
    pub monthly_trend: Vec<MonthlyPoint>,
    pub status_distribution: Vec<CountSlice>,
    pub sales_distribution: Vec<CountSlice>,
    pub sales_leaderboard: Vec<LeaderboardRow>,
    pub impl_leaderboard: Vec<LeaderboardRow>,
}

impl DashboardView {
    pub fn build(state: &DashboardState, config: &Config) -> Self {
        let projects = state.filtered();
        log::debug!(
            "Recomputing dashboard: {}/{} projects match {} filters",
            projects.len(),
            state.projects().len(),
            state.filters().active_count()
        );
        Self {
            filters: state.filters().clone(),
            kpi: kpi_summary(&projects),
            monthly_trend: monthly_trend(&projects),
            status_distribution: status_distribution(&projects),
            sales_distribution: sales_rep_distribution(&projects, config.sales_distribution_limit),
            sales_leaderboard: sales_leaderboard(&projects),
            impl_leaderboard: impl_leaderboard(&projects),
            projects,
        }
    }
}

/// Holds the last computed view and its key.
#[derive(Debug, Default)]
pub struct ViewCache {
    key: Option<String>,
    view: Option<Arc<DashboardView>>,
    misses: usize,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached view for `state`, recomputed only when the key changes.
    pub fn view(&mut self, state: &DashboardState, config: &Config) -> Arc<DashboardView> {
        let key = fingerprint(&[
            &state.fingerprint(),
            &config.sales_distribution_limit.to_string(),
        ]);
        if let (Some(cached_key), Some(view)) = (&self.key, &self.view) {
            if *cached_key == key {
                return Arc::clone(view);
            }
        }
        let view = Arc::new(DashboardView::build(state, config));
        self.misses += 1;
        self.key = Some(key);
        self.view = Some(Arc::clone(&view));
        view
    }

    /// How many times a view has been computed.
    pub fn misses(&self) -> usize {
        self.misses
    }
}

// =============================================================================
// Navigation
// =============================================================================

/// Top-level screen a shell shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", content = "projectId", rename_all = "camelCase")]
pub enum ViewState {
    #[default]
    Dashboard,
    RiskBoard,
    CreateProject,
    EditProject(String),
    Admin,
}
