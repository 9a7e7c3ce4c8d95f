//! Risk board: risk buckets, the lateness/quality scatter, priority insights
//! and the side-by-side comparison selection.

use serde::Serialize;

use crate::error::DashboardError;
use crate::insights::{InsightContext, InsightEngine, InsightScope};
use crate::types::{AiInsight, Config, Project, RiskLevel};
use crate::util::percentage;

/// Fewest projects a comparison accepts.
pub const MIN_COMPARISON: usize = 2;

/// One dot on the risk matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixPoint {
    pub id: String,
    pub name: String,
    /// Days late.
    pub x: u32,
    /// Software errors plus complaints.
    pub y: u32,
    /// Signed value, drives the bubble size.
    pub z: u64,
    pub risk_level: RiskLevel,
}

impl From<&Project> for MatrixPoint {
    fn from(p: &Project) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            x: p.days_late,
            y: p.issue_total(),
            z: p.value_signed,
            risk_level: p.risk_level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskBoardView {
    pub high: Vec<Project>,
    pub medium: Vec<Project>,
    pub low: Vec<Project>,
    pub matrix: Vec<MatrixPoint>,
    /// Share of projects with any days late, 0 for an empty list.
    pub late_share: f64,
    /// Days late at which the matrix draws its threshold line.
    pub threshold_days: u32,
    pub priority: Vec<AiInsight>,
}

/// Build the risk board over an already-filtered project list. Detector
/// thresholds follow `config`, so the priority list and the matrix line agree.
pub fn risk_board(projects: &[Project], config: &Config, engine: &InsightEngine) -> RiskBoardView {
    let bucket = |level: RiskLevel| -> Vec<Project> {
        projects
            .iter()
            .filter(|p| p.risk_level == level)
            .cloned()
            .collect()
    };

    let late = projects.iter().filter(|p| p.days_late > 0).count();
    let ctx = InsightContext::from_config(config);

    let view = RiskBoardView {
        high: bucket(RiskLevel::High),
        medium: bucket(RiskLevel::Medium),
        low: bucket(RiskLevel::Low),
        matrix: projects.iter().map(MatrixPoint::from).collect(),
        late_share: percentage(late, projects.len()),
        threshold_days: config.risk_threshold_days,
        priority: engine.run(InsightScope::RiskBoard, projects, &ctx),
    };
    log::debug!(
        "Risk board: {} high, {} medium, {} low, {} priority",
        view.high.len(),
        view.medium.len(),
        view.low.len(),
        view.priority.len()
    );
    view
}

// =============================================================================
// Comparison selection
// =============================================================================

/// Project ids picked for a side-by-side comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareSelection {
    selected: Vec<String>,
    limit: usize,
}

impl CompareSelection {
    pub fn new(limit: usize) -> Self {
        Self {
            selected: Vec::new(),
            limit,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.comparison_limit)
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Select `id`, or deselect it if already selected. Selecting past the
    /// limit is refused and leaves the selection unchanged.
    pub fn toggle(&mut self, id: &str) -> Result<(), DashboardError> {
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
            return Ok(());
        }
        if self.selected.len() >= self.limit {
            return Err(DashboardError::ComparisonLimitReached { limit: self.limit });
        }
        self.selected.push(id.to_string());
        Ok(())
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// The selected projects, in the order they appear in `projects`.
    pub fn compare<'a>(&self, projects: &'a [Project]) -> Result<Vec<&'a Project>, DashboardError> {
        if self.selected.len() < MIN_COMPARISON {
            return Err(DashboardError::ComparisonTooFew {
                min: MIN_COMPARISON,
            });
        }
        Ok(projects
            .iter()
            .filter(|p| self.is_selected(&p.id))
            .collect())
    }
}
