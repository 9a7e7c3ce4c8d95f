//! Insight engine: a registry of detectors, run per scope, de-duplicated by id.

use std::collections::HashSet;

use crate::types::{AiInsight, Config, Project};
use crate::util::fingerprint;

/// Where a detector's output is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsightScope {
    /// A single project's detail page.
    ProjectDetail,
    /// The portfolio-wide risk board.
    RiskBoard,
}

/// Thresholds passed to each detector. Detectors read the stored
/// `days_late`, so no clock is needed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightContext {
    /// Days late above which a schedule warning fires. Same value as the
    /// risk matrix threshold line.
    pub schedule_slip_days: u32,
    /// Cap on priority insights for the risk board.
    pub priority_limit: usize,
}

impl InsightContext {
    pub fn from_config(config: &Config) -> Self {
        Self {
            schedule_slip_days: config.risk_threshold_days,
            priority_limit: config.priority_insight_limit,
        }
    }
}

impl Default for InsightContext {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Function signature for an insight detector.
pub type DetectorFn = fn(&[Project], &InsightContext) -> Vec<AiInsight>;

pub struct DetectorEntry {
    pub name: String,
    pub scopes: Vec<InsightScope>,
    pub detector: DetectorFn,
}

#[derive(Default)]
pub struct InsightEngine {
    detectors: Vec<DetectorEntry>,
}

impl InsightEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a detector with the scopes it applies to.
    pub fn register(&mut self, name: &str, scopes: &[InsightScope], detector: DetectorFn) {
        self.detectors.push(DetectorEntry {
            name: name.to_string(),
            scopes: scopes.to_vec(),
            detector,
        });
    }

    /// Run every detector registered for `scope`, in registration order.
    /// Insights with an id already produced are dropped.
    pub fn run(
        &self,
        scope: InsightScope,
        projects: &[Project],
        ctx: &InsightContext,
    ) -> Vec<AiInsight> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();

        for entry in &self.detectors {
            if !entry.scopes.contains(&scope) {
                continue;
            }
            let insights = (entry.detector)(projects, ctx);
            log::debug!("Detector {} produced {} insights", entry.name, insights.len());
            for insight in insights {
                if seen.insert(insight.id.clone()) {
                    out.push(insight);
                }
            }
        }
        out
    }

    /// Insights for one project's detail page.
    pub fn project_insights(&self, project: &Project, ctx: &InsightContext) -> Vec<AiInsight> {
        self.run(InsightScope::ProjectDetail, std::slice::from_ref(project), ctx)
    }
}

/// Build a default engine with every built-in detector registered.
pub fn default_engine() -> InsightEngine {
    use super::detectors;

    let mut engine = InsightEngine::new();
    engine.register(
        "detect_schedule_slip",
        &[InsightScope::ProjectDetail],
        detectors::detect_schedule_slip,
    );
    engine.register(
        "detect_low_quality",
        &[InsightScope::ProjectDetail],
        detectors::detect_low_quality,
    );
    engine.register(
        "detect_slow_revenue",
        &[InsightScope::ProjectDetail],
        detectors::detect_slow_revenue,
    );
    engine.register(
        "detect_priority_projects",
        &[InsightScope::RiskBoard],
        detectors::detect_priority_projects,
    );
    engine.register(
        "detect_root_cause_pattern",
        &[InsightScope::RiskBoard],
        detectors::detect_root_cause_pattern,
    );
    engine
}

/// Stable insight id from detector name and subject.
pub fn insight_id(detector: &str, subject: &str) -> String {
    let fp = fingerprint(&[detector, subject]);
    format!("ins-{}", &fp[..16])
}
