//! Days-late derivation.
//!
//! Projects carry a stored `days_late` snapshot that dashboards, tables and
//! the risk board read as-is. The wizard's summary step recomputes lateness
//! live from the deadline. Both paths are intentionally separate; this module
//! is the only place the live figure is computed.

use chrono::NaiveDate;

use crate::types::{Project, ProjectStatus};

/// Whole days between `deadline` and `today` for an unfinished project, 0
/// when completed, on time, or without a deadline.
pub fn live_days_late(
    deadline: Option<NaiveDate>,
    status: &ProjectStatus,
    today: NaiveDate,
) -> u32 {
    let Some(deadline) = deadline else {
        return 0;
    };
    if *status == ProjectStatus::Completed || today <= deadline {
        return 0;
    }
    u32::try_from((today - deadline).num_days()).unwrap_or(u32::MAX)
}

impl Project {
    pub fn live_days_late(&self, today: NaiveDate) -> u32 {
        live_days_late(self.deadline, &self.status, today)
    }
}
