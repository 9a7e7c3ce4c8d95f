//! Aggregations over an already-filtered project list.
//!
//! Each function is an independent pure reducer: KPI summary, monthly trend,
//! status / sales-rep distribution and the two performance leaderboards. None
//! reads another's output.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::Project;
use crate::util::percentage;

/// Label used when a grouping key is blank.
const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiStats {
    pub total_projects: usize,
    pub total_value: u64,
    pub total_revenue: u64,
    pub remaining_value: i64,
    /// Share of projects late (status Late or days late > 0), 0-100.
    pub late_percentage: f64,
    /// Share of projects with software errors or complaints, 0-100.
    pub error_percentage: f64,
}

pub fn kpi_summary(projects: &[Project]) -> KpiStats {
    let total_projects = projects.len();
    let total_value: u64 = projects.iter().map(|p| p.value_signed).sum();
    let total_revenue: u64 = projects.iter().map(|p| p.revenue_recognized).sum();
    let late = projects.iter().filter(|p| p.is_late()).count();
    let with_errors = projects.iter().filter(|p| p.has_quality_issue()).count();

    KpiStats {
        total_projects,
        total_value,
        total_revenue,
        remaining_value: total_value as i64 - total_revenue as i64,
        late_percentage: percentage(late, total_projects),
        error_percentage: percentage(with_errors, total_projects),
    }
}

/// One bar of the signed-vs-revenue chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    /// Display label, e.g. "5/2024".
    pub name: String,
    pub sign_year: i32,
    pub sign_month: u32,
    /// `year * 100 + month`; orders chronologically across year boundaries.
    pub sort_key: i64,
    pub signed: u64,
    pub revenue: u64,
}

/// Signed value and recognised revenue per sign month, oldest first.
pub fn monthly_trend(projects: &[Project]) -> Vec<MonthlyPoint> {
    let mut index: HashMap<(i32, u32), usize> = HashMap::new();
    let mut points: Vec<MonthlyPoint> = Vec::new();

    for p in projects {
        let key = (p.sign_year, p.sign_month);
        let slot = *index.entry(key).or_insert_with(|| {
            points.push(MonthlyPoint {
                name: format!("{}/{}", p.sign_month, p.sign_year),
                sign_year: p.sign_year,
                sign_month: p.sign_month,
                sort_key: i64::from(p.sign_year) * 100 + i64::from(p.sign_month),
                signed: 0,
                revenue: 0,
            });
            points.len() - 1
        });
        points[slot].signed += p.value_signed;
        points[slot].revenue += p.revenue_recognized;
    }

    points.sort_by_key(|pt| pt.sort_key);
    points
}

/// One slice of a donut chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountSlice {
    pub name: String,
    pub value: usize,
}

/// Count occurrences of `key` in encounter order.
fn tally<'a>(projects: &'a [Project], key: impl Fn(&'a Project) -> &'a str) -> Vec<CountSlice> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut slices: Vec<CountSlice> = Vec::new();

    for p in projects {
        let name = match key(p) {
            "" => UNKNOWN_LABEL,
            name => name,
        };
        match index.get(name) {
            Some(&i) => slices[i].value += 1,
            None => {
                index.insert(name, slices.len());
                slices.push(CountSlice {
                    name: name.to_string(),
                    value: 1,
                });
            }
        }
    }
    slices
}

/// Project count per status, in order of first appearance.
pub fn status_distribution(projects: &[Project]) -> Vec<CountSlice> {
    tally(projects, |p| p.status.as_str())
}

/// Top `limit` sales reps by project count. Ties keep encounter order.
pub fn sales_rep_distribution(projects: &[Project], limit: usize) -> Vec<CountSlice> {
    let mut slices = tally(projects, |p| p.sales_rep.as_str());
    slices.sort_by(|a, b| b.value.cmp(&a.value));
    slices.truncate(limit);
    slices
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub name: String,
    pub count: usize,
    pub revenue: u64,
    pub issues: u32,
}

fn leaderboard<'a>(
    projects: &'a [Project],
    key: impl Fn(&'a Project) -> &'a str,
    revenue: impl Fn(&Project) -> u64,
    issues: impl Fn(&Project) -> u32,
) -> Vec<LeaderboardRow> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<LeaderboardRow> = Vec::new();

    for p in projects {
        let name = key(p);
        let slot = *index.entry(name).or_insert_with(|| {
            rows.push(LeaderboardRow {
                name: name.to_string(),
                count: 0,
                revenue: 0,
                issues: 0,
            });
            rows.len() - 1
        });
        rows[slot].count += 1;
        rows[slot].revenue += revenue(p);
        rows[slot].issues += issues(p);
    }
    rows
}

/// Sales reps ranked by signed value; issues are summed complaints.
pub fn sales_leaderboard(projects: &[Project]) -> Vec<LeaderboardRow> {
    let mut rows = leaderboard(
        projects,
        |p| p.sales_rep.as_str(),
        |p| p.value_signed,
        |p| p.complaints(),
    );
    rows.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    rows
}

/// Implementation reps ranked by project count (volume, not revenue).
/// Issues count projects with software errors or days late.
pub fn impl_leaderboard(projects: &[Project]) -> Vec<LeaderboardRow> {
    let mut rows = leaderboard(
        projects,
        |p| p.impl_rep.as_str(),
        |p| p.revenue_recognized,
        |p| u32::from(p.software_errors() > 0 || p.days_late > 0),
    );
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_project;
    use crate::types::{IssueKind, ProjectStatus};

    fn signed(id: &str, year: i32, month: u32, value: u64, revenue: u64) -> Project {
        let mut p = sample_project(id);
        p.sign_year = year;
        p.sign_month = month;
        p.value_signed = value;
        p.revenue_recognized = revenue;
        p
    }

    #[test]
    fn test_kpi_empty_list_is_zero_not_nan() {
        let stats = kpi_summary(&[]);
        assert_eq!(stats, KpiStats::default());
        assert_eq!(stats.late_percentage, 0.0);
        assert_eq!(stats.error_percentage, 0.0);
    }

    #[test]
    fn test_kpi_counts_late_and_errors() {
        let mut a = signed("a", 2024, 1, 1000, 400);
        a.status = ProjectStatus::Late;
        let mut b = signed("b", 2024, 2, 3000, 3000);
        b.days_late = 4;
        b.issues.set_count(IssueKind::Complaint, 1);
        let c = signed("c", 2024, 3, 1000, 0);
        let d = signed("d", 2024, 3, 1000, 0);

        let stats = kpi_summary(&[a, b, c, d]);
        assert_eq!(stats.total_projects, 4);
        assert_eq!(stats.total_value, 6000);
        assert_eq!(stats.total_revenue, 3400);
        assert_eq!(stats.remaining_value, 2600);
        assert_eq!(stats.late_percentage, 50.0);
        assert_eq!(stats.error_percentage, 25.0);
    }

    #[test]
    fn test_kpi_percentages_stay_in_range() {
        let mut projects = Vec::new();
        for i in 0..7 {
            let mut p = signed(&format!("p{i}"), 2024, 1, 10, 0);
            p.days_late = i;
            p.issues.set_count(IssueKind::SoftwareError, i);
            projects.push(p);
        }
        let stats = kpi_summary(&projects);
        for pct in [stats.late_percentage, stats.error_percentage] {
            assert!((0.0..=100.0).contains(&pct));
        }
    }

    #[test]
    fn test_monthly_trend_orders_across_years() {
        let projects = vec![
            signed("a", 2024, 5, 100, 10),
            signed("b", 2025, 1, 200, 20),
            signed("c", 2024, 12, 300, 30),
            signed("d", 2024, 5, 50, 5),
        ];
        let trend = monthly_trend(&projects);
        let names: Vec<&str> = trend.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["5/2024", "12/2024", "1/2025"]);
        assert_eq!(trend[0].signed, 150);
        assert_eq!(trend[0].revenue, 15);
    }

    #[test]
    fn test_status_distribution_keeps_encounter_order() {
        let mut a = sample_project("a");
        a.status = ProjectStatus::Completed;
        let b = sample_project("b");
        let mut c = sample_project("c");
        c.status = ProjectStatus::Completed;
        let mut d = sample_project("d");
        d.status = ProjectStatus::Other(String::new());

        let dist = status_distribution(&[a, b, c, d]);
        assert_eq!(
            dist,
            vec![
                CountSlice { name: "Completed".to_string(), value: 2 },
                CountSlice { name: "In Progress".to_string(), value: 1 },
                CountSlice { name: "Unknown".to_string(), value: 1 },
            ]
        );
    }

    #[test]
    fn test_sales_distribution_top_five_stable() {
        let counts = [("A", 10), ("B", 7), ("C", 7), ("D", 3), ("E", 2), ("F", 1)];
        let mut projects = Vec::new();
        // B is encountered before C.
        for (rep, n) in counts {
            for i in 0..n {
                let mut p = sample_project(&format!("{rep}{i}"));
                p.sales_rep = rep.to_string();
                projects.push(p);
            }
        }
        let dist = sales_rep_distribution(&projects, 5);
        assert_eq!(dist.len(), 5);
        assert_eq!(dist[0].name, "A");
        assert_eq!(dist[1].name, "B");
        assert_eq!(dist[2].name, "C");
        assert!(dist.windows(2).all(|w| w[0].value >= w[1].value));
        assert!(dist.iter().all(|s| s.name != "F"));
    }

    #[test]
    fn test_sales_leaderboard_ranks_by_value() {
        let mut a = signed("a", 2024, 1, 100, 0);
        a.sales_rep = "Lan".to_string();
        a.issues.set_count(IssueKind::Complaint, 2);
        let mut b = signed("b", 2024, 1, 500, 0);
        b.sales_rep = "Minh".to_string();
        let mut c = signed("c", 2024, 1, 100, 0);
        c.sales_rep = "Lan".to_string();
        c.issues.set_count(IssueKind::Complaint, 1);

        let rows = sales_leaderboard(&[a, b, c]);
        assert_eq!(rows[0].name, "Minh");
        assert_eq!(rows[1].name, "Lan");
        assert_eq!(rows[1].revenue, 200);
        assert_eq!(rows[1].issues, 3);
        assert_eq!(rows[1].count, 2);
    }

    #[test]
    fn test_impl_leaderboard_ranks_by_volume() {
        let mut a = signed("a", 2024, 1, 1000, 900);
        a.impl_rep = "Hoa".to_string();
        let mut b = signed("b", 2024, 1, 100, 10);
        b.impl_rep = "Tuan".to_string();
        b.days_late = 3;
        let mut c = signed("c", 2024, 1, 100, 10);
        c.impl_rep = "Tuan".to_string();
        c.issues.set_count(IssueKind::SoftwareError, 5);

        let rows = impl_leaderboard(&[a, b, c]);
        assert_eq!(rows[0].name, "Tuan");
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[0].revenue, 20);
        assert_eq!(rows[0].issues, 2);
        assert_eq!(rows[1].name, "Hoa");
        assert_eq!(rows[1].revenue, 900);
    }
}
