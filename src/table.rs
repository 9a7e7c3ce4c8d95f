//! Drill-down project table: free-text search, pagination and footer totals.

use serde::Serialize;

use crate::types::Project;
use crate::util::contains_ci;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableTotals {
    pub signed: u64,
    pub revenue: u64,
    pub remaining: i64,
}

/// One page of the table plus the figures its header and footer show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePage {
    pub rows: Vec<Project>,
    /// 1-based current page after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
    /// 1-based index of the first row shown; 0 when nothing matches.
    pub start: usize,
    /// 1-based index of the last row shown.
    pub end: usize,
    /// Totals over every match, not just this page.
    pub totals: TableTotals,
}

/// Projects whose name or client contains `term`, ignoring case.
pub fn search_projects<'a>(projects: &'a [Project], term: &str) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|p| contains_ci(&p.name, term) || contains_ci(&p.client, term))
        .collect()
}

pub fn table_totals<'a>(projects: impl IntoIterator<Item = &'a Project>) -> TableTotals {
    projects
        .into_iter()
        .fold(TableTotals::default(), |acc, p| TableTotals {
            signed: acc.signed + p.value_signed,
            revenue: acc.revenue + p.revenue_recognized,
            remaining: acc.remaining + p.remaining_value(),
        })
}

/// Search, then cut page `page` (1-based, clamped into range) of `page_size` rows.
pub fn table_page(projects: &[Project], term: &str, page: usize, page_size: usize) -> TablePage {
    let page_size = page_size.max(1);
    let matches = search_projects(projects, term);
    let total_matches = matches.len();
    let total_pages = total_matches.div_ceil(page_size);
    let page = page.clamp(1, total_pages.max(1));

    let start_index = (page - 1) * page_size;
    let end_index = (start_index + page_size).min(total_matches);
    let rows: Vec<Project> = matches
        .get(start_index..end_index)
        .unwrap_or_default()
        .iter()
        .map(|p| (*p).clone())
        .collect();

    TablePage {
        rows,
        page,
        total_pages,
        total_matches,
        start: if total_matches > 0 { start_index + 1 } else { 0 },
        end: end_index,
        totals: table_totals(matches.iter().copied()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_project;

    fn many(n: usize) -> Vec<Project> {
        (0..n)
            .map(|i| {
                let mut p = sample_project(&format!("p{i}"));
                p.name = format!("Project {i}");
                p.value_signed = 100;
                p.revenue_recognized = 40;
                p
            })
            .collect()
    }

    #[test]
    fn test_search_matches_name_or_client_case_insensitive() {
        let mut a = sample_project("a");
        a.name = "ERP Rollout".to_string();
        let mut b = sample_project("b");
        b.client = "Erp Holdings".to_string();
        let c = sample_project("c");
        let projects = vec![a, b, c];

        let hits = search_projects(&projects, "erp");
        assert_eq!(hits.len(), 2);
        assert_eq!(search_projects(&projects, "").len(), 3);
    }

    #[test]
    fn test_pagination_ranges() {
        let projects = many(45);
        let page = table_page(&projects, "", 3, 20);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.rows.len(), 5);
        assert_eq!((page.start, page.end), (41, 45));
        assert_eq!(page.totals.signed, 4500);
        assert_eq!(page.totals.remaining, 45 * 60);
    }

    #[test]
    fn test_page_is_clamped() {
        let projects = many(5);
        let page = table_page(&projects, "", 9, 20);
        assert_eq!(page.page, 1);
        assert_eq!(page.rows.len(), 5);

        let page = table_page(&projects, "", 0, 2);
        assert_eq!(page.page, 1);
        assert_eq!((page.start, page.end), (1, 2));
    }

    #[test]
    fn test_empty_result() {
        let projects = many(3);
        let page = table_page(&projects, "nothing like this", 1, 20);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_matches, 0);
        assert_eq!((page.start, page.end), (0, 0));
        assert!(page.rows.is_empty());
        assert_eq!(page.totals, TableTotals::default());
    }
}
