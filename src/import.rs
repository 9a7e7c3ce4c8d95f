//! Data import wizard: upload or connect, map columns, review validation,
//! confirm. Parsing spreadsheets is a collaborator's job; the wizard only
//! tracks the user's choices and gates each step.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{DashboardError, FieldErrors};
use crate::types::{ImportHistoryEntry, ImportSource, ImportStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportStep {
    Upload,
    MapFields,
    Validation,
    Confirmation,
}

impl ImportStep {
    pub fn next(&self) -> Option<ImportStep> {
        match self {
            ImportStep::Upload => Some(ImportStep::MapFields),
            ImportStep::MapFields => Some(ImportStep::Validation),
            ImportStep::Validation => Some(ImportStep::Confirmation),
            ImportStep::Confirmation => None,
        }
    }

    pub fn previous(&self) -> Option<ImportStep> {
        match self {
            ImportStep::Upload => None,
            ImportStep::MapFields => Some(ImportStep::Upload),
            ImportStep::Validation => Some(ImportStep::MapFields),
            ImportStep::Confirmation => Some(ImportStep::Validation),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ImportStep::Upload => "Upload / Connect",
            ImportStep::MapFields => "Map Fields",
            ImportStep::Validation => "Validation",
            ImportStep::Confirmation => "Confirmation",
        }
    }
}

/// System fields a spreadsheet column can map to: (name, required).
pub const SYSTEM_FIELDS: [(&str, bool); 6] = [
    ("Project Name", true),
    ("Client Name", true),
    ("Sales Owner", true),
    ("Contract Value", true),
    ("Start Date", false),
    ("Deadline", true),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    pub system: &'static str,
    pub required: bool,
    pub column: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowError {
    /// 1-based spreadsheet row.
    pub row: u32,
    pub reason: String,
}

/// Outcome of checking the mapped rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub rows_total: u32,
    pub errors: Vec<RowError>,
}

impl ValidationReport {
    pub fn rows_failed(&self) -> u32 {
        u32::try_from(self.errors.len())
            .unwrap_or(u32::MAX)
            .min(self.rows_total)
    }

    pub fn rows_valid(&self) -> u32 {
        self.rows_total - self.rows_failed()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportWizard {
    source: ImportSource,
    step: ImportStep,
    file_name: Option<String>,
    url: String,
    mappings: Vec<FieldMapping>,
    report: Option<ValidationReport>,
    skip_errors: bool,
    acknowledged: bool,
}

fn single_error(field: &str, message: &str) -> DashboardError {
    DashboardError::Validation(FieldErrors::from([(field.to_string(), message.to_string())]))
}

impl ImportWizard {
    pub fn new(source: ImportSource) -> Self {
        Self {
            source,
            step: ImportStep::Upload,
            file_name: None,
            url: String::new(),
            mappings: SYSTEM_FIELDS
                .iter()
                .map(|&(system, required)| FieldMapping {
                    system,
                    required,
                    column: None,
                })
                .collect(),
            report: None,
            skip_errors: true,
            acknowledged: false,
        }
    }

    pub fn step(&self) -> ImportStep {
        self.step
    }

    pub fn source(&self) -> ImportSource {
        self.source
    }

    pub fn mappings(&self) -> &[FieldMapping] {
        &self.mappings
    }

    pub fn report(&self) -> Option<&ValidationReport> {
        self.report.as_ref()
    }

    pub fn select_file(&mut self, name: impl Into<String>) {
        self.file_name = Some(name.into());
        self.invalidate_report();
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
        self.invalidate_report();
    }

    /// Map `system` field to a spreadsheet column; an empty column unmaps it.
    /// A changed mapping discards the validation report.
    pub fn map(&mut self, system: &str, column: &str) -> Result<(), DashboardError> {
        let mapping = self
            .mappings
            .iter_mut()
            .find(|m| m.system == system)
            .ok_or_else(|| single_error(system, "Unknown system field"))?;
        let column = (!column.trim().is_empty()).then(|| column.to_string());
        if mapping.column != column {
            mapping.column = column;
            self.invalidate_report();
        }
        Ok(())
    }

    fn invalidate_report(&mut self) {
        if self.report.take().is_some() {
            log::debug!("Import source or mapping changed, validation report discarded");
        }
        self.acknowledged = false;
    }

    pub fn set_report(&mut self, report: ValidationReport) {
        self.report = Some(report);
    }

    pub fn set_skip_errors(&mut self, skip: bool) {
        self.skip_errors = skip;
    }

    pub fn acknowledge(&mut self, acknowledged: bool) {
        self.acknowledged = acknowledged;
    }

    /// Name recorded in history: the file for Excel, the URL for Google Sheets.
    fn source_label(&self) -> Option<String> {
        match self.source {
            ImportSource::Excel => self.file_name.clone().filter(|f| !f.trim().is_empty()),
            ImportSource::GoogleSheet => {
                (!self.url.trim().is_empty()).then(|| self.url.trim().to_string())
            }
        }
    }

    fn check_step(&self) -> Result<(), DashboardError> {
        match self.step {
            ImportStep::Upload => {
                if self.source_label().is_none() {
                    let (field, message) = match self.source {
                        ImportSource::Excel => ("file", "Choose an .xlsx file"),
                        ImportSource::GoogleSheet => ("url", "Paste the Google Sheet link"),
                    };
                    return Err(single_error(field, message));
                }
            }
            ImportStep::MapFields => {
                let missing: FieldErrors = self
                    .mappings
                    .iter()
                    .filter(|m| m.required && m.column.is_none())
                    .map(|m| (m.system.to_string(), "Required field is not mapped".to_string()))
                    .collect();
                if !missing.is_empty() {
                    return Err(DashboardError::Validation(missing));
                }
            }
            ImportStep::Validation => match &self.report {
                None => return Err(single_error("report", "Validation has not run")),
                Some(report) if report.rows_failed() > 0 && !self.skip_errors => {
                    return Err(single_error(
                        "skipErrors",
                        "Fix the failing rows or skip them",
                    ));
                }
                Some(_) => {}
            },
            ImportStep::Confirmation => {
                if !self.acknowledged {
                    return Err(single_error("acknowledged", "Confirm that you understand the risk"));
                }
            }
        }
        Ok(())
    }

    pub fn next(&mut self) -> Result<ImportStep, DashboardError> {
        let target = self.step.next().ok_or_else(|| DashboardError::StepUnavailable {
            current: self.step.title().to_string(),
            target: "next".to_string(),
        })?;
        self.check_step()?;
        self.step = target;
        Ok(target)
    }

    pub fn back(&mut self) -> Result<ImportStep, DashboardError> {
        let target = self.step.previous().ok_or_else(|| DashboardError::StepUnavailable {
            current: self.step.title().to_string(),
            target: "previous".to_string(),
        })?;
        self.step = target;
        Ok(target)
    }

    /// Complete the import from the confirmation step.
    pub fn finish(
        &self,
        imported_by: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<ImportHistoryEntry, DashboardError> {
        if self.step != ImportStep::Confirmation {
            return Err(DashboardError::StepUnavailable {
                current: self.step.title().to_string(),
                target: "finish".to_string(),
            });
        }
        self.check_step()?;

        let report = self.report.clone().unwrap_or_default();
        let rows_failed = report.rows_failed();
        let rows_success = report.rows_valid();
        let status = if rows_failed == 0 {
            ImportStatus::Success
        } else if rows_success == 0 {
            ImportStatus::Failed
        } else {
            ImportStatus::Partial
        };

        let entry = ImportHistoryEntry {
            id: format!("imp-{}", Uuid::new_v4()),
            timestamp,
            file_name: self.source_label().unwrap_or_default(),
            source: self.source,
            imported_by: imported_by.to_string(),
            rows_total: report.rows_total,
            rows_success,
            rows_failed,
            status,
        };
        log::info!(
            "Import {} finished: {}/{} rows",
            entry.file_name,
            entry.rows_success,
            entry.rows_total
        );
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 1, 10, 0, 0).unwrap()
    }

    fn map_required(wizard: &mut ImportWizard) {
        for (system, required) in SYSTEM_FIELDS {
            if required {
                wizard.map(system, "Column").unwrap();
            }
        }
    }

    fn report(total: u32, failing: &[u32]) -> ValidationReport {
        ValidationReport {
            rows_total: total,
            errors: failing
                .iter()
                .map(|row| RowError {
                    row: *row,
                    reason: "Missing required field \"Deadline\"".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_upload_requires_source() {
        let mut excel = ImportWizard::new(ImportSource::Excel);
        let err = excel.next().unwrap_err();
        assert!(err.field_errors().contains_key("file"));
        excel.select_file("projects.xlsx");
        assert_eq!(excel.next().unwrap(), ImportStep::MapFields);

        let mut sheet = ImportWizard::new(ImportSource::GoogleSheet);
        sheet.set_url("   ");
        assert!(sheet.next().unwrap_err().field_errors().contains_key("url"));
        sheet.set_url("https://docs.google.com/spreadsheets/d/abc");
        assert!(sheet.next().is_ok());
    }

    #[test]
    fn test_mapping_requires_required_fields() {
        let mut wizard = ImportWizard::new(ImportSource::Excel);
        wizard.select_file("projects.xlsx");
        wizard.next().unwrap();

        wizard.map("Project Name", "B").unwrap();
        let errors = wizard.next().unwrap_err().field_errors();
        assert_eq!(errors.len(), 4);
        assert!(!errors.contains_key("Start Date"));

        map_required(&mut wizard);
        assert_eq!(wizard.next().unwrap(), ImportStep::Validation);
        assert!(wizard.map("Budget Code", "Z").is_err());
    }

    #[test]
    fn test_full_flow_produces_history_entry() {
        let mut wizard = ImportWizard::new(ImportSource::Excel);
        wizard.select_file("q1.xlsx");
        wizard.next().unwrap();
        map_required(&mut wizard);
        wizard.next().unwrap();
        assert!(wizard.next().is_err());
        wizard.set_report(report(156, &[12, 13, 45, 67, 89, 92, 101, 140]));
        wizard.next().unwrap();

        assert!(wizard.finish("Admin", ts()).is_err());
        wizard.acknowledge(true);
        let entry = wizard.finish("Admin", ts()).unwrap();
        assert_eq!(entry.rows_total, 156);
        assert_eq!(entry.rows_success, 148);
        assert_eq!(entry.rows_failed, 8);
        assert_eq!(entry.status, ImportStatus::Partial);
        assert_eq!(entry.file_name, "q1.xlsx");
        assert!(entry.id.starts_with("imp-"));
    }

    #[test]
    fn test_failing_rows_block_without_skip() {
        let mut wizard = ImportWizard::new(ImportSource::Excel);
        wizard.select_file("q1.xlsx");
        wizard.next().unwrap();
        map_required(&mut wizard);
        wizard.next().unwrap();
        wizard.set_report(report(3, &[2]));
        wizard.set_skip_errors(false);
        assert!(wizard.next().is_err());
        wizard.set_skip_errors(true);
        assert_eq!(wizard.next().unwrap(), ImportStep::Confirmation);
    }

    #[test]
    fn test_remapping_discards_report() {
        let mut wizard = ImportWizard::new(ImportSource::Excel);
        wizard.select_file("q1.xlsx");
        wizard.next().unwrap();
        map_required(&mut wizard);
        wizard.next().unwrap();
        wizard.set_report(report(10, &[]));

        wizard.back().unwrap();
        map_required(&mut wizard);
        assert!(wizard.report().is_some());

        wizard.map("Deadline", "F").unwrap();
        assert!(wizard.report().is_none());
        wizard.next().unwrap();
        let err = wizard.next().unwrap_err();
        assert!(err.field_errors().contains_key("report"));
        assert_eq!(wizard.step(), ImportStep::Validation);
    }

    #[test]
    fn test_back_is_free_except_at_start() {
        let mut wizard = ImportWizard::new(ImportSource::Excel);
        assert!(wizard.back().is_err());
        wizard.select_file("a.xlsx");
        wizard.next().unwrap();
        assert_eq!(wizard.back().unwrap(), ImportStep::Upload);
        assert!(wizard.finish("Admin", ts()).is_err());
    }

    #[test]
    fn test_report_counts() {
        let r = report(2, &[1, 2, 3]);
        assert_eq!(r.rows_failed(), 2);
        assert_eq!(r.rows_valid(), 0);
    }
}
