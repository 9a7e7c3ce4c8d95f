//! Static enumerations and people lists that populate filter and form dropdowns.

use serde::{Deserialize, Serialize};

use crate::filter::FilterField;
use crate::types::{ProjectStatus, RiskLevel};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roster {
    /// Sign years offered, newest first.
    pub years: Vec<i32>,
    pub sales_reps: Vec<String>,
    pub impl_reps: Vec<String>,
}

impl Roster {
    /// Dropdown values for a filter, in the exact form the filter compares.
    pub fn options(&self, field: FilterField) -> Vec<String> {
        match field {
            FilterField::Year => self.years.iter().map(|y| y.to_string()).collect(),
            FilterField::Month => (1..=12).map(|m: u32| m.to_string()).collect(),
            FilterField::SalesRep => self.sales_reps.clone(),
            FilterField::ImplRep => self.impl_reps.clone(),
            FilterField::Status => ProjectStatus::known()
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
            FilterField::RiskLevel => RiskLevel::ALL.iter().map(|r| r.as_str().to_string()).collect(),
        }
    }

    /// Whether `value` is one of the options for `field`. Empty is always allowed.
    pub fn contains(&self, field: FilterField, value: &str) -> bool {
        value.is_empty() || self.options(field).iter().any(|o| o == value)
    }
}
