//! Field-by-field comparison of a draft against its original record.

use serde::Serialize;

use crate::types::{FieldValue, Project, ProjectField};

/// One changed field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    pub field: ProjectField,
    pub old: FieldValue,
    pub new: FieldValue,
}

/// Every field whose value differs, in form order.
pub fn diff(original: &Project, draft: &Project) -> Vec<FieldChange> {
    ProjectField::all()
        .into_iter()
        .filter_map(|field| {
            let old = original.get(field);
            let new = draft.get(field);
            (old != new).then_some(FieldChange { field, old, new })
        })
        .collect()
}

pub fn field_changed(original: &Project, draft: &Project, field: ProjectField) -> bool {
    original.get(field) != draft.get(field)
}
