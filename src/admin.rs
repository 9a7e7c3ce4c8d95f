//! Role permission matrix for the admin screen.

use serde::Serialize;

use crate::types::{Permission, UserRole};

/// Access a role has to one permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Grant {
    Allowed,
    Denied,
    /// Conditional access; treated as denied by `is_allowed`.
    Partial,
}

use Grant::{Allowed as Y, Denied as N};

/// (id, name, description, grants for Admin, Manager, Operator, Viewer)
const MATRIX: [(&str, &str, &str, [Grant; 4]); 9] = [
    ("view_dashboard", "View dashboard", "Open the overview page and KPI figures", [Y, Y, Y, Y]),
    ("view_project_detail", "View project detail", "See every field of a single project", [Y, Y, Y, Y]),
    ("create_project", "Create project", "Create projects and enter their initial data", [Y, Y, Y, N]),
    ("edit_project", "Edit project", "Update project data, progress and status", [Y, Y, Y, N]),
    ("close_project", "Close project", "Move a project to completed or cancelled", [Y, Y, N, N]),
    ("view_risk_board", "View risk board", "Open the risk board for risk analysis", [Y, Y, N, N]),
    ("view_ai_insight", "View AI insight", "See generated suggestions and analysis", [Y, Y, N, N]),
    ("manage_user_role", "Manage users & roles", "Add, edit and remove users and assign roles", [Y, N, N, N]),
    ("view_audit_log", "View audit log", "Browse the system change history", [Y, Y, N, N]),
];

fn role_column(role: UserRole) -> usize {
    match role {
        UserRole::Admin => 0,
        UserRole::Manager => 1,
        UserRole::Operator => 2,
        UserRole::Viewer => 3,
    }
}

/// Every permission, in display order.
pub fn permissions() -> Vec<Permission> {
    MATRIX
        .iter()
        .map(|(id, name, description, _)| Permission {
            id: id.to_string(),
            name: name.to_string(),
            description: Some(description.to_string()),
        })
        .collect()
}

/// Grant for `role` on `permission_id`; unknown permissions are denied.
pub fn grant(role: UserRole, permission_id: &str) -> Grant {
    MATRIX
        .iter()
        .find(|(id, ..)| *id == permission_id)
        .map(|(.., grants)| grants[role_column(role)])
        .unwrap_or(Grant::Denied)
}

pub fn is_allowed(role: UserRole, permission_id: &str) -> bool {
    grant(role, permission_id) == Grant::Allowed
}

/// One row of the rendered matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRow {
    pub permission: Permission,
    pub grants: Vec<(UserRole, Grant)>,
}

pub fn permission_matrix() -> Vec<PermissionRow> {
    permissions()
        .into_iter()
        .map(|permission| {
            let grants = UserRole::ALL
                .iter()
                .map(|role| (*role, grant(*role, &permission.id)))
                .collect();
            PermissionRow { permission, grants }
        })
        .collect()
}
