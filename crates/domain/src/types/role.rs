//! Roles and role assignments

use serde::{Deserialize, Serialize};

/// Body of an assign-role call, e.g. `{"assignee": "@user", "role": "curator"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub assignee: String,
    pub role: String,
}

impl RoleAssignment {
    pub fn new(assignee: impl Into<String>, role: impl Into<String>) -> Self {
        Self { assignee: assignee.into(), role: role.into() }
    }
}

/// An existing assignment as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignmentReadOnly {
    pub id: u64,
    pub assignee: String,
    pub role_id: u64,
    #[serde(rename = "_roleAlias", default)]
    pub role_alias: Option<String>,
    #[serde(default)]
    pub definition_point_id: Option<u64>,
    #[serde(default)]
    pub private_url_token: Option<String>,
}

/// A role defined on a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[serde(default)]
    pub id: Option<u64>,
    pub alias: String,
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner_id: Option<u64>,
}
