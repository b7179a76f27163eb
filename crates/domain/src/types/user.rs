use serde::{Deserialize, Serialize};

/// Account details returned by `/api/admin/authenticatedUsers/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthenticatedUser {
    pub id: Option<u64>,
    pub identifier: Option<String>,
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub superuser: Option<bool>,
    pub deactivated: Option<bool>,
    pub affiliation: Option<String>,
    pub position: Option<String>,
    pub persistent_user_id: Option<String>,
    pub email_last_confirmed: Option<String>,
    pub created_time: Option<String>,
    pub last_login_time: Option<String>,
    pub last_api_use_time: Option<String>,
    pub authentication_provider_id: Option<String>,
}
