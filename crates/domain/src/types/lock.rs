//! Dataset locks

use serde::{Deserialize, Serialize};

/// Lock types the server is known to set.
pub mod lock_type {
    pub const INGEST: &str = "Ingest";
    pub const WORKFLOW: &str = "Workflow";
    pub const IN_REVIEW: &str = "InReview";
    pub const DCM_UPLOAD: &str = "DcmUpload";
    pub const GLOBUS_UPLOAD: &str = "GlobusUpload";
    pub const FINALIZE_PUBLICATION: &str = "finalizePublication";
    pub const EDIT_IN_PROGRESS: &str = "EditInProgress";
    pub const FILE_VALIDATION_FAILED: &str = "FileValidationFailed";
}

/// One entry of `GET /api/datasets/{id}/locks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lock {
    pub lock_type: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub dataset: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Lock {
    pub fn new(lock_type: impl Into<String>) -> Self {
        Self { lock_type: lock_type.into(), date: None, user: None, dataset: None, message: None }
    }
}
