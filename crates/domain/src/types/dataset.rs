//! Datasets and dataset versions

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::file::FileMeta;
use super::license::License;
use super::metadata::MetadataBlock;

/// Version bump requested when publishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateType {
    Major,
    Minor,
    /// Replace the current version without a version bump (superusers only).
    UpdateCurrent,
}

impl UpdateType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::UpdateCurrent => "updatecurrent",
        }
    }
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A version of a dataset. `isPartOf` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatasetVersion {
    pub id: Option<u64>,
    pub dataset_id: Option<u64>,
    pub dataset_persistent_id: Option<String>,
    pub storage_identifier: Option<String>,
    pub version_number: Option<u32>,
    pub version_minor_number: Option<u32>,
    pub version_state: Option<String>,
    pub latest_version_publishing_state: Option<String>,
    pub version_note: Option<String>,
    #[serde(rename = "UNF")]
    pub unf: Option<String>,
    pub last_update_time: Option<String>,
    pub release_time: Option<String>,
    pub create_time: Option<String>,
    pub distribution_date: Option<String>,
    pub production_date: Option<String>,
    pub file_access_request: Option<bool>,
    pub terms_of_use: Option<String>,
    pub confidentiality_declaration: Option<String>,
    pub special_permissions: Option<String>,
    pub restrictions: Option<String>,
    pub citation_requirements: Option<String>,
    pub depositor_requirements: Option<String>,
    pub conditions: Option<String>,
    pub disclaimer: Option<String>,
    pub terms_of_access: Option<String>,
    pub data_access_place: Option<String>,
    pub original_archive: Option<String>,
    pub availability_status: Option<String>,
    pub contact_for_access: Option<String>,
    pub size_of_collection: Option<String>,
    pub study_completion: Option<String>,
    pub license: Option<License>,
    pub protocol: Option<String>,
    pub authority: Option<String>,
    pub identifier: Option<String>,
    pub metadata_blocks: BTreeMap<String, MetadataBlock>,
    pub files: Vec<FileMeta>,
    pub citation: Option<String>,
    pub publication_date: Option<String>,
    pub citation_date: Option<String>,
    pub alternative_persistent_id: Option<String>,
}

/// Data of `GET /api/datasets/{id}`: the dataset with its latest version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatasetLatestVersion {
    pub id: Option<u64>,
    pub identifier: Option<String>,
    pub persistent_url: Option<String>,
    pub protocol: Option<String>,
    pub authority: Option<String>,
    pub publisher: Option<String>,
    pub publication_date: Option<String>,
    pub storage_identifier: Option<String>,
    pub metadata_language: Option<String>,
    pub latest_version: DatasetVersion,
}

/// Data of a publish or release-migrated call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatasetPublicationResult {
    pub id: Option<u64>,
    pub identifier: Option<String>,
    pub persistent_url: Option<String>,
    pub protocol: Option<String>,
    pub authority: Option<String>,
    pub publisher: Option<String>,
    pub publication_date: Option<String>,
    pub storage_identifier: Option<String>,
}

/// Data of a create or import dataset call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatasetCreationResult {
    pub id: Option<u64>,
    pub persistent_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitForReviewResult {
    pub in_review: bool,
    pub message: Option<String>,
}

/// Body of `files/actions/:set-embargo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Embargo {
    pub date_available: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_ids: Vec<u64>,
}

/// Body of `files/actions/:set-retention`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionPeriod {
    pub date_unavailable: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_ids: Vec<u64>,
}
