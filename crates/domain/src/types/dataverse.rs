//! Dataverse collections

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataverseContact {
    #[serde(default)]
    pub display_order: u32,
    pub contact_email: String,
}

/// A collection as returned by `GET /api/dataverses/{alias}`, and as posted
/// when creating one. `isPartOf` and `theme` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dataverse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,
    pub name: String,
    pub alias: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_root: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataverse_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_driver_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    pub dataverse_contacts: Vec<DataverseContact>,
    #[serde(rename = "filePIDsEnabled", skip_serializing_if = "Option::is_none")]
    pub file_pids_enabled: Option<bool>,
    #[serde(rename = "isReleased", skip_serializing_if = "Option::is_none")]
    pub is_released: Option<bool>,
}

/// One child of a collection, as listed by `contents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DataverseItem {
    Dataverse(DataverseChildCollection),
    Dataset(DataverseChildDataset),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataverseChildCollection {
    pub id: Option<u64>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataverseChildDataset {
    pub id: Option<u64>,
    pub identifier: Option<String>,
    pub persistent_url: Option<String>,
    pub protocol: Option<String>,
    pub authority: Option<String>,
    pub publisher: Option<String>,
    pub publication_date: Option<String>,
    pub storage_identifier: Option<String>,
    pub metadata_language: Option<String>,
}

/// Entry of `GET /api/dataverses/{alias}/metadatablocks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetadataBlockSummary {
    pub id: Option<u64>,
    pub name: String,
    pub display_name: String,
}
