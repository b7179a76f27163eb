//! Data files and their metadata

use serde::{Deserialize, Serialize};

use super::dataset::{Embargo, RetentionPeriod};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checksum {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

/// The `dataFile` part of a file metadata record.
///
/// `md5`, `dataTables`, `varGroups` and `isPartOf` are sent by some server
/// versions and ignored here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataFile {
    pub id: Option<u64>,
    pub persistent_id: Option<String>,
    #[serde(rename = "pidURL")]
    pub pid_url: Option<String>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub friendly_type: Option<String>,
    pub filesize: Option<u64>,
    pub description: Option<String>,
    pub categories: Vec<String>,
    pub embargo: Option<Embargo>,
    pub retention: Option<RetentionPeriod>,
    pub storage_identifier: Option<String>,
    pub original_file_format: Option<String>,
    pub original_format_label: Option<String>,
    pub original_file_size: Option<u64>,
    pub original_file_name: Option<String>,
    #[serde(rename = "UNF")]
    pub unf: Option<String>,
    pub root_data_file_id: Option<i64>,
    pub previous_data_file_id: Option<i64>,
    pub checksum: Option<Checksum>,
    pub tabular_data: Option<bool>,
    pub tabular_tags: Vec<String>,
    pub creation_date: Option<String>,
    pub publication_date: Option<String>,
    pub file_access_request: Option<bool>,
    pub restricted: Option<bool>,
    pub file_metadata_id: Option<u64>,
}

/// File metadata as listed in a dataset version, and as sent with add/replace.
///
/// The server reads `restrict` on upload but reports `restricted`; both land
/// in [`FileMeta::restricted`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_version_id: Option<u64>,
    #[serde(rename = "restrict", alias = "restricted", skip_serializing_if = "Option::is_none")]
    pub restricted: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<DataFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_replace: Option<bool>,
}

/// Data of an add-file or replace-file response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileList {
    #[serde(default)]
    pub files: Vec<FileMeta>,
}

/// Inclusive byte range for partial downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileRange {
    pub start: u64,
    pub end: u64,
}

impl FileRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Value for the `Range` request header, e.g. `bytes=0-99`.
    pub fn header_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }
}

/// Query options of the basic file access API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDownloadOptions {
    /// `original`, `RData`, `prep` or `subset`.
    pub format: Option<String>,
    /// Thumbnail size in pixels, or `true` for the default size.
    pub image_thumb: Option<String>,
    /// Drop the header row of tabular files.
    pub no_var_header: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_header_is_inclusive_bytes() {
        assert_eq!(FileRange::new(0, 99).header_value(), "bytes=0-99");
    }

    #[test]
    fn restricted_and_restrict_are_the_same_field() {
        let read: FileMeta = serde_json::from_str(r#"{"label":"a.txt","restricted":true}"#)
            .expect("restricted");
        let sent: FileMeta =
            serde_json::from_str(r#"{"label":"a.txt","restrict":true}"#).expect("restrict");
        assert_eq!(read.restricted, Some(true));
        assert_eq!(read, sent);

        let json = serde_json::to_value(&sent).expect("serialize");
        assert_eq!(json["restrict"], serde_json::Value::Bool(true));
    }

    #[test]
    fn data_file_ignores_legacy_properties() {
        let json = r#"{
            "id": 12,
            "filename": "data.csv",
            "md5": "2b4ca2bd7f5e2f0e3d0c4ee8d25e1e57",
            "checksum": {"type": "MD5", "value": "2b4ca2bd7f5e2f0e3d0c4ee8d25e1e57"},
            "isPartOf": {"id": 3},
            "UNF": "UNF:6:abc"
        }"#;
        let file: DataFile = serde_json::from_str(json).expect("data file");
        assert_eq!(file.id, Some(12));
        assert_eq!(file.checksum.expect("checksum").kind, "MD5");
        assert_eq!(file.unf.as_deref(), Some("UNF:6:abc"));
    }
}
