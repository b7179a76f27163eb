//! Search API options and results

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchItemType {
    Dataverse,
    Dataset,
    File,
}

impl SearchItemType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dataverse => "dataverse",
            Self::Dataset => "dataset",
            Self::File => "file",
        }
    }
}

/// Query options for `GET /api/search`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub types: Vec<SearchItemType>,
    pub filter_queries: Vec<String>,
    pub sub_trees: Vec<String>,
    pub sort_field: Option<String>,
    pub order: Option<String>,
    pub per_page: u32,
    pub start: u32,
    pub show_relevance: bool,
    pub show_facets: bool,
    pub show_entity_ids: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            types: Vec::new(),
            filter_queries: Vec::new(),
            sub_trees: Vec::new(),
            sort_field: None,
            order: None,
            per_page: 10,
            start: 0,
            show_relevance: false,
            show_facets: false,
            show_entity_ids: false,
        }
    }
}

/// Data of a search response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    pub q: Option<String>,
    pub total_count: u64,
    pub start: u64,
    pub count_in_response: u64,
    pub items: Vec<ResultItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResultItem {
    Dataverse(DataverseResultItem),
    Dataset(DatasetResultItem),
    File(FileResultItem),
}

impl ResultItem {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Dataverse(item) => item.name.as_deref(),
            Self::Dataset(item) => item.name.as_deref(),
            Self::File(item) => item.name.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataverseResultItem {
    pub name: Option<String>,
    pub url: Option<String>,
    pub identifier: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatasetResultItem {
    pub name: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "global_id")]
    pub global_id: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "published_at")]
    pub published_at: Option<String>,
    pub publisher: Option<String>,
    pub citation_html: Option<String>,
    #[serde(rename = "identifier_of_dataverse")]
    pub identifier_of_dataverse: Option<String>,
    #[serde(rename = "name_of_dataverse")]
    pub name_of_dataverse: Option<String>,
    pub citation: Option<String>,
    pub storage_identifier: Option<String>,
    pub subjects: Vec<String>,
    pub file_count: Option<u64>,
    pub version_id: Option<u64>,
    pub version_state: Option<String>,
    pub major_version: Option<u32>,
    pub minor_version: Option<u32>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub authors: Vec<String>,
    pub publications: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileResultItem {
    pub name: Option<String>,
    pub url: Option<String>,
    pub file_id: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<String>,
    pub file_type: Option<String>,
    pub file_content_type: Option<String>,
    pub size_in_bytes: Option<u64>,
    pub md5: Option<String>,
    pub dataset_name: Option<String>,
    pub dataset_id: Option<String>,
    pub dataset_persistent_id: Option<String>,
}
