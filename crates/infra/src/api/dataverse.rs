//! Collection endpoints (`api/dataverses/<alias>/...`)

use dataverse_core::{ListOf, Plain, ResponseHandle};
use dataverse_domain::{
    DataMessage, DatasetCreationResult, Dataverse, DataverseItem, MetadataBlockSummary, Result,
    Role, RoleAssignmentReadOnly,
};
use tracing::instrument;

use super::client::DataverseClient;
use crate::http::{HttpRequest, RequestBody};

const DATAVERSES_BASE: &str = "api/dataverses/";

/// Operations on one collection, addressed by alias (or `:root`).
pub struct DataverseApi<'a> {
    client: &'a DataverseClient,
    alias: String,
}

impl<'a> DataverseApi<'a> {
    pub(crate) fn new(client: &'a DataverseClient, alias: String) -> Self {
        Self { client, alias }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    fn path(&self, endpoint: &str) -> String {
        let endpoint = endpoint.trim_matches('/');
        if endpoint.is_empty() {
            format!("{DATAVERSES_BASE}{}", self.alias)
        } else {
            format!("{DATAVERSES_BASE}{}/{endpoint}", self.alias)
        }
    }

    /// Create `dataverse` as a child of this collection.
    ///
    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    #[instrument(skip(self, dataverse), fields(parent = %self.alias, alias = %dataverse.alias))]
    pub fn create(&self, dataverse: &Dataverse) -> Result<ResponseHandle<Plain<Dataverse>>> {
        self.client.call(HttpRequest::post(self.path("")).json(dataverse)?)
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn view(&self) -> Result<ResponseHandle<Plain<Dataverse>>> {
        self.client.call(HttpRequest::get(self.path("")))
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    #[instrument(skip(self), fields(alias = %self.alias))]
    pub fn delete(&self) -> Result<ResponseHandle<Plain<DataMessage>>> {
        self.client.call(HttpRequest::delete(self.path("")))
    }

    /// Child collections and datasets.
    ///
    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn list_contents(&self) -> Result<ResponseHandle<ListOf<DataverseItem>>> {
        self.client.call(HttpRequest::get(self.path("contents")))
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn get_storage_size(&self) -> Result<ResponseHandle<Plain<DataMessage>>> {
        self.client.call(HttpRequest::get(self.path("storagesize")))
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn list_roles(&self) -> Result<ResponseHandle<ListOf<Role>>> {
        self.client.call(HttpRequest::get(self.path("roles")))
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn list_role_assignments(&self) -> Result<ResponseHandle<ListOf<RoleAssignmentReadOnly>>> {
        self.client.call(HttpRequest::get(self.path("assignments")))
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn list_metadata_blocks(&self) -> Result<ResponseHandle<ListOf<MetadataBlockSummary>>> {
        self.client.call(HttpRequest::get(self.path("metadatablocks")))
    }

    /// Whether the collection defines its own metadata blocks.
    ///
    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn is_metadata_blocks_root(&self) -> Result<ResponseHandle<Plain<bool>>> {
        self.client.call(HttpRequest::get(self.path("metadatablocks/isRoot")))
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn set_metadata_blocks_root(&self, root: bool) -> Result<ResponseHandle<Plain<DataMessage>>> {
        self.client
            .call(HttpRequest::put(self.path("metadatablocks/isRoot")).text(root.to_string()))
    }

    /// Create a dataset in this collection from its JSON representation.
    ///
    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    #[instrument(skip(self, dataset_json), fields(alias = %self.alias))]
    pub fn create_dataset(
        &self,
        dataset_json: &str,
    ) -> Result<ResponseHandle<Plain<DatasetCreationResult>>> {
        self.client.call(HttpRequest::post(self.path("datasets")).body(
            RequestBody::Json(dataset_json.to_string()),
        ))
    }

    /// Import a dataset that already has a persistent identifier.
    ///
    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    #[instrument(skip(self, dataset_json), fields(alias = %self.alias))]
    pub fn import_dataset(
        &self,
        dataset_json: &str,
        pid: &str,
        release: bool,
    ) -> Result<ResponseHandle<Plain<DatasetCreationResult>>> {
        let request = HttpRequest::post(self.path("datasets/:import"))
            .param("pid", pid)
            .param("release", if release { "yes" } else { "no" })
            .body(RequestBody::Json(dataset_json.to_string()));
        self.client.call(request)
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    #[instrument(skip(self), fields(alias = %self.alias))]
    pub fn publish(&self) -> Result<ResponseHandle<Plain<Dataverse>>> {
        self.client.call(HttpRequest::post(self.path("actions/:publish")))
    }
}
