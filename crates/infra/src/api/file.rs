//! File endpoints (`api/v1/files/...`)

use std::path::Path;

use dataverse_core::{Plain, RawResponse, ResponseHandle};
use dataverse_domain::{DataverseError, FileList, FileMeta, Result};
use tracing::instrument;

use super::client::DataverseClient;
use super::target::Target;
use crate::errors::conversions::to_domain;
use crate::http::{HttpRequest, MultipartUpload};

pub struct FileApi<'a> {
    client: &'a DataverseClient,
    target: Target,
}

impl<'a> FileApi<'a> {
    pub(crate) fn new(client: &'a DataverseClient, target: Target) -> Self {
        Self { client, target }
    }

    pub fn with_invocation_id(mut self, invocation_id: impl Into<String>) -> Self {
        self.target = self.target.with_invocation_id(invocation_id);
        self
    }

    fn post(&self, endpoint: &str) -> HttpRequest {
        HttpRequest::post(self.target.path(endpoint))
            .params(self.target.params())
            .headers(self.target.headers())
    }

    /// Replace the file content and/or its metadata.
    ///
    /// # Errors
    /// `DataverseError::InvalidArgument` when neither a file nor metadata is
    /// given; `DataverseError::Api` or `DataverseError::Transport` on failure.
    #[instrument(skip(self, meta), fields(file = %self.target.id()))]
    pub fn replace(
        &self,
        file: Option<&Path>,
        meta: Option<&FileMeta>,
    ) -> Result<ResponseHandle<Plain<FileList>>> {
        if file.is_none() && meta.is_none() {
            return Err(DataverseError::InvalidArgument(
                "replacing a file needs new content or new metadata".to_string(),
            ));
        }
        let json = meta.map(serde_json::to_string).transpose().map_err(to_domain)?;
        let request = self.post("replace").multipart(MultipartUpload::new(file, json))?;
        self.client.call(request)
    }

    /// Update the metadata of the file. The server answers with plain text, so
    /// the raw response is returned.
    ///
    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    #[instrument(skip(self, meta), fields(file = %self.target.id()))]
    pub fn update_metadata(&self, meta: &FileMeta) -> Result<RawResponse> {
        let json = serde_json::to_string(meta).map_err(to_domain)?;
        let request = self.post("metadata").multipart(MultipartUpload::new(None, Some(json)))?;
        self.client.transport().send(request)
    }
}
