//! Dataset endpoints (`api/datasets/...`)

use std::collections::BTreeMap;
use std::path::Path;

use dataverse_core::{
    await_lock_state, publish_with_retry, ListOf, LockCondition, LockSource, Plain, ResponseHandle,
};
use dataverse_domain::{
    DataMessage, DatasetLatestVersion, DatasetPublicationResult, DatasetVersion, DataverseError,
    Embargo, FieldList, FileList, FileMeta, Lock, Result, RetentionPeriod, RetryPolicy,
    RoleAssignment, RoleAssignmentReadOnly, SubmitForReviewResult, UpdateType,
};
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::client::DataverseClient;
use super::target::{metadata_key_params, Target};
use crate::http::{HttpRequest, MultipartUpload, RequestBody};

pub const VERSION_DRAFT: &str = ":draft";
pub const VERSION_LATEST: &str = ":latest";
pub const VERSION_LATEST_PUBLISHED: &str = ":latest-published";

/// Operations on one dataset.
pub struct DatasetApi<'a> {
    client: &'a DataverseClient,
    target: Target,
    metadata_keys: BTreeMap<String, String>,
}

impl<'a> DatasetApi<'a> {
    pub(crate) fn new(client: &'a DataverseClient, target: Target) -> Self {
        Self { client, target, metadata_keys: BTreeMap::new() }
    }

    pub fn with_invocation_id(mut self, invocation_id: impl Into<String>) -> Self {
        self.target = self.target.with_invocation_id(invocation_id);
        self
    }

    /// Keys for metadata blocks that require one to be edited, by block name.
    pub fn with_metadata_keys(mut self, keys: BTreeMap<String, String>) -> Self {
        self.metadata_keys = keys;
        self
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    fn request(&self, request: HttpRequest) -> HttpRequest {
        request.params(self.target.params()).headers(self.target.headers())
    }

    fn get(&self, endpoint: &str) -> HttpRequest {
        self.request(HttpRequest::get(self.target.path(endpoint)))
    }

    fn versioned_get(&self, version: &str, endpoint: &str) -> Result<HttpRequest> {
        if version.trim().is_empty() {
            return Err(DataverseError::InvalidArgument("version must not be blank".to_string()));
        }
        Ok(self.request(HttpRequest::get(self.target.versioned_path(version, endpoint))))
    }

    /// The dataset with its latest version.
    ///
    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn get_latest_version(&self) -> Result<ResponseHandle<Plain<DatasetLatestVersion>>> {
        self.client.call(self.get(""))
    }

    /// One version, e.g. `1.0`, [`VERSION_DRAFT`] or [`VERSION_LATEST_PUBLISHED`].
    ///
    /// # Errors
    /// `DataverseError::InvalidArgument` for a blank version, before sending.
    pub fn get_version(&self, version: &str) -> Result<ResponseHandle<Plain<DatasetVersion>>> {
        self.client.call(self.versioned_get(version, "")?)
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn get_all_versions(&self) -> Result<ResponseHandle<ListOf<DatasetVersion>>> {
        self.client.call(self.get("versions"))
    }

    /// # Errors
    /// `DataverseError::InvalidArgument` for a blank version, before sending.
    pub fn get_files(&self, version: &str) -> Result<ResponseHandle<ListOf<FileMeta>>> {
        self.client.call(self.versioned_get(version, "files")?)
    }

    /// Publish once. With `assure_is_indexed` the server answers 409 while
    /// indexing is still pending; see [`DatasetApi::publish_assure_indexed`].
    ///
    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    #[instrument(skip(self), fields(dataset = %self.target.id()))]
    pub fn publish(
        &self,
        update_type: UpdateType,
        assure_is_indexed: bool,
    ) -> Result<ResponseHandle<Plain<DatasetPublicationResult>>> {
        let request = self
            .request(HttpRequest::post(self.target.path("actions/:publish")))
            .param("type", update_type.as_str())
            .param("assureIsIndexed", assure_is_indexed.to_string());
        self.client.call(request)
    }

    /// Publish with `assureIsIndexed=true`, retrying on 409 with the
    /// configured indexing budget.
    ///
    /// # Errors
    /// `DataverseError::PublishRetryExhausted` when every try conflicted; any
    /// other failure on first occurrence.
    pub fn publish_assure_indexed(
        &self,
        update_type: UpdateType,
    ) -> Result<ResponseHandle<Plain<DatasetPublicationResult>>> {
        self.publish_assure_indexed_with(update_type, self.client.config().await_indexing)
    }

    /// As [`DatasetApi::publish_assure_indexed`] with an explicit budget.
    ///
    /// # Errors
    /// See [`DatasetApi::publish_assure_indexed`].
    pub fn publish_assure_indexed_with(
        &self,
        update_type: UpdateType,
        policy: RetryPolicy,
    ) -> Result<ResponseHandle<Plain<DatasetPublicationResult>>> {
        publish_with_retry(|| self.publish(update_type, true), self.client.sleeper(), policy)
    }

    /// Release a dataset migrated from another repository, with its original
    /// publication date in the JSON-LD body.
    ///
    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn release_migrated(
        &self,
        json_ld: &str,
        assure_is_indexed: bool,
    ) -> Result<ResponseHandle<Plain<DatasetPublicationResult>>> {
        let request = self
            .request(HttpRequest::post(self.target.path("actions/:releasemigrated")))
            .param("assureIsIndexed", assure_is_indexed.to_string())
            .json_ld(json_ld);
        self.client.call(request)
    }

    /// Add or replace metadata fields of the draft.
    ///
    /// The server treats any value of `replace` as true, so the parameter is
    /// only sent when replacing.
    ///
    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn edit_metadata(
        &self,
        fields: &FieldList,
        replace: bool,
    ) -> Result<ResponseHandle<Plain<DatasetVersion>>> {
        self.edit_metadata_request(RequestBody::json(fields)?, replace)
    }

    /// As [`DatasetApi::edit_metadata`] with a pre-serialized field list.
    ///
    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn edit_metadata_json(
        &self,
        json: &str,
        replace: bool,
    ) -> Result<ResponseHandle<Plain<DatasetVersion>>> {
        self.edit_metadata_request(RequestBody::Json(json.to_string()), replace)
    }

    fn edit_metadata_request(
        &self,
        body: RequestBody,
        replace: bool,
    ) -> Result<ResponseHandle<Plain<DatasetVersion>>> {
        let mut request = self
            .request(HttpRequest::put(self.target.path("editMetadata")))
            .params(metadata_key_params(&self.metadata_keys))
            .body(body);
        if replace {
            request = request.param("replace", "true");
        }
        self.client.call(request)
    }

    /// Overwrite the metadata of the draft version (creating it if needed).
    ///
    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn update_metadata(
        &self,
        version: &DatasetVersion,
    ) -> Result<ResponseHandle<Plain<DatasetVersion>>> {
        let request = self
            .request(HttpRequest::put(self.target.versioned_path(VERSION_DRAFT, "")))
            .params(metadata_key_params(&self.metadata_keys))
            .json(version)?;
        self.client.call(request)
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn update_metadata_from_json_ld(
        &self,
        json_ld: &str,
        replace: bool,
    ) -> Result<ResponseHandle<Plain<Value>>> {
        let request = self
            .request(HttpRequest::put(self.target.path("metadata")))
            .params(metadata_key_params(&self.metadata_keys))
            .param("replace", replace.to_string())
            .json_ld(json_ld);
        self.client.call(request)
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    #[instrument(skip(self), fields(dataset = %self.target.id()))]
    pub fn delete_draft(&self) -> Result<ResponseHandle<Plain<DataMessage>>> {
        let request =
            self.request(HttpRequest::delete(self.target.versioned_path(VERSION_DRAFT, "")));
        self.client.call(request)
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn list_role_assignments(&self) -> Result<ResponseHandle<ListOf<RoleAssignmentReadOnly>>> {
        self.client.call(self.get("assignments"))
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn assign_role(
        &self,
        assignment: &RoleAssignment,
    ) -> Result<ResponseHandle<Plain<RoleAssignmentReadOnly>>> {
        let request =
            self.request(HttpRequest::post(self.target.path("assignments"))).json(assignment)?;
        self.client.call(request)
    }

    /// Upload a file with its metadata. The file may be omitted when the
    /// metadata points at a prestaged storage identifier.
    ///
    /// # Errors
    /// `DataverseError::Io` if the file cannot be read; `DataverseError::Api`
    /// or `DataverseError::Transport` on failure.
    #[instrument(skip(self, meta), fields(dataset = %self.target.id()))]
    pub fn add_file(
        &self,
        file: Option<&Path>,
        meta: &FileMeta,
    ) -> Result<ResponseHandle<Plain<FileList>>> {
        let json = serde_json::to_string(meta).map_err(crate::errors::conversions::to_domain)?;
        let request = self
            .request(HttpRequest::post(self.target.path("add")))
            .multipart(MultipartUpload::new(file, Some(json)))?;
        self.client.call(request)
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn submit_for_review(&self) -> Result<ResponseHandle<Plain<SubmitForReviewResult>>> {
        self.client.call(self.request(HttpRequest::post(self.target.path("submitForReview"))))
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn set_embargo(&self, embargo: &Embargo) -> Result<ResponseHandle<Plain<DataMessage>>> {
        let request = self
            .request(HttpRequest::post(self.target.path("files/actions/:set-embargo")))
            .json(embargo)?;
        self.client.call(request)
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn set_retention_period(
        &self,
        retention: &RetentionPeriod,
    ) -> Result<ResponseHandle<Plain<DataMessage>>> {
        let request = self
            .request(HttpRequest::post(self.target.path("files/actions/:set-retention")))
            .json(retention)?;
        self.client.call(request)
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn get_locks(&self) -> Result<ResponseHandle<ListOf<Lock>>> {
        self.client.call(self.get("locks"))
    }

    /// Block until the dataset has no locks, using the configured budget.
    ///
    /// # Errors
    /// `DataverseError::LockTimeout` when locks remain after the last try.
    pub fn await_unlock(&self) -> Result<()> {
        self.await_condition(&LockCondition::Unlocked, self.client.config().await_lock_state)
    }

    /// # Errors
    /// See [`DatasetApi::await_unlock`].
    pub fn await_unlock_with(&self, policy: RetryPolicy) -> Result<()> {
        self.await_condition(&LockCondition::Unlocked, policy)
    }

    /// Block until a lock of `lock_type` is present, using the configured budget.
    ///
    /// # Errors
    /// `DataverseError::LockTimeout` when no such lock appeared.
    pub fn await_lock(&self, lock_type: &str) -> Result<()> {
        self.await_condition(&LockCondition::locked(lock_type), self.client.config().await_lock_state)
    }

    /// # Errors
    /// See [`DatasetApi::await_lock`].
    pub fn await_lock_with(&self, lock_type: &str, policy: RetryPolicy) -> Result<()> {
        self.await_condition(&LockCondition::locked(lock_type), policy)
    }

    #[instrument(skip(self), fields(dataset = %self.target.id()))]
    fn await_condition(&self, condition: &LockCondition, policy: RetryPolicy) -> Result<()> {
        debug!(max_attempts = policy.max_attempts, delay_ms = policy.delay_millis, "awaiting lock state");
        await_lock_state(self, self.client.sleeper(), condition, policy)?;
        info!(%condition, "lock condition reached");
        Ok(())
    }
}

impl LockSource for DatasetApi<'_> {
    fn current_locks(&self) -> Result<Vec<Lock>> {
        self.get_locks()?.data()
    }
}
