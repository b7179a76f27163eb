//! Entry point of the Dataverse client
//!
//! [`DataverseClient`] owns the transport, the retry budgets and the sleeper
//! used between retries, and hands out short-lived per-resource API views.

use std::fmt;
use std::sync::Arc;

use dataverse_core::response::Shape;
use dataverse_core::{ResponseHandle, Sleeper, ThreadSleeper};
use dataverse_domain::{ClientConfig, Result};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use tracing::{info, instrument};

use super::access_requests::DataAccessRequestsApi;
use super::admin::AdminApi;
use super::dataset::DatasetApi;
use super::dataverse::DataverseApi;
use super::file::FileApi;
use super::file_access::BasicFileAccessApi;
use super::license::LicenseApi;
use super::search::SearchApi;
use super::sword::SwordApi;
use super::target::{ResourceId, Target};
use crate::http::{HttpRequest, HttpTransport};

pub(crate) const DATASETS_BASE: &str = "api/datasets/";
pub(crate) const FILES_BASE: &str = "api/v1/files/";
pub(crate) const DATAFILE_ACCESS_BASE: &str = "api/access/datafile/";
pub(crate) const ACCESS_BASE: &str = "api/access/";

/// Blocking client for one Dataverse installation.
#[derive(Clone)]
pub struct DataverseClient {
    transport: HttpTransport,
    config: ClientConfig,
    sleeper: Arc<dyn Sleeper + Send + Sync>,
}

impl DataverseClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    /// Returns `DataverseError::Configuration` for an invalid base URL or retry
    /// policy. No request is sent.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::from_config(&config)?;
        Ok(Self::from_parts(transport, config))
    }

    /// Create a client that sends through an existing reqwest client.
    ///
    /// # Errors
    /// Returns `DataverseError::Configuration` for an invalid configuration.
    pub fn with_http_client(config: ClientConfig, client: Client) -> Result<Self> {
        config.validate()?;
        let mut builder = HttpTransport::builder(config.base_url.clone()).client(client);
        if let Some(token) = &config.api_token {
            builder = builder.api_token(token.clone());
        }
        if let Some(key) = &config.unblock_key {
            builder = builder.unblock_key(key.clone());
        }
        Ok(Self::from_parts(builder.build()?, config))
    }

    fn from_parts(transport: HttpTransport, config: ClientConfig) -> Self {
        Self { transport, config, sleeper: Arc::new(ThreadSleeper) }
    }

    /// Replace the sleeper used between retries, e.g. with a
    /// [`dataverse_core::CancellableSleeper`] to make waits interruptible.
    pub fn with_sleeper(mut self, sleeper: impl Sleeper + Send + Sync + 'static) -> Self {
        self.sleeper = Arc::new(sleeper);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    pub(crate) fn sleeper(&self) -> &(dyn Sleeper + Send + Sync) {
        self.sleeper.as_ref()
    }

    /// Dispatch `request` and wrap the body for decoding as shape `S`.
    pub(crate) fn call<S, M>(&self, request: HttpRequest) -> Result<ResponseHandle<S, M>>
    where
        S: Shape,
        M: DeserializeOwned,
    {
        self.transport.send(request).map(ResponseHandle::new)
    }

    /// Verify the server is reachable and the credentials are accepted by
    /// viewing the root collection.
    ///
    /// # Errors
    /// The error of the failed request.
    #[instrument(skip(self))]
    pub fn check_connection(&self) -> Result<()> {
        self.dataverse(":root").view()?;
        info!(base_url = %self.transport.base_url(), "connected to Dataverse");
        Ok(())
    }

    pub fn dataset(&self, id: u64) -> DatasetApi<'_> {
        DatasetApi::new(self, Target::new(DATASETS_BASE, ResourceId::Database(id)))
    }

    pub fn dataset_by_pid(&self, pid: impl Into<String>) -> DatasetApi<'_> {
        DatasetApi::new(self, Target::new(DATASETS_BASE, ResourceId::Persistent(pid.into())))
    }

    pub fn dataverse(&self, alias: impl Into<String>) -> DataverseApi<'_> {
        DataverseApi::new(self, alias.into())
    }

    pub fn file(&self, id: u64) -> FileApi<'_> {
        FileApi::new(self, Target::new(FILES_BASE, ResourceId::Database(id)))
    }

    pub fn file_by_pid(&self, pid: impl Into<String>) -> FileApi<'_> {
        FileApi::new(self, Target::new(FILES_BASE, ResourceId::Persistent(pid.into())))
    }

    pub fn basic_file_access(&self, id: u64) -> BasicFileAccessApi<'_> {
        BasicFileAccessApi::new(self, Target::new(DATAFILE_ACCESS_BASE, ResourceId::Database(id)))
    }

    pub fn basic_file_access_by_pid(&self, pid: impl Into<String>) -> BasicFileAccessApi<'_> {
        BasicFileAccessApi::new(
            self,
            Target::new(DATAFILE_ACCESS_BASE, ResourceId::Persistent(pid.into())),
        )
    }

    /// Access request settings of a dataset.
    pub fn access_requests(&self, dataset_id: u64) -> DataAccessRequestsApi<'_> {
        DataAccessRequestsApi::new(self, Target::new(ACCESS_BASE, ResourceId::Database(dataset_id)))
    }

    pub fn access_requests_by_pid(&self, pid: impl Into<String>) -> DataAccessRequestsApi<'_> {
        DataAccessRequestsApi::new(self, Target::new(ACCESS_BASE, ResourceId::Persistent(pid.into())))
    }

    pub fn licenses(&self) -> LicenseApi<'_> {
        LicenseApi::new(self)
    }

    pub fn admin(&self) -> AdminApi<'_> {
        AdminApi::new(self)
    }

    pub fn search(&self) -> SearchApi<'_> {
        SearchApi::new(self)
    }

    /// SWORD v2 endpoints, authenticated with HTTP Basic.
    pub fn sword(&self) -> SwordApi {
        SwordApi::new(self.transport.with_basic_auth())
    }
}

impl fmt::Debug for DataverseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataverseClient")
            .field("transport", &self.transport)
            .field("await_lock_state", &self.config.await_lock_state)
            .field("await_indexing", &self.config.await_indexing)
            .finish_non_exhaustive()
    }
}
