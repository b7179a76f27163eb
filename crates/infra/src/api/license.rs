//! Installation licenses (`api/licenses`)

use dataverse_core::{ListOf, Plain, ResponseHandle};
use dataverse_domain::{DataMessage, License, Result};
use tracing::instrument;

use super::client::DataverseClient;
use crate::http::HttpRequest;

const LICENSES_BASE: &str = "api/licenses";

pub struct LicenseApi<'a> {
    client: &'a DataverseClient,
}

impl<'a> LicenseApi<'a> {
    pub(crate) fn new(client: &'a DataverseClient) -> Self {
        Self { client }
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn list(&self) -> Result<ResponseHandle<ListOf<License>>> {
        self.client.call(HttpRequest::get(LICENSES_BASE))
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn get(&self, id: u64) -> Result<ResponseHandle<Plain<License>>> {
        self.client.call(HttpRequest::get(format!("{LICENSES_BASE}/{id}")))
    }

    /// Requires a superuser token.
    ///
    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    #[instrument(skip(self, license), fields(name = %license.name))]
    pub fn add(&self, license: &License) -> Result<ResponseHandle<Plain<DataMessage>>> {
        self.client.call(HttpRequest::post(LICENSES_BASE).json(license)?)
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn get_default(&self) -> Result<ResponseHandle<Plain<License>>> {
        self.client.call(HttpRequest::get(format!("{LICENSES_BASE}/default")))
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    #[instrument(skip(self))]
    pub fn set_default(&self, id: u64) -> Result<ResponseHandle<Plain<DataMessage>>> {
        self.client.call(HttpRequest::put(format!("{LICENSES_BASE}/default/{id}")))
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    #[instrument(skip(self))]
    pub fn set_active(&self, id: u64, active: bool) -> Result<ResponseHandle<Plain<DataMessage>>> {
        self.client.call(HttpRequest::put(format!("{LICENSES_BASE}/{id}/:active/{active}")))
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    #[instrument(skip(self))]
    pub fn delete(&self, id: u64) -> Result<ResponseHandle<Plain<DataMessage>>> {
        self.client.call(HttpRequest::delete(format!("{LICENSES_BASE}/{id}")))
    }
}
