//! Administration endpoints (`api/admin/...`), superuser only

use dataverse_core::{Plain, ResponseHandle};
use dataverse_domain::{AuthenticatedUser, DataMessage, Result};
use tracing::instrument;

use super::client::DataverseClient;
use crate::http::HttpRequest;

const ADMIN_BASE: &str = "api/admin/";

pub struct AdminApi<'a> {
    client: &'a DataverseClient,
}

impl<'a> AdminApi<'a> {
    pub(crate) fn new(client: &'a DataverseClient) -> Self {
        Self { client }
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn list_single_user(&self, identifier: &str) -> Result<ResponseHandle<Plain<AuthenticatedUser>>> {
        self.client.call(HttpRequest::get(format!("{ADMIN_BASE}authenticatedUsers/{identifier}")))
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    #[instrument(skip(self, value))]
    pub fn put_database_setting(
        &self,
        name: &str,
        value: &str,
    ) -> Result<ResponseHandle<Plain<DataMessage>>> {
        self.client.call(HttpRequest::put(format!("{ADMIN_BASE}settings/{name}")).text(value))
    }

    /// The value is returned as the message of the response data.
    ///
    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn get_database_setting(&self, name: &str) -> Result<ResponseHandle<Plain<DataMessage>>> {
        self.client.call(HttpRequest::get(format!("{ADMIN_BASE}settings/{name}")))
    }
}
