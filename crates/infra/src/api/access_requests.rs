//! Data access request settings of a dataset

use dataverse_core::{Plain, ResponseHandle};
use dataverse_domain::{DataMessage, Result};
use tracing::instrument;

use super::client::DataverseClient;
use super::target::Target;
use crate::http::HttpRequest;

pub struct DataAccessRequestsApi<'a> {
    client: &'a DataverseClient,
    target: Target,
}

impl<'a> DataAccessRequestsApi<'a> {
    pub(crate) fn new(client: &'a DataverseClient, target: Target) -> Self {
        Self { client, target }
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn enable(&self) -> Result<ResponseHandle<Plain<DataMessage>>> {
        self.allow(true)
    }

    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    pub fn disable(&self) -> Result<ResponseHandle<Plain<DataMessage>>> {
        self.allow(false)
    }

    #[instrument(skip(self), fields(dataset = %self.target.id()))]
    fn allow(&self, allowed: bool) -> Result<ResponseHandle<Plain<DataMessage>>> {
        let request = HttpRequest::put(self.target.path("allowAccessRequest"))
            .params(self.target.params())
            .headers(self.target.headers())
            .text(allowed.to_string());
        self.client.call(request)
    }
}
