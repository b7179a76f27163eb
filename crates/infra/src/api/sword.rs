//! SWORD v2 endpoints

use dataverse_core::RawResponse;
use dataverse_domain::Result;
use tracing::instrument;

use crate::http::{HttpRequest, HttpTransport};

const SWORD_BASE: &str = "dvn/api/data-deposit/v1.1/swordv2/";

/// SWORD operations; the API token is sent as the HTTP Basic user name.
#[derive(Debug, Clone)]
pub struct SwordApi {
    transport: HttpTransport,
}

impl SwordApi {
    pub(crate) fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// Delete a file from a draft dataset.
    ///
    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    #[instrument(skip(self))]
    pub fn delete_file(&self, file_id: u64) -> Result<RawResponse> {
        self.transport.send(HttpRequest::delete(format!("{SWORD_BASE}edit-media/file/{file_id}")))
    }
}
