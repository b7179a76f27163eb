//! Basic file access (`api/access/datafile/...`)

use dataverse_domain::{FileDownloadOptions, FileRange, Result};
use reqwest::blocking::Response;
use reqwest::header::RANGE;
use tracing::instrument;

use super::client::DataverseClient;
use super::target::Target;
use crate::http::HttpRequest;

/// Downloads of one file. Bodies are handed to the caller unbuffered.
pub struct BasicFileAccessApi<'a> {
    client: &'a DataverseClient,
    target: Target,
}

impl<'a> BasicFileAccessApi<'a> {
    pub(crate) fn new(client: &'a DataverseClient, target: Target) -> Self {
        Self { client, target }
    }

    /// Download the file and pass the live response to `handler`.
    ///
    /// # Errors
    /// `DataverseError::Api` for a non-2xx status (the handler is not called),
    /// `DataverseError::Transport` on failure, or the handler's error.
    pub fn get_file<T, F>(&self, options: &FileDownloadOptions, handler: F) -> Result<T>
    where
        F: FnOnce(Response) -> Result<T>,
    {
        self.download(options, None, handler)
    }

    /// Download the inclusive byte `range` of the file.
    ///
    /// # Errors
    /// See [`BasicFileAccessApi::get_file`].
    pub fn get_file_range<T, F>(
        &self,
        options: &FileDownloadOptions,
        range: FileRange,
        handler: F,
    ) -> Result<T>
    where
        F: FnOnce(Response) -> Result<T>,
    {
        self.download(options, Some(range), handler)
    }

    #[instrument(skip(self, options, handler), fields(file = %self.target.id()))]
    fn download<T, F>(
        &self,
        options: &FileDownloadOptions,
        range: Option<FileRange>,
        handler: F,
    ) -> Result<T>
    where
        F: FnOnce(Response) -> Result<T>,
    {
        let mut request = HttpRequest::get(self.target.path(""))
            .params(self.target.params())
            .headers(self.target.headers());
        if let Some(format) = &options.format {
            request = request.param("format", format.clone());
        }
        if let Some(thumb) = &options.image_thumb {
            request = request.param("imageThumb", thumb.clone());
        }
        if options.no_var_header {
            request = request.param("noVarHeader", "true");
        }
        if let Some(range) = range {
            request = request.header(RANGE.as_str(), range.header_value());
        }
        self.client.transport().send_streaming(request, handler)
    }
}
