//! Error types used throughout the client

use std::fmt;

use thiserror::Error;

/// A non-2xx response returned by the server.
///
/// The body is always captured so callers can inspect the server-provided
/// error detail (Dataverse returns an `ERROR` envelope with a message).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: u16,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl ApiError {
    pub fn new(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self { status, url: url.into(), headers: Vec::new(), body: body.into() }
    }

    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    /// Case-insensitive lookup of a response header.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn is_conflict(&self) -> bool {
        self.status == 409
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {} for {}", self.status, self.url)?;
        if !self.body.is_empty() {
            write!(f, ": {}", self.body)?;
        }
        Ok(())
    }
}

/// The response body did not match the expected payload shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Deserialization failed for {expected}: {message}")]
pub struct DecodeError {
    /// Human readable description of the target shape, e.g. `envelope of list of Lock`.
    pub expected: String,
    /// Parser message; names the offending field when serde reports one.
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl DecodeError {
    pub fn from_json(expected: impl Into<String>, err: &serde_json::Error) -> Self {
        Self {
            expected: expected.into(),
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

/// Main error type for the Dataverse client
#[derive(Error, Debug, Clone)]
pub enum DataverseError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(
        "Timed out waiting until {condition}. Number of tries = {attempts}, wait time between tries = {delay_millis} ms."
    )]
    LockTimeout { condition: String, attempts: u32, delay_millis: u64 },

    #[error(
        "Dataset still not indexed after {attempts} tries, wait time between tries = {delay_millis} ms. Last error: {last}"
    )]
    PublishRetryExhausted { attempts: u32, delay_millis: u64, last: ApiError },

    #[error("Interrupted while waiting between attempts")]
    Interrupted,

    #[error("I/O error: {0}")]
    Io(String),
}

impl DataverseError {
    /// The API error behind this failure, if the server answered.
    ///
    /// For an exhausted publish retry this is the last 409 response seen.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            Self::PublishRetryExhausted { last, .. } => Some(last),
            _ => None,
        }
    }

    /// HTTP status of the server response, if any.
    pub fn status(&self) -> Option<u16> {
        self.api_error().map(|err| err.status)
    }

    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }
}

/// Result type alias for Dataverse client operations
pub type Result<T> = std::result::Result<T, DataverseError>;
