//! Response handles
//!
//! A handle owns the buffered body of one successful response together with
//! the payload shape it is expected to have. Decoding happens on demand and
//! can be repeated; every call parses the stored body again.
//!
//! The shape is a type parameter, so a handle cannot exist without one:
//!
//! ```compile_fail
//! use dataverse_core::response::{RawResponse, ResponseHandle};
//!
//! let raw = RawResponse::new(200, "http://localhost/api/info/version", "{}");
//! let handle = ResponseHandle::new(raw);
//! let _ = handle.data();
//! ```

use std::fmt;
use std::marker::PhantomData;

use dataverse_domain::{Envelope, EnvelopeMessage, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::decoder;
use super::shape::Shape;

/// Status, headers and fully buffered body of a 2xx response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self { status, url: url.into(), headers: Vec::new(), body: body.into() }
    }

    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An enveloped response whose payload has shape `S` and message type `M`.
pub struct ResponseHandle<S, M = EnvelopeMessage> {
    raw: RawResponse,
    _shape: PhantomData<fn() -> (S, M)>,
}

impl<S: Shape, M: DeserializeOwned> ResponseHandle<S, M> {
    pub fn new(raw: RawResponse) -> Self {
        Self { raw, _shape: PhantomData }
    }

    /// The complete envelope with status, message and data.
    ///
    /// # Errors
    /// Returns `DataverseError::Decode` if the body does not match.
    pub fn envelope(&self) -> Result<Envelope<S::Output, M>> {
        decoder::decode_envelope::<S, M>(&self.raw.body)
    }

    /// Only the `data` payload.
    ///
    /// # Errors
    /// Returns `DataverseError::Decode` if the body does not match or has no data.
    pub fn data(&self) -> Result<S::Output> {
        decoder::decode_data::<S, M>(&self.raw.body)
    }

    /// # Errors
    /// Returns `DataverseError::Decode` if the body does not match.
    pub fn message(&self) -> Result<Option<M>> {
        Ok(self.envelope()?.message)
    }

    /// The body as a generic JSON tree.
    ///
    /// # Errors
    /// Returns `DataverseError::Decode` if the body is not JSON.
    pub fn json(&self) -> Result<Value> {
        decoder::decode_json(&self.raw.body)
    }

    pub fn text(&self) -> &str {
        &self.raw.body
    }

    pub fn status(&self) -> u16 {
        self.raw.status
    }

    pub fn raw(&self) -> &RawResponse {
        &self.raw
    }

    pub fn into_raw(self) -> RawResponse {
        self.raw
    }
}

impl<S, M> fmt::Debug for ResponseHandle<S, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseHandle").field("raw", &self.raw).finish()
    }
}

/// A response whose body is the payload itself, without an envelope.
pub struct BareResponse<S> {
    raw: RawResponse,
    _shape: PhantomData<fn() -> S>,
}

impl<S: Shape> BareResponse<S> {
    pub fn new(raw: RawResponse) -> Self {
        Self { raw, _shape: PhantomData }
    }

    /// # Errors
    /// Returns `DataverseError::Decode` if the body does not match `S`.
    pub fn body(&self) -> Result<S::Output> {
        decoder::decode_bare::<S>(&self.raw.body)
    }

    /// # Errors
    /// Returns `DataverseError::Decode` if the body is not JSON.
    pub fn json(&self) -> Result<Value> {
        decoder::decode_json(&self.raw.body)
    }

    pub fn text(&self) -> &str {
        &self.raw.body
    }

    pub fn status(&self) -> u16 {
        self.raw.status
    }

    pub fn raw(&self) -> &RawResponse {
        &self.raw
    }
}

impl<S> fmt::Debug for BareResponse<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BareResponse").field("raw", &self.raw).finish()
    }
}
