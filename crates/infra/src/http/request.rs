//! Request description handed to the transport

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dataverse_domain::{DataverseError, Result};
use reqwest::Method;
use serde::Serialize;

use crate::errors::conversions::to_domain;

pub const MEDIA_TYPE_JSON: &str = "application/json";
pub const MEDIA_TYPE_JSON_LD: &str = "application/ld+json";
pub const MEDIA_TYPE_TEXT: &str = "text/plain";
pub const MEDIA_TYPE_OCTET_STREAM: &str = "application/octet-stream";

/// Multi-valued query parameters, serialized in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, Vec<String>>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` to `key`, keeping earlier values.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.entry(key.into()).or_default().push(value.into());
        self
    }

    /// Replace all values of `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), vec![value.into()]);
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(key, value);
        self
    }

    pub fn extend(&mut self, other: QueryParams) -> &mut Self {
        for (key, values) in other.0 {
            self.0.entry(key).or_default().extend(values);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All `(key, value)` pairs, one per value.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |value| (key.as_str(), value.as_str())))
    }
}

/// Upload parts of a multipart request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartUpload {
    /// Sent as part `file` with content type `application/octet-stream`.
    pub file: Option<PathBuf>,
    /// Sent as part `jsonData` with content type `application/json`.
    pub json_data: Option<String>,
}

impl MultipartUpload {
    pub fn new(file: Option<&Path>, json_data: Option<String>) -> Self {
        Self { file: file.map(Path::to_path_buf), json_data }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(String),
    JsonLd(String),
    Text(String),
    Multipart(MultipartUpload),
}

impl RequestBody {
    /// Serialize `value` as an `application/json` body.
    ///
    /// # Errors
    /// Returns `DataverseError::InvalidArgument` if serialization fails.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_string(value).map(Self::Json).map_err(to_domain)
    }

    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Empty | Self::Multipart(_) => None,
            Self::Json(_) => Some(MEDIA_TYPE_JSON),
            Self::JsonLd(_) => Some(MEDIA_TYPE_JSON_LD),
            Self::Text(_) => Some(MEDIA_TYPE_TEXT),
        }
    }
}

/// One HTTP request relative to the transport's base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub params: QueryParams,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: QueryParams::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn params(mut self, params: QueryParams) -> Self {
        self.params.extend(params);
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.add(key, value);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// # Errors
    /// Returns `DataverseError::InvalidArgument` if serialization fails.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self> {
        Ok(self.body(RequestBody::json(value)?))
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.body(RequestBody::Text(text.into()))
    }

    pub fn json_ld(self, json_ld: impl Into<String>) -> Self {
        self.body(RequestBody::JsonLd(json_ld.into()))
    }

    /// # Errors
    /// Returns `DataverseError::InvalidArgument` when neither part is given.
    pub fn multipart(self, upload: MultipartUpload) -> Result<Self> {
        if upload.file.is_none() && upload.json_data.is_none() {
            return Err(DataverseError::InvalidArgument(
                "multipart upload needs a file or JSON metadata".to_string(),
            ));
        }
        Ok(self.body(RequestBody::Multipart(upload)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_keep_multiple_values_per_key() {
        let mut params = QueryParams::new();
        params.add("type", "dataset").add("type", "file").add("q", "pottery");

        let pairs: Vec<_> = params.pairs().collect();
        assert_eq!(pairs, vec![("q", "pottery"), ("type", "dataset"), ("type", "file")]);
    }

    #[test]
    fn set_replaces_existing_values() {
        let mut params = QueryParams::new().with("replace", "false");
        params.set("replace", "true");
        assert_eq!(params.get("replace"), Some(&["true".to_string()][..]));
    }

    #[test]
    fn body_content_types() {
        assert_eq!(RequestBody::Text("x".into()).content_type(), Some("text/plain"));
        assert_eq!(RequestBody::JsonLd("{}".into()).content_type(), Some("application/ld+json"));
        assert_eq!(RequestBody::json(&[1, 2]).expect("json"), RequestBody::Json("[1,2]".into()));
        assert_eq!(RequestBody::Empty.content_type(), None);
    }

    #[test]
    fn empty_multipart_is_rejected() {
        let result = HttpRequest::post("api/files/1/replace").multipart(MultipartUpload::default());
        assert!(matches!(result, Err(DataverseError::InvalidArgument(_))));
    }
}
