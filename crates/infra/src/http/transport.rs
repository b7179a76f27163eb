//! Transport dispatcher
//!
//! Sends exactly one HTTP request per call, attaches authentication and the
//! optional unblock key, buffers the body and classifies the status. Retrying
//! is left to the dataset workflows in `dataverse-core`.

use std::time::Duration;

use dataverse_core::RawResponse;
use dataverse_domain::{ApiError, ClientConfig, DataverseError, Result};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use tracing::{debug, warn};
use url::Url;

use super::request::{
    HttpRequest, MultipartUpload, QueryParams, RequestBody, MEDIA_TYPE_JSON,
    MEDIA_TYPE_OCTET_STREAM,
};
use crate::errors::conversions::to_domain;

pub const API_KEY_HEADER: &str = "X-Dataverse-key";
pub const UNBLOCK_KEY_PARAM: &str = "unblock-key";

/// How the API token is presented to the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    /// `X-Dataverse-key: <token>`
    #[default]
    Header,
    /// HTTP Basic with the token as user name and an empty password.
    Basic,
}

/// Blocking HTTP transport bound to one Dataverse installation.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
    unblock_key: Option<String>,
    auth_mode: AuthMode,
}

impl HttpTransport {
    /// Start building a new transport.
    pub fn builder(base_url: impl Into<String>) -> HttpTransportBuilder {
        HttpTransportBuilder::new(base_url)
    }

    /// # Errors
    /// Returns `DataverseError::Configuration` for an invalid base URL or
    /// client settings.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let mut builder = Self::builder(config.base_url.clone()).timeout(config.timeout());
        if let Some(token) = &config.api_token {
            builder = builder.api_token(token.clone());
        }
        if let Some(key) = &config.unblock_key {
            builder = builder.unblock_key(key.clone());
        }
        builder.build()
    }

    /// A copy of this transport that authenticates with HTTP Basic.
    pub fn with_basic_auth(&self) -> Self {
        Self { auth_mode: AuthMode::Basic, ..self.clone() }
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.auth_mode
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `path` against the base URL and append query parameters plus
    /// the unblock key.
    ///
    /// # Errors
    /// Returns `DataverseError::Configuration` if the path does not form a valid URL.
    pub fn build_url(&self, path: &str, params: &QueryParams) -> Result<Url> {
        let mut url = self.base_url.join(path.trim_start_matches('/')).map_err(to_domain)?;

        if !params.is_empty() || self.unblock_key.is_some() {
            let mut query = url.query_pairs_mut();
            for (key, value) in params.pairs() {
                query.append_pair(key, value);
            }
            if let Some(key) = &self.unblock_key {
                query.append_pair(UNBLOCK_KEY_PARAM, key);
            }
        }

        Ok(url)
    }

    /// # Errors
    /// See [`HttpTransport::send`].
    pub fn get(&self, path: &str, params: QueryParams) -> Result<RawResponse> {
        self.send(HttpRequest::get(path).params(params))
    }

    /// # Errors
    /// See [`HttpTransport::send`].
    pub fn post(&self, path: &str, params: QueryParams, body: RequestBody) -> Result<RawResponse> {
        self.send(HttpRequest::post(path).params(params).body(body))
    }

    /// # Errors
    /// See [`HttpTransport::send`].
    pub fn put(&self, path: &str, params: QueryParams, body: RequestBody) -> Result<RawResponse> {
        self.send(HttpRequest::put(path).params(params).body(body))
    }

    /// # Errors
    /// See [`HttpTransport::send`].
    pub fn delete(&self, path: &str, params: QueryParams) -> Result<RawResponse> {
        self.send(HttpRequest::delete(path).params(params))
    }

    /// Send `request` and buffer the response body.
    ///
    /// # Errors
    /// - `DataverseError::Api` for a status outside 200-299, with the body captured
    /// - `DataverseError::Transport` when no response was obtained
    /// - `DataverseError::Io` when a multipart file cannot be read
    pub fn send(&self, request: HttpRequest) -> Result<RawResponse> {
        let response = self.execute(request)?;
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let headers = header_pairs(response.headers());
        let body = response.text().map_err(to_domain)?;

        if !(200..300).contains(&status) {
            warn!(status, %url, "request failed");
            return Err(ApiError { status, url, headers, body }.into());
        }

        Ok(RawResponse { status, url, headers, body })
    }

    /// Send `request` and hand the live response to `handler` without
    /// buffering the body. Failures are classified exactly like [`send`].
    ///
    /// # Errors
    /// As [`send`], plus whatever `handler` returns.
    ///
    /// [`send`]: HttpTransport::send
    pub fn send_streaming<T, F>(&self, request: HttpRequest, handler: F) -> Result<T>
    where
        F: FnOnce(Response) -> Result<T>,
    {
        let response = self.execute(request)?;
        let status = response.status().as_u16();

        if !(200..300).contains(&status) {
            let url = response.url().to_string();
            let headers = header_pairs(response.headers());
            let body = response.text().map_err(to_domain)?;
            warn!(status, %url, "streaming request failed");
            return Err(ApiError { status, url, headers, body }.into());
        }

        handler(response)
    }

    fn execute(&self, request: HttpRequest) -> Result<Response> {
        let url = self.build_url(&request.path, &request.params)?;
        let method = request.method.clone();
        debug!(%method, %url, "sending HTTP request");

        let mut builder = self.client.request(request.method, url.clone());
        builder = self.authenticate(builder);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = attach_body(builder, request.body)?;

        let response = builder.send().map_err(to_domain)?;
        debug!(%method, %url, status = response.status().as_u16(), "received HTTP response");
        Ok(response)
    }

    fn authenticate(&self, builder: RequestBuilder) -> RequestBuilder {
        let Some(token) = &self.api_token else {
            return builder;
        };
        match self.auth_mode {
            AuthMode::Header => builder.header(API_KEY_HEADER, token.as_str()),
            AuthMode::Basic => builder.basic_auth(token, Some("")),
        }
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url.as_str())
            .field("auth_mode", &self.auth_mode)
            .field("has_api_token", &self.api_token.is_some())
            .field("has_unblock_key", &self.unblock_key.is_some())
            .finish()
    }
}

fn attach_body(builder: RequestBuilder, body: RequestBody) -> Result<RequestBuilder> {
    let content_type = body.content_type();
    let builder = match body {
        RequestBody::Empty => builder,
        RequestBody::Json(text) | RequestBody::JsonLd(text) | RequestBody::Text(text) => {
            builder.body(text)
        }
        RequestBody::Multipart(upload) => builder.multipart(multipart_form(upload)?),
    };
    Ok(match content_type {
        Some(value) => builder.header(CONTENT_TYPE, value),
        None => builder,
    })
}

fn multipart_form(upload: MultipartUpload) -> Result<Form> {
    let mut form = Form::new();
    if let Some(path) = upload.file {
        let part = Part::file(&path)
            .map_err(to_domain)?
            .mime_str(MEDIA_TYPE_OCTET_STREAM)
            .map_err(to_domain)?;
        form = form.part("file", part);
    }
    if let Some(json) = upload.json_data {
        let part = Part::text(json).mime_str(MEDIA_TYPE_JSON).map_err(to_domain)?;
        form = form.part("jsonData", part);
    }
    Ok(form)
}

fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value.to_str().ok().map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect()
}

/// Builder for [`HttpTransport`].
#[derive(Debug)]
pub struct HttpTransportBuilder {
    base_url: String,
    api_token: Option<String>,
    unblock_key: Option<String>,
    auth_mode: AuthMode,
    timeout: Duration,
    user_agent: Option<String>,
    client: Option<Client>,
}

impl HttpTransportBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            unblock_key: None,
            auth_mode: AuthMode::Header,
            timeout: Duration::from_secs(dataverse_domain::DEFAULT_TIMEOUT_SECS),
            user_agent: None,
            client: None,
        }
    }

    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn unblock_key(mut self, key: impl Into<String>) -> Self {
        self.unblock_key = Some(key.into());
        self
    }

    pub fn auth_mode(mut self, mode: AuthMode) -> Self {
        self.auth_mode = mode;
        self
    }

    /// Ignored when a client is injected with [`HttpTransportBuilder::client`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Ignored when a client is injected with [`HttpTransportBuilder::client`].
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Use an existing reqwest client instead of building one.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// # Errors
    /// Returns `DataverseError::Configuration` for an invalid base URL or when
    /// the HTTP client cannot be created.
    pub fn build(self) -> Result<HttpTransport> {
        let base_url = parse_base_url(&self.base_url)?;

        let client = match self.client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder().timeout(self.timeout);
                if let Some(agent) = self.user_agent {
                    builder = builder.user_agent(agent);
                }
                builder.build().map_err(|err| {
                    DataverseError::Configuration(format!("failed to build HTTP client: {err}"))
                })?
            }
        };

        Ok(HttpTransport {
            client,
            base_url,
            api_token: self.api_token,
            unblock_key: self.unblock_key,
            auth_mode: self.auth_mode,
        })
    }
}

/// Parse the base URL, making sure it ends in `/` so relative API paths are
/// appended to any path prefix instead of replacing its last segment.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim()).map_err(|err| {
        DataverseError::Configuration(format!("invalid base URL '{raw}': {err}"))
    })?;
    if url.cannot_be_a_base() {
        return Err(DataverseError::Configuration(format!("base URL '{raw}' cannot be a base")));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};

    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use tempfile::NamedTempFile;
    use tokio::runtime::Runtime;
    use wiremock::matchers::{body_string, header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn start_server(rt: &Runtime) -> MockServer {
        rt.block_on(MockServer::start())
    }

    fn transport(server: &MockServer) -> HttpTransport {
        HttpTransport::builder(server.uri()).api_token("secret-token").build().expect("transport")
    }

    #[test]
    fn base_url_keeps_path_prefix() {
        let transport =
            HttpTransport::builder("https://dataverse.example.org/repo").build().expect("transport");
        let url = transport.build_url("api/datasets/1", &QueryParams::new()).expect("url");
        assert_eq!(url.as_str(), "https://dataverse.example.org/repo/api/datasets/1");
    }

    #[test]
    fn invalid_base_url_fails_before_any_request() {
        let err = HttpTransport::builder("not a url").build().expect_err("invalid");
        assert!(matches!(err, DataverseError::Configuration(_)));
    }

    #[test]
    fn query_params_and_unblock_key_are_appended() {
        let transport = HttpTransport::builder("http://localhost:8080")
            .unblock_key("s3cr3t")
            .build()
            .expect("transport");
        let params = QueryParams::new().with("type", "dataset").with("type", "file");

        let url = transport.build_url("api/search", &params).expect("url");
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/search?type=dataset&type=file&unblock-key=s3cr3t"
        );
    }

    #[test]
    fn url_without_params_has_no_query() {
        let transport = HttpTransport::builder("http://localhost:8080").build().expect("transport");
        let url = transport.build_url("api/info/version", &QueryParams::new()).expect("url");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn sends_api_token_header() {
        let rt = Runtime::new().unwrap();
        let server = start_server(&rt);
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/api/datasets/1/locks"))
                .and(header(API_KEY_HEADER, "secret-token"))
                .respond_with(
                    ResponseTemplate::new(200).set_body_string(r#"{"status":"OK","data":[]}"#),
                )
                .expect(1)
                .mount(&server),
        );

        let response = transport(&server).get("api/datasets/1/locks", QueryParams::new()).expect("response");

        assert_eq!(response.status, 200);
        assert_eq!(response.body, r#"{"status":"OK","data":[]}"#);
        rt.block_on(server.verify());
    }

    #[test]
    fn basic_auth_uses_token_as_user_name() {
        let rt = Runtime::new().unwrap();
        let server = start_server(&rt);
        let expected = format!("Basic {}", STANDARD.encode("secret-token:"));
        rt.block_on(
            Mock::given(method("DELETE"))
                .and(header("authorization", expected.as_str()))
                .respond_with(ResponseTemplate::new(204))
                .expect(1)
                .mount(&server),
        );

        let sword = transport(&server).with_basic_auth();
        let response = sword
            .delete("dvn/api/data-deposit/v1.1/swordv2/edit-media/file/5", QueryParams::new())
            .expect("response");

        assert_eq!(response.status, 204);
        let requests = rt.block_on(server.received_requests()).unwrap();
        assert!(requests[0].headers.get(API_KEY_HEADER).is_none());
    }

    #[test]
    fn non_success_status_becomes_api_error_with_body() {
        let rt = Runtime::new().unwrap();
        let server = start_server(&rt);
        rt.block_on(
            Mock::given(method("POST"))
                .respond_with(
                    ResponseTemplate::new(409)
                        .insert_header("x-request-id", "abc")
                        .set_body_string(r#"{"status":"ERROR","message":"Dataset is not indexed yet"}"#),
                )
                .expect(1)
                .mount(&server),
        );

        let err = transport(&server)
            .post("api/datasets/1/actions/:publish", QueryParams::new(), RequestBody::Empty)
            .expect_err("conflict");

        let api = err.api_error().expect("api error");
        assert_eq!(api.status, 409);
        assert!(api.body.contains("not indexed"));
        assert_eq!(api.header("X-Request-Id"), Some("abc"));
        assert!(api.url.ends_with("/api/datasets/1/actions/:publish"));
    }

    #[test]
    fn bodies_carry_their_content_type() {
        let rt = Runtime::new().unwrap();
        let server = start_server(&rt);
        rt.block_on(async {
            Mock::given(method("PUT"))
                .and(path("/api/dataverses/root/metadatablocks/isRoot"))
                .and(header("content-type", "text/plain"))
                .and(body_string("true"))
                .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
                .expect(1)
                .mount(&server)
                .await;
            Mock::given(method("PUT"))
                .and(path("/api/datasets/2/metadata"))
                .and(header("content-type", "application/ld+json"))
                .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
                .expect(1)
                .mount(&server)
                .await;
        });

        let transport = transport(&server);
        transport
            .put(
                "api/dataverses/root/metadatablocks/isRoot",
                QueryParams::new(),
                RequestBody::Text("true".into()),
            )
            .expect("text");
        transport
            .put("api/datasets/2/metadata", QueryParams::new(), RequestBody::JsonLd("{}".into()))
            .expect("json-ld");
        rt.block_on(server.verify());
    }

    #[test]
    fn multipart_sends_file_and_json_parts() {
        let rt = Runtime::new().unwrap();
        let server = start_server(&rt);
        rt.block_on(
            Mock::given(method("POST"))
                .and(path("/api/datasets/3/add"))
                .and(header_exists("content-type"))
                .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
                .expect(1)
                .mount(&server),
        );

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"col1,col2\n1,2\n").unwrap();
        let upload =
            MultipartUpload::new(Some(file.path()), Some(r#"{"description":"sherds"}"#.into()));
        let request = HttpRequest::post("api/datasets/3/add").multipart(upload).expect("request");
        transport(&server).send(request).expect("upload");

        let requests = rt.block_on(server.received_requests()).unwrap();
        let content_type = requests[0].headers.get("content-type").unwrap().to_str().unwrap();
        assert!(content_type.starts_with("multipart/form-data"));
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"file\""));
        assert!(body.contains("application/octet-stream"));
        assert!(body.contains("col1,col2"));
        assert!(body.contains("name=\"jsonData\""));
        assert!(body.contains(r#"{"description":"sherds"}"#));
    }

    #[test]
    fn range_request_is_streamed_to_handler() {
        let rt = Runtime::new().unwrap();
        let server = start_server(&rt);
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/api/access/datafile/9"))
                .and(header("range", "bytes=0-99"))
                .and(query_param("format", "original"))
                .respond_with(ResponseTemplate::new(206).set_body_bytes(vec![7u8; 100]))
                .expect(1)
                .mount(&server),
        );

        let request = HttpRequest::get("api/access/datafile/9")
            .param("format", "original")
            .header("Range", "bytes=0-99");
        let bytes = transport(&server)
            .send_streaming(request, |mut response| {
                assert_eq!(response.status().as_u16(), 206);
                let mut buffer = Vec::new();
                response.read_to_end(&mut buffer).map_err(to_domain)?;
                Ok(buffer)
            })
            .expect("bytes");

        assert_eq!(bytes.len(), 100);
    }

    #[test]
    fn streaming_failure_never_reaches_handler() {
        let rt = Runtime::new().unwrap();
        let server = start_server(&rt);
        rt.block_on(
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(403).set_body_string("restricted"))
                .mount(&server),
        );

        let mut called = false;
        let err = transport(&server)
            .send_streaming(HttpRequest::get("api/access/datafile/9"), |_| {
                called = true;
                Ok(())
            })
            .expect_err("forbidden");

        assert!(!called);
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.api_error().map(|e| e.body.as_str()), Some("restricted"));
    }

    #[test]
    fn dispatch_performs_exactly_one_request() {
        let rt = Runtime::new().unwrap();
        let server = start_server(&rt);
        rt.block_on(
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(503))
                .expect(1)
                .mount(&server),
        );

        let result = transport(&server).get("api/info/version", QueryParams::new());
        assert_eq!(result.expect_err("unavailable").status(), Some(503));
        rt.block_on(server.verify());
    }
}
