//! HTTP transport for the Dataverse API

pub mod request;
pub mod transport;

pub use request::{HttpRequest, MultipartUpload, QueryParams, RequestBody};
pub use transport::{AuthMode, HttpTransport, HttpTransportBuilder, API_KEY_HEADER, UNBLOCK_KEY_PARAM};
