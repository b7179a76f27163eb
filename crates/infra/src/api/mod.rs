//! Dataverse API client
//!
//! [`DataverseClient`] is the entry point. Per-resource views borrow it and
//! map each endpoint to one request, decoded lazily through a
//! [`dataverse_core::ResponseHandle`].

pub mod access_requests;
pub mod admin;
pub mod client;
pub mod dataset;
pub mod dataverse;
pub mod file;
pub mod file_access;
pub mod license;
pub mod search;
pub mod sword;
pub mod target;

pub use access_requests::DataAccessRequestsApi;
pub use admin::AdminApi;
pub use client::DataverseClient;
pub use dataset::{DatasetApi, VERSION_DRAFT, VERSION_LATEST, VERSION_LATEST_PUBLISHED};
pub use dataverse::DataverseApi;
pub use file::FileApi;
pub use file_access::BasicFileAccessApi;
pub use license::LicenseApi;
pub use search::SearchApi;
pub use sword::SwordApi;
pub use target::{ResourceId, Target, INVOCATION_ID_HEADER, PERSISTENT_ID_PARAM};
