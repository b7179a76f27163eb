//! # Dataverse Infrastructure
//!
//! Blocking HTTP implementation of the Dataverse client.
//!
//! This crate contains:
//! - The reqwest transport dispatcher and request builders
//! - Per-resource endpoint wrappers and the `DataverseClient` entry point
//! - Configuration loading from environment variables and files
//!
//! ## Architecture
//! - Implements the ports defined in `dataverse-core`
//! - Depends on `dataverse-domain` and `dataverse-core`
//! - Contains all I/O

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

pub use api::*;
pub use errors::InfraError;
pub use http::{AuthMode, HttpRequest, HttpTransport, HttpTransportBuilder, QueryParams};
