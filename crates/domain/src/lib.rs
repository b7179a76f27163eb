//! # Dataverse Domain
//!
//! Domain types shared by the Dataverse client crates.
//!
//! This crate contains:
//! - The error taxonomy and `Result` alias
//! - Client configuration and retry policies
//! - The response envelope
//! - Wire models for datasets, files, collections, search and administration
//!
//! ## Architecture
//! - No dependencies on other client crates
//! - No I/O

pub mod config;
pub mod envelope;
pub mod errors;
pub mod types;
pub mod utils;

pub use config::*;
pub use envelope::*;
pub use errors::*;
pub use types::*;
pub use utils::exported_name::ExportedDatasetVersionName;
