//! Configuration loading
//!
//! Builds a [`dataverse_domain::ClientConfig`] from environment variables or
//! from a TOML/JSON file.

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
