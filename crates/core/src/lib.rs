//! # Dataverse Core
//!
//! Protocol logic of the Dataverse client - no HTTP code.
//!
//! This crate contains:
//! - Envelope decoding and typed response handles
//! - The lock-await and publish-retry state machines
//! - Port interfaces (traits) those state machines consume
//!
//! ## Architecture Principles
//! - Only depends on `dataverse-domain`
//! - Network access happens behind [`dataset::LockSource`] and caller closures
//! - Sleeping happens behind [`dataset::Sleeper`] so tests run without delays

pub mod dataset;
pub mod response;
pub mod sleep;

pub use dataset::{await_lock_state, publish_with_retry, LockCondition, LockSource, Sleeper};
pub use response::{BareResponse, ListOf, MapOf, Plain, RawResponse, ResponseHandle, Shape};
pub use sleep::{CancellableSleeper, ThreadSleeper};
