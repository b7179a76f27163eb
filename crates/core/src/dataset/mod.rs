//! Dataset workflows that span several requests

pub mod lock_await;
pub mod ports;
pub mod publish_retry;

pub use lock_await::{await_lock_state, LockCondition};
pub use ports::{LockSource, Sleeper};
pub use publish_retry::publish_with_retry;
