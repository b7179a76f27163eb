//! Client configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{DataverseError, Result};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Bounded retry budget shared by the lock-await and publish-retry loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total number of tries, including the first one.
    pub max_attempts: u32,
    /// Pause between two consecutive tries.
    pub delay_millis: u64,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, delay_millis: u64) -> Self {
        Self { max_attempts, delay_millis }
    }

    /// Default budget for waiting on dataset lock state.
    pub const fn lock_state() -> Self {
        Self::new(30, 500)
    }

    /// Default budget for retrying a publish that is blocked by indexing.
    pub const fn indexing() -> Self {
        Self::new(15, 1000)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_millis)
    }

    /// # Errors
    /// Returns `DataverseError::Configuration` when `max_attempts` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(DataverseError::Configuration(
                "retry policy needs at least one attempt".to_string(),
            ));
        }
        Ok(())
    }
}

/// Connection settings for a Dataverse installation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    #[serde(default, skip_serializing)]
    pub api_token: Option<String>,
    /// Appended as `unblock-key` to every request when set.
    #[serde(default, skip_serializing)]
    pub unblock_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "RetryPolicy::lock_state")]
    pub await_lock_state: RetryPolicy,
    #[serde(default = "RetryPolicy::indexing")]
    pub await_indexing: RetryPolicy,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_unblock_key(mut self, key: impl Into<String>) -> Self {
        self.unblock_key = Some(key.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// # Errors
    /// Returns `DataverseError::Configuration` for an empty base URL or an
    /// invalid retry policy.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(DataverseError::Configuration("base_url must not be empty".to_string()));
        }
        self.await_lock_state.validate()?;
        self.await_indexing.validate()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_token: None,
            unblock_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            await_lock_state: RetryPolicy::lock_state(),
            await_indexing: RetryPolicy::indexing(),
        }
    }
}
