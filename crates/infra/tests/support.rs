//! Shared fixtures for the infra integration tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dataverse_core::Sleeper;
use dataverse_domain::{ClientConfig, Result, RetryPolicy};
use dataverse_infra::DataverseClient;
use serde_json::{json, Value};
use tokio::runtime::Runtime;
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-api-token";

/// Sleeper that records requested pauses without blocking.
#[derive(Clone, Default)]
pub struct CountingSleeper {
    sleeps: Arc<AtomicU32>,
}

impl CountingSleeper {
    pub fn count(&self) -> u32 {
        self.sleeps.load(Ordering::SeqCst)
    }
}

impl Sleeper for CountingSleeper {
    fn sleep(&self, _duration: Duration) -> Result<()> {
        self.sleeps.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A mock Dataverse server together with the runtime driving it.
///
/// The blocking client must be called outside `rt.block_on`.
pub struct MockDataverse {
    pub server: MockServer,
    pub rt: Runtime,
}

impl MockDataverse {
    pub fn start() -> Self {
        let rt = Runtime::new().expect("tokio runtime");
        let server = rt.block_on(MockServer::start());
        Self { server, rt }
    }

    pub fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.server.uri()).with_api_token(TEST_TOKEN);
        config.timeout_secs = 5;
        config.await_lock_state = RetryPolicy::new(5, 1);
        config.await_indexing = RetryPolicy::new(3, 1);
        config
    }

    /// Client with a counting sleeper, returned alongside for assertions.
    pub fn client(&self) -> (DataverseClient, CountingSleeper) {
        self.client_with(self.config())
    }

    pub fn client_with(&self, config: ClientConfig) -> (DataverseClient, CountingSleeper) {
        let sleeper = CountingSleeper::default();
        let client = DataverseClient::new(config).expect("client").with_sleeper(sleeper.clone());
        (client, sleeper)
    }

    pub fn requests(&self) -> Vec<wiremock::Request> {
        self.rt.block_on(self.server.received_requests()).unwrap_or_default()
    }

    pub fn verify(&self) {
        self.rt.block_on(self.server.verify());
    }
}

pub fn ok_envelope(data: Value) -> Value {
    json!({ "status": "OK", "data": data })
}

pub fn error_envelope(message: &str) -> Value {
    json!({ "status": "ERROR", "message": message })
}

pub fn query_value(request: &wiremock::Request, key: &str) -> Option<String> {
    request.url.query_pairs().find(|(k, _)| k == key).map(|(_, v)| v.into_owned())
}
