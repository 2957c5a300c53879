//! Mock implementations for test fixtures.
//!
//! This module re-exports the mock implementations from
//! `dosewatch::adapters::mock` and provides test-specific configurations.

pub use dosewatch::adapters::mock::http::MockResponse;
pub use dosewatch::adapters::mock::{
    InMemoryStore, InstantClock, ManualClock, MockAuth, MockHttpClient, RecordingShell,
};
pub use dosewatch::traits::{HttpError, Response};

use bytes::Bytes;

/// Configuration for setting up mock HTTP responses.
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    /// Creates a new mock HTTP configuration.
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Configures a JSON response.
    pub fn with_json_response(self, url: &str, status: u16, json: &str) -> Self {
        self.client.set_response(
            url,
            MockResponse::Success(Response::new(status, Bytes::from(json.to_string()))),
        );
        self
    }

    /// Configures a transport error.
    #[allow(dead_code)]
    pub fn with_transport_error(self, url: &str, error: HttpError) -> Self {
        self.client.set_response(url, MockResponse::Error(error));
        self
    }

    /// Configures a request that never completes.
    #[allow(dead_code)]
    pub fn with_hanging_response(self, url: &str) -> Self {
        self.client.set_response(url, MockResponse::Hang);
        self
    }

    /// Builds the configured MockHttpClient.
    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}
