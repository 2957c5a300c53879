//! Common test utilities for integration tests.
//!
//! Fixtures for version payloads, configurations and a fully mocked set of
//! session collaborators.
//!
//! # Example
//!
//! ```ignore
//! use common::{MockSession, test_config};
//!
//! let mocks = MockSession::new();
//! let session = SessionCoordinators::start(&test_config(), mocks.collaborators());
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use chrono::{DateTime, FixedOffset};
use std::sync::Arc;
use std::time::Duration;

use dosewatch::config::SessionConfig;
use dosewatch::session::SessionCollaborators;

/// Version endpoint used with the mock HTTP client.
pub const VERSION_URL: &str = "https://app.example.com/version.json";

/// JSON body of a version descriptor.
pub fn version_body(timestamp: i64) -> String {
    serde_json::json!({
        "timestamp": timestamp,
        "date": "2024-06-10T09:00:00Z",
        "version": format!("build-{}", timestamp),
    })
    .to_string()
}

/// Configuration pointed at [`VERSION_URL`] with background polling off.
pub fn test_config() -> SessionConfig {
    SessionConfig::default()
        .with_version_url(VERSION_URL)
        .with_poll_interval(None)
        .with_reload_delay(Duration::from_millis(1500))
}

/// Parse an RFC 3339 timestamp.
pub fn at(rfc3339: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap()
}

/// One mock per collaborator, kept around so tests can inspect them.
pub struct MockSession {
    pub http: MockHttpClient,
    pub store: InMemoryStore,
    pub auth: MockAuth,
    pub shell: RecordingShell,
    pub clock: InstantClock,
}

impl MockSession {
    pub fn new() -> Self {
        Self::with_http(MockHttpClient::new())
    }

    pub fn with_http(http: MockHttpClient) -> Self {
        Self {
            http,
            store: InMemoryStore::new(),
            auth: MockAuth::new(),
            shell: RecordingShell::new(),
            clock: InstantClock::new(at("2024-03-01T08:00:00+00:00")),
        }
    }

    pub fn collaborators(&self) -> SessionCollaborators {
        SessionCollaborators {
            http: Arc::new(self.http.clone()),
            store: Arc::new(self.store.clone()),
            auth: Arc::new(self.auth.clone()),
            shell: Arc::new(self.shell.clone()),
            notifier: Arc::new(self.shell.clone()),
            clock: Arc::new(self.clock.clone()),
        }
    }
}

impl Default for MockSession {
    fn default() -> Self {
        Self::new()
    }
}
