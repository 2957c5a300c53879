//! Mock implementations for testing.
//!
//! Test doubles for every collaborator trait, usable from unit tests and
//! the integration tests under `tests/`.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`InMemoryStore`] - Key-value storage with injectable failures
//! - [`MockAuth`] - Sign-out counter with injectable failures
//! - [`RecordingShell`] - Records navigations, reloads and notifications
//! - [`ManualClock`] / [`InstantClock`] - Controllable reference clocks

pub mod auth;
pub mod clock;
pub mod http;
pub mod shell;
pub mod store;

pub use auth::MockAuth;
pub use clock::{InstantClock, ManualClock};
pub use http::MockHttpClient;
pub use shell::RecordingShell;
pub use store::InMemoryStore;
