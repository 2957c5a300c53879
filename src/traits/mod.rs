//! Trait abstractions for the host environment.
//!
//! Every coordinator in this crate attaches to the outside world through
//! one of these seams, so tests can drive them with the doubles in
//! [`crate::adapters::mock`].
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP GET/POST used by the version check and sign-out
//! - [`KeyValueStore`] - Local key-value storage (the `app_version` marker)
//! - [`AuthGateway`] - Remote sign-out
//! - [`AppShell`] - Navigation and full application reload
//! - [`Notifier`] - Transient user-facing notifications
//! - [`ReferenceClock`] - Canonical timezone-anchored "now"

pub mod auth;
pub mod clock;
pub mod http;
pub mod shell;
pub mod storage;

pub use auth::{AuthError, AuthGateway};
pub use clock::ReferenceClock;
pub use http::{Headers, HttpClient, HttpError, Response};
pub use shell::{AppShell, NotificationKind, Notifier, Route};
pub use storage::{KeyValueStore, StorageError};
