//! Concrete implementations of the collaborator traits.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileKeyValueStore`] - JSON-file key-value storage
//! - [`HttpAuthGateway`] - Sign-out against the hosted auth service
//! - [`ChannelShell`] - Shell + notifier forwarding to the UI loop
//! - [`FixedOffsetClock`] - System clock pinned to the reference offset
//! - [`ZonedClock`] - System clock in a named timezone, DST-aware
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles for every trait.

pub mod channel_shell;
pub mod file_store;
pub mod http_auth;
pub mod mock;
pub mod reqwest_http;
pub mod system_clock;

pub use channel_shell::{ChannelShell, ShellEvent};
pub use file_store::FileKeyValueStore;
pub use http_auth::{HttpAuthGateway, SESSION_TOKEN_KEY};
pub use reqwest_http::ReqwestHttpClient;
pub use system_clock::{parse_offset, parse_zone, FixedOffsetClock, ZonedClock};
