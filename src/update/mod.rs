//! Freshness coordination for the deployed app.
//!
//! This module provides:
//! - Fetching the server's version descriptor with cache busting
//! - Reconciling it with the locally stored `app_version`
//! - A background poller and a delayed, cancellable reload
//! - The pull-to-refresh failsafe, which reloads without any comparison
//! - Error types with user-friendly messages and structured logging
//!
//! # Example
//!
//! ```ignore
//! use dosewatch::update::{CheckTrigger, UpdateCoordinator, UpdateOutcome};
//!
//! match coordinator.check_for_updates(CheckTrigger::Manual).await {
//!     Ok(UpdateOutcome::UpdateApplied { version, .. }) => {
//!         println!("Reloading into {}", version.label());
//!     }
//!     Ok(_) => println!("Already up to date"),
//!     Err(e) => eprintln!("{}", e.user_message()),
//! }
//! ```
//!
//! The version path and the pull gesture never call each other; both end
//! at [`Reloader`].

mod checker;
mod coordinator;
pub mod errors;
pub mod logger;
mod pull;
mod reload;

pub use checker::{VersionChecker, VersionDescriptor, CACHE_BUST_PARAM};
pub use coordinator::{
    spawn_update_poller, CheckTrigger, UpdateCoordinator, UpdateOutcome, APP_VERSION_KEY,
    UPDATE_AVAILABLE_MESSAGE, UP_TO_DATE_MESSAGE,
};
pub use errors::{classify_http_error, UpdateError, UpdateErrorCategory};
pub use logger::{UpdateEvent, UpdateLogLevel, UpdateLogger};
pub use pull::PullToRefresh;
pub use reload::{Reloader, PICKER_RECHECK_INTERVAL};
