//! Error handling for dosewatch.
//!
//! - **Error Categories**: high-level classification for handling decisions
//! - **Unified Error Type**: `SessionError` wraps every seam's error
//! - **Result Type Alias**: `SessionResult<T>`
//!
//! Coordinators never fail the process: network and parse failures are
//! notified and retried later, a failed sign-out still navigates to auth.
//! These types exist for logging and for the CLI.
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, DNS, timeout | Yes |
//! | Auth | Sign-out rejected, token problems | No |
//! | Server | Error status, bad payload | Yes |
//! | Storage | Local key-value store | No |
//! | User | Invalid input | No |
//! | Configuration | Invalid settings | No |

mod category;
mod session_error;

pub use category::ErrorCategory;
pub use session_error::SessionError;

/// Result alias used at the crate's outer surfaces.
pub type SessionResult<T> = Result<T, SessionError>;
