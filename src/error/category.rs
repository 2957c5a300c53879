//! Error categories.
//!
//! Coarse buckets that decide retry policy and how a failure is phrased
//! to the user.

use std::fmt;

/// Where a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Unreachable host, DNS, timeout
    Network,
    /// The auth service refused a session operation
    Auth,
    /// A backend answered, but not usefully
    Server,
    /// The local key-value store failed
    Storage,
    /// Unparseable CLI input
    User,
    /// Unusable settings
    Configuration,
}

impl ErrorCategory {
    /// Network hiccups and backend errors may clear up on their own; the
    /// rest will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Storage => "storage",
            ErrorCategory::User => "user",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Lead-in for user-facing messages.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Could not reach the server",
            ErrorCategory::Auth => "The session could not be ended cleanly",
            ErrorCategory::Server => "The server returned an unexpected answer",
            ErrorCategory::Storage => "Saved app data could not be accessed",
            ErrorCategory::User => "Invalid input",
            ErrorCategory::Configuration => "Invalid settings",
        }
    }

    /// What the user can do about it.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your connection; the next check retries automatically",
            ErrorCategory::Auth => "Sign in again to start a fresh session",
            ErrorCategory::Server => "Try again in a few minutes",
            ErrorCategory::Storage => "Check that the storage file is writable",
            ErrorCategory::User => "See the usage text for accepted formats",
            ErrorCategory::Configuration => "Check your DOSEWATCH_* environment variables",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
