//! Error handling for version checks.
//!
//! Every failure here degrades the same way: notify, leave the stored
//! version alone, never reload. The types still keep enough detail to log
//! and to pick a message for the user.

use std::fmt;
use std::time::Duration;

use crate::traits::{HttpError, StorageError};

/// Represents the category of an update error for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateErrorCategory {
    /// Connection, DNS or timeout problems
    Network,
    /// HTTP error status or an unusable payload
    Server,
    /// The local version marker could not be read or written
    Storage,
}

impl UpdateErrorCategory {
    /// Returns true if a later check is likely to succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            UpdateErrorCategory::Network | UpdateErrorCategory::Server
        )
    }

    /// Returns a short label for the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateErrorCategory::Network => "network",
            UpdateErrorCategory::Server => "server",
            UpdateErrorCategory::Storage => "storage",
        }
    }
}

impl fmt::Display for UpdateErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failure of a single version check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    /// Connection failed (network unreachable, connection refused)
    ConnectionFailed { url: String, message: String },

    /// The fetch did not finish within the configured bound
    Timeout { url: String, duration_secs: u64 },

    /// Server returned an error status code
    ServerError { status: u16, message: String },

    /// Server answered with something that is not a version descriptor
    InvalidResponse { message: String },

    /// Reading or persisting the local version marker failed
    Storage { message: String },
}

impl UpdateError {
    pub fn timeout(url: &str, duration: Duration) -> Self {
        UpdateError::Timeout {
            url: url.to_string(),
            duration_secs: duration.as_secs(),
        }
    }

    /// Get the category of this error.
    pub fn category(&self) -> UpdateErrorCategory {
        match self {
            UpdateError::ConnectionFailed { .. } | UpdateError::Timeout { .. } => {
                UpdateErrorCategory::Network
            }
            UpdateError::ServerError { .. } | UpdateError::InvalidResponse { .. } => {
                UpdateErrorCategory::Server
            }
            UpdateError::Storage { .. } => UpdateErrorCategory::Storage,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Get a user-friendly message suitable for a notification.
    pub fn user_message(&self) -> String {
        match self {
            UpdateError::ConnectionFailed { .. } => {
                "Unable to check for updates. Please check your internet connection and try again."
                    .to_string()
            }
            UpdateError::Timeout { duration_secs: 0, .. } => {
                "Checking for updates timed out. Please try again later.".to_string()
            }
            UpdateError::Timeout { duration_secs, .. } => {
                format!(
                    "Checking for updates timed out after {} seconds. Please try again later.",
                    duration_secs
                )
            }
            UpdateError::ServerError { status, .. } if (500..=599).contains(status) => {
                "The update server is experiencing issues. Please try again later.".to_string()
            }
            UpdateError::ServerError { status, .. } => {
                format!("Unable to check for updates (HTTP {}).", status)
            }
            UpdateError::InvalidResponse { .. } => {
                "Received an invalid response from the update server. Please try again later."
                    .to_string()
            }
            UpdateError::Storage { .. } => {
                "Unable to save the application version. The update will be retried later."
                    .to_string()
            }
        }
    }

    /// Get a short error code suitable for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            UpdateError::ConnectionFailed { .. } => "E_CONN_FAILED",
            UpdateError::Timeout { .. } => "E_TIMEOUT",
            UpdateError::ServerError { .. } => "E_SERVER",
            UpdateError::InvalidResponse { .. } => "E_INVALID_RESPONSE",
            UpdateError::Storage { .. } => "E_STORAGE",
        }
    }
}

impl fmt::Display for UpdateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            UpdateError::Timeout { url, duration_secs } => {
                write!(f, "Fetching '{}' timed out after {} seconds", url, duration_secs)
            }
            UpdateError::ServerError { status, message } => {
                write!(f, "Server error (HTTP {}): {}", status, message)
            }
            UpdateError::InvalidResponse { message } => {
                write!(f, "Invalid response: {}", message)
            }
            UpdateError::Storage { message } => {
                write!(f, "Version storage error: {}", message)
            }
        }
    }
}

impl std::error::Error for UpdateError {}

impl From<StorageError> for UpdateError {
    fn from(err: StorageError) -> Self {
        UpdateError::Storage {
            message: err.to_string(),
        }
    }
}

/// Helper to classify a transport error into an UpdateError.
pub fn classify_http_error(err: HttpError, url: &str) -> UpdateError {
    match err {
        HttpError::ConnectionFailed(message) | HttpError::Other(message) => {
            UpdateError::ConnectionFailed {
                url: url.to_string(),
                message,
            }
        }
        HttpError::InvalidUrl(message) => UpdateError::ConnectionFailed {
            url: url.to_string(),
            message: format!("Invalid URL: {}", message),
        },
        // The client's own timeout; the checker's bound is reported separately
        HttpError::Timeout(_) => UpdateError::Timeout {
            url: url.to_string(),
            duration_secs: 0,
        },
        HttpError::ServerError { status, message } => UpdateError::ServerError { status, message },
    }
}
