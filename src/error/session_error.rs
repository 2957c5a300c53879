//! Crate-level error type.
//!
//! `SessionError` wraps the error of every collaborator seam and every
//! coordinator so callers (the CLI in particular) can categorize and
//! report any failure the same way.

use std::fmt;

use super::category::ErrorCategory;
use crate::traits::{AuthError, HttpError, StorageError};
use crate::update::UpdateError;

/// Unified error type for dosewatch.
#[derive(Debug)]
pub enum SessionError {
    /// Transport failure from an [`HttpClient`](crate::traits::HttpClient).
    Http(HttpError),

    /// Local key-value storage failure.
    Storage(StorageError),

    /// Sign-out failure.
    Auth(AuthError),

    /// Version check failure.
    Update(UpdateError),

    /// Input that could not be interpreted.
    InvalidInput { message: String },

    /// Settings that cannot be used.
    Configuration { message: String },
}

impl SessionError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        SessionError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        SessionError::Configuration {
            message: message.into(),
        }
    }

    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            SessionError::Http(err) => match err {
                HttpError::ConnectionFailed(_) | HttpError::Timeout(_) => ErrorCategory::Network,
                HttpError::ServerError { status, .. } if *status == 401 || *status == 403 => {
                    ErrorCategory::Auth
                }
                HttpError::ServerError { .. } => ErrorCategory::Server,
                HttpError::InvalidUrl(_) => ErrorCategory::Configuration,
                HttpError::Other(_) => ErrorCategory::Network,
            },
            SessionError::Storage(_) => ErrorCategory::Storage,
            SessionError::Auth(err) => match err {
                AuthError::Unreachable(_) => ErrorCategory::Network,
                AuthError::Rejected { .. } => ErrorCategory::Auth,
                AuthError::LocalClearFailed(_) => ErrorCategory::Storage,
            },
            SessionError::Update(err) => match err.category() {
                crate::update::UpdateErrorCategory::Network => ErrorCategory::Network,
                crate::update::UpdateErrorCategory::Server => ErrorCategory::Server,
                crate::update::UpdateErrorCategory::Storage => ErrorCategory::Storage,
            },
            SessionError::InvalidInput { .. } => ErrorCategory::User,
            SessionError::Configuration { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            SessionError::Http(err) => err.is_retryable(),
            SessionError::Update(err) => err.is_retryable(),
            _ => self.category().is_retryable(),
        }
    }

    /// Get a user-friendly message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Update(err) => err.user_message(),
            SessionError::InvalidInput { message } => message.clone(),
            SessionError::Configuration { message } => {
                format!("{}. {}", message, self.category().recovery_hint())
            }
            _ => format!(
                "{}: {}. {}",
                self.category().description(),
                self,
                self.category().recovery_hint()
            ),
        }
    }

    /// Get a short error code suitable for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SessionError::Http(_) => "E_HTTP",
            SessionError::Storage(_) => "E_STORAGE",
            SessionError::Auth(_) => "E_AUTH",
            SessionError::Update(err) => err.error_code(),
            SessionError::InvalidInput { .. } => "E_INVALID_INPUT",
            SessionError::Configuration { .. } => "E_CONFIG",
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Http(err) => write!(f, "{}", err),
            SessionError::Storage(err) => write!(f, "{}", err),
            SessionError::Auth(err) => write!(f, "{}", err),
            SessionError::Update(err) => write!(f, "{}", err),
            SessionError::InvalidInput { message } => write!(f, "Invalid input: {}", message),
            SessionError::Configuration { message } => {
                write!(f, "Configuration error: {}", message)
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Http(err) => Some(err),
            SessionError::Storage(err) => Some(err),
            SessionError::Auth(err) => Some(err),
            SessionError::Update(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HttpError> for SessionError {
    fn from(err: HttpError) -> Self {
        SessionError::Http(err)
    }
}

impl From<StorageError> for SessionError {
    fn from(err: StorageError) -> Self {
        SessionError::Storage(err)
    }
}

impl From<AuthError> for SessionError {
    fn from(err: AuthError) -> Self {
        SessionError::Auth(err)
    }
}

impl From<UpdateError> for SessionError {
    fn from(err: UpdateError) -> Self {
        SessionError::Update(err)
    }
}
