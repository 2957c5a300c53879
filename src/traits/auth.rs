//! Authentication collaborator.

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a sign-out attempt.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The auth backend could not be reached
    #[error("Auth backend unreachable: {0}")]
    Unreachable(String),
    /// The auth backend rejected the request
    #[error("Sign-out rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    /// Local session data could not be cleared
    #[error("Failed to clear local session: {0}")]
    LocalClearFailed(String),
}

/// Remote authentication operations needed by the session coordinators.
///
/// `sign_out` must be idempotent: signing out an already signed-out
/// session succeeds.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// End the current session.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        assert_eq!(
            AuthError::Rejected {
                status: 401,
                message: "expired".to_string()
            }
            .to_string(),
            "Sign-out rejected (401): expired"
        );
        assert!(AuthError::Unreachable("dns".to_string())
            .to_string()
            .contains("dns"));
    }
}
