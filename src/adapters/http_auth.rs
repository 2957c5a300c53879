//! HTTP sign-out gateway for the hosted auth service.

use async_trait::async_trait;
use std::sync::Arc;

use crate::traits::{AuthError, AuthGateway, Headers, HttpClient, HttpError, KeyValueStore};

/// Storage key holding the bearer token of the current session.
pub const SESSION_TOKEN_KEY: &str = "session_token";

/// Signs out against `<auth_url>/logout` and clears the local token.
///
/// The local token is cleared even when the remote call fails, so an
/// expired session can never stay authenticated on this device. The
/// remote error is still returned for logging.
pub struct HttpAuthGateway {
    http: Arc<dyn HttpClient>,
    store: Arc<dyn KeyValueStore>,
    auth_url: String,
}

impl HttpAuthGateway {
    pub fn new(
        http: Arc<dyn HttpClient>,
        store: Arc<dyn KeyValueStore>,
        auth_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            store,
            auth_url: auth_url.into(),
        }
    }

    fn logout_url(&self) -> String {
        format!("{}/logout", self.auth_url.trim_end_matches('/'))
    }

    async fn revoke_remote(&self, token: &str) -> Result<(), AuthError> {
        let mut headers = Headers::new();
        headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let response = self
            .http
            .post(&self.logout_url(), "{}", &headers)
            .await
            .map_err(|e| match e {
                HttpError::ServerError { status, message } => {
                    AuthError::Rejected { status, message }
                }
                other => AuthError::Unreachable(other.to_string()),
            })?;

        // 401 means the token is already dead, which is what we wanted
        if response.is_success() || response.status == 401 {
            Ok(())
        } else {
            Err(AuthError::Rejected {
                status: response.status,
                message: response.text().unwrap_or_default(),
            })
        }
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn sign_out(&self) -> Result<(), AuthError> {
        let token = self
            .store
            .get(SESSION_TOKEN_KEY)
            .map_err(|e| AuthError::LocalClearFailed(e.to_string()))?;

        let Some(token) = token else {
            tracing::debug!("No session token stored, sign-out is a no-op");
            return Ok(());
        };

        let remote = self.revoke_remote(&token).await;

        self.store
            .remove(SESSION_TOKEN_KEY)
            .map_err(|e| AuthError::LocalClearFailed(e.to_string()))?;

        match &remote {
            Ok(()) => tracing::info!("Session signed out"),
            Err(e) => tracing::warn!("Remote sign-out failed, local session cleared: {}", e),
        }
        remote
    }
}
