//! Version descriptor fetch.
//!
//! The deployed app publishes `version.json` next to its assets. Every
//! fetch carries a throwaway query parameter and `Cache-Control: no-cache`
//! so neither the browser cache nor an intermediate proxy can answer with
//! a stale descriptor.
//!
//! # Error Handling
//!
//! Transport errors, non-2xx statuses, malformed JSON and the fetch
//! timeout all come back as [`UpdateError`]; callers treat them alike.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use super::errors::{classify_http_error, UpdateError};
use crate::config::DEFAULT_FETCH_TIMEOUT;
use crate::traits::{Headers, HttpClient};

/// Query parameter carrying the cache-busting value.
pub const CACHE_BUST_PARAM: &str = "t";

/// Payload of the version endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDescriptor {
    /// Build timestamp; the only field compared
    pub timestamp: i64,
    /// Human-readable build date (optional)
    #[serde(default)]
    pub date: Option<String>,
    /// Release label (optional)
    #[serde(default)]
    pub version: Option<String>,
}

impl VersionDescriptor {
    /// The value persisted under the local version key.
    pub fn marker(&self) -> String {
        self.timestamp.to_string()
    }

    /// Label for notifications: the release label if present, else the
    /// timestamp.
    pub fn label(&self) -> String {
        self.version.clone().unwrap_or_else(|| self.marker())
    }
}

/// Fetches [`VersionDescriptor`]s from one endpoint.
#[derive(Clone)]
pub struct VersionChecker {
    http: Arc<dyn HttpClient>,
    url: String,
    timeout: Duration,
}

impl VersionChecker {
    pub fn new(http: Arc<dyn HttpClient>, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Bound each fetch; an elapsed bound is reported as a timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The endpoint URL with a cache-busting parameter appended.
    pub fn cache_busted_url(&self, stamp: i64) -> String {
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}{}={}", self.url, separator, CACHE_BUST_PARAM, stamp)
    }

    /// Fetch the current server descriptor.
    pub async fn fetch(&self) -> Result<VersionDescriptor, UpdateError> {
        let url = self.cache_busted_url(Utc::now().timestamp_millis());

        let mut headers = Headers::new();
        headers.insert("Cache-Control".to_string(), "no-cache".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());

        tracing::debug!("Fetching version descriptor from {}", url);

        let response = match tokio::time::timeout(self.timeout, self.http.get(&url, &headers)).await
        {
            Ok(result) => result.map_err(|e| classify_http_error(e, &self.url))?,
            Err(_) => return Err(UpdateError::timeout(&self.url, self.timeout)),
        };

        if !response.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(UpdateError::ServerError {
                status: response.status,
                message,
            });
        }

        response
            .json::<VersionDescriptor>()
            .map_err(|e| UpdateError::InvalidResponse {
                message: format!("Failed to parse version descriptor: {}", e),
            })
    }
}

impl std::fmt::Debug for VersionChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionChecker")
            .field("url", &self.url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
