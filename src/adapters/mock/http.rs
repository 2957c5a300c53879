//! Scripted HTTP client for testing.
//!
//! Answers from a routing table and records every request so tests can
//! assert on URLs, headers and bodies.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// One request seen by [`MockHttpClient`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Full URL, query string included
    pub url: String,
    pub headers: Headers,
    /// POST body; `None` for GET
    pub body: Option<String>,
}

/// What a route answers with.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(Response),
    Error(HttpError),
    /// Never complete; exercises caller-side timeouts
    Hang,
}

#[derive(Debug, Default)]
struct Script {
    routes: Vec<(String, MockResponse)>,
    fallback: Option<MockResponse>,
    seen: Vec<RecordedRequest>,
}

impl Script {
    /// Exact match, else the longest registered prefix, else the fallback.
    fn lookup(&self, url: &str) -> Option<MockResponse> {
        self.routes
            .iter()
            .find(|(route, _)| route == url)
            .or_else(|| {
                self.routes
                    .iter()
                    .filter(|(route, _)| url.starts_with(route.as_str()))
                    .max_by_key(|(route, _)| route.len())
            })
            .map(|(_, response)| response.clone())
            .or_else(|| self.fallback.clone())
    }
}

/// In-memory [`HttpClient`]. Clones share the script.
///
/// A route registered for `https://app.example.com/version.json` also
/// answers the cache-busted `https://app.example.com/version.json?t=...`.
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    script: Arc<Mutex<Script>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap()
    }

    /// Route `url` (exact or prefix) to `response`, replacing any earlier
    /// route for the same URL.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut script = self.script();
        script.routes.retain(|(route, _)| route != url);
        script.routes.push((url.to_string(), response));
    }

    /// Route `url` to a body with the given status.
    pub fn set_json(&self, url: &str, status: u16, json: &str) {
        self.set_response(
            url,
            MockResponse::Success(Response::new(status, bytes::Bytes::from(json.to_string()))),
        );
    }

    /// Answer for URLs no route matches.
    pub fn set_default_response(&self, response: MockResponse) {
        self.script().fallback = Some(response);
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.script().seen.clone()
    }

    pub fn clear_requests(&self) {
        self.script().seen.clear();
    }

    async fn handle(&self, request: RecordedRequest) -> Result<Response, HttpError> {
        let answer = {
            let mut script = self.script();
            let answer = script.lookup(&request.url);
            script.seen.push(request.clone());
            answer
        };

        match answer {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Hang) => std::future::pending().await,
            None => Err(HttpError::Other(format!("no mock route for {}", request.url))),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.handle(RecordedRequest {
            method: "GET".to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body: None,
        })
        .await
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.handle(RecordedRequest {
            method: "POST".to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body: Some(body.to_string()),
        })
        .await
    }
}
