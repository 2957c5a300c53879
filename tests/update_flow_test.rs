//! Version check flow against a real HTTP server and file storage.
//!
//! Uses wiremock for the version endpoint, the reqwest adapter and a
//! temporary JSON store, so the full production stack is exercised.

mod common;

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::RecordingShell;
use dosewatch::adapters::{FileKeyValueStore, ReqwestHttpClient};
use dosewatch::config::SessionConfig;
use dosewatch::traits::{KeyValueStore, NotificationKind};
use dosewatch::update::{
    CheckTrigger, UpdateCoordinator, UpdateError, UpdateOutcome, APP_VERSION_KEY,
    CACHE_BUST_PARAM, UPDATE_AVAILABLE_MESSAGE, UP_TO_DATE_MESSAGE,
};

struct Harness {
    server: MockServer,
    _dir: TempDir,
    store_path: std::path::PathBuf,
    shell: RecordingShell,
    coordinator: UpdateCoordinator,
}

impl Harness {
    async fn start() -> Self {
        Self::start_with(|config| config).await
    }

    async fn start_with(tweak: impl FnOnce(SessionConfig) -> SessionConfig) -> Self {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        let store_path = dir.path().join("storage.json");

        let config = tweak(
            SessionConfig::default()
                .with_version_url(format!("{}/version.json", server.uri()))
                .with_poll_interval(None)
                .with_reload_delay(Duration::from_millis(50)),
        );

        let shell = RecordingShell::new();
        let coordinator = UpdateCoordinator::new(
            Arc::new(ReqwestHttpClient::new()),
            Arc::new(FileKeyValueStore::at_path(&store_path)),
            Arc::new(shell.clone()),
            Arc::new(shell.clone()),
            &config,
        );

        Self {
            server,
            _dir: dir,
            store_path,
            shell,
            coordinator,
        }
    }

    async fn serve_version(&self, timestamp: i64) {
        self.server.reset().await;
        Mock::given(method("GET"))
            .and(path("/version.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "timestamp": timestamp,
                "date": "2024-06-10T09:00:00Z",
                "version": format!("build-{}", timestamp),
            })))
            .mount(&self.server)
            .await;
    }

    async fn serve(&self, template: ResponseTemplate) {
        self.server.reset().await;
        Mock::given(method("GET"))
            .and(path("/version.json"))
            .respond_with(template)
            .mount(&self.server)
            .await;
    }

    /// Read the marker back through a fresh store, as a restarted app would.
    fn persisted_marker(&self) -> Option<String> {
        FileKeyValueStore::at_path(&self.store_path)
            .get(APP_VERSION_KEY)
            .unwrap()
    }

    fn seed_marker(&self, marker: &str) {
        FileKeyValueStore::at_path(&self.store_path)
            .set(APP_VERSION_KEY, marker)
            .unwrap();
    }
}

#[tokio::test]
async fn test_first_run_records_version_without_reload() {
    let harness = Harness::start().await;
    harness.serve_version(1718000000000).await;

    let outcome = harness
        .coordinator
        .check_for_updates(CheckTrigger::Manual)
        .await
        .unwrap();

    assert!(matches!(outcome, UpdateOutcome::Initialized { .. }));
    assert_eq!(harness.persisted_marker().as_deref(), Some("1718000000000"));

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(harness.shell.reload_count(), 0);
    assert!(harness
        .shell
        .notifications_of(NotificationKind::Success)
        .is_empty());
}

#[tokio::test]
async fn test_new_version_is_persisted_then_reloaded() {
    let harness = Harness::start().await;
    harness.seed_marker("1000");
    harness.serve_version(2000).await;

    let outcome = harness
        .coordinator
        .check_for_updates(CheckTrigger::Manual)
        .await
        .unwrap();

    match outcome {
        UpdateOutcome::UpdateApplied { previous, version } => {
            assert_eq!(previous, "1000");
            assert_eq!(version.timestamp, 2000);
            assert_eq!(version.version.as_deref(), Some("build-2000"));
        }
        other => panic!("expected an applied update, got {:?}", other),
    }

    // Stored before the reload fires
    assert_eq!(harness.persisted_marker().as_deref(), Some("2000"));
    assert_eq!(harness.shell.reload_count(), 0);
    assert_eq!(
        harness.shell.notifications_of(NotificationKind::Success),
        vec![UPDATE_AVAILABLE_MESSAGE.to_string()]
    );

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(harness.shell.reload_count(), 1);
}

#[tokio::test]
async fn test_repeated_checks_are_idempotent() {
    let harness = Harness::start().await;
    harness.serve_version(2000).await;

    harness
        .coordinator
        .check_for_updates(CheckTrigger::Periodic)
        .await
        .unwrap();
    for _ in 0..3 {
        let outcome = harness
            .coordinator
            .check_for_updates(CheckTrigger::Periodic)
            .await
            .unwrap();
        assert!(matches!(outcome, UpdateOutcome::UpToDate { .. }));
    }

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(harness.shell.reload_count(), 0);
    assert_eq!(harness.persisted_marker().as_deref(), Some("2000"));
    // Background checks stay quiet when nothing changed
    assert!(harness.shell.notifications().is_empty());
}

#[tokio::test]
async fn test_manual_check_reports_up_to_date() {
    let harness = Harness::start().await;
    harness.seed_marker("2000");
    harness.serve_version(2000).await;

    harness
        .coordinator
        .check_for_updates(CheckTrigger::Manual)
        .await
        .unwrap();

    assert_eq!(
        harness.shell.notifications_of(NotificationKind::Info),
        vec![UP_TO_DATE_MESSAGE.to_string()]
    );
}

#[tokio::test]
async fn test_server_error_leaves_state_untouched() {
    let harness = Harness::start().await;
    harness.seed_marker("1000");
    harness
        .serve(ResponseTemplate::new(500).set_body_string("boom"))
        .await;

    let err = harness
        .coordinator
        .check_for_updates(CheckTrigger::Manual)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        UpdateError::ServerError {
            status: 500,
            message: "boom".to_string()
        }
    );
    assert_eq!(harness.persisted_marker().as_deref(), Some("1000"));
    assert!(!harness.coordinator.has_pending_reload());
    assert_eq!(
        harness.shell.notifications_of(NotificationKind::Error),
        vec![err.user_message()]
    );

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(harness.shell.reload_count(), 0);
}

#[tokio::test]
async fn test_malformed_payload_is_rejected() {
    let harness = Harness::start().await;
    harness
        .serve(ResponseTemplate::new(200).set_body_string("<!doctype html><html></html>"))
        .await;

    let err = harness
        .coordinator
        .check_for_updates(CheckTrigger::Manual)
        .await
        .unwrap_err();

    assert!(matches!(err, UpdateError::InvalidResponse { .. }));
    assert_eq!(harness.persisted_marker(), None);
}

#[tokio::test]
async fn test_periodic_failure_is_silent() {
    let harness = Harness::start().await;
    harness.serve(ResponseTemplate::new(503)).await;

    let result = harness
        .coordinator
        .check_for_updates(CheckTrigger::Periodic)
        .await;

    assert!(result.is_err());
    assert!(harness.shell.notifications().is_empty());
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let harness =
        Harness::start_with(|config| config.with_fetch_timeout(Duration::from_millis(200))).await;
    harness.seed_marker("1000");
    harness
        .serve(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "timestamp": 2000 }))
                .set_delay(Duration::from_secs(5)),
        )
        .await;

    let err = harness
        .coordinator
        .check_for_updates(CheckTrigger::Manual)
        .await
        .unwrap_err();

    assert!(matches!(err, UpdateError::Timeout { .. }));
    assert!(err.is_retryable());
    assert_eq!(harness.persisted_marker().as_deref(), Some("1000"));
}

#[tokio::test]
async fn test_unreachable_endpoint() {
    // Nothing listens on port 1
    let url = "http://127.0.0.1:1/version.json";

    let dir = TempDir::new().unwrap();
    let shell = RecordingShell::new();
    let coordinator = UpdateCoordinator::new(
        Arc::new(ReqwestHttpClient::new()),
        Arc::new(FileKeyValueStore::at_path(dir.path().join("storage.json"))),
        Arc::new(shell.clone()),
        Arc::new(shell.clone()),
        &SessionConfig::default().with_version_url(url),
    );

    let err = coordinator
        .check_for_updates(CheckTrigger::Manual)
        .await
        .unwrap_err();
    assert!(matches!(err, UpdateError::ConnectionFailed { .. }));
    assert!(err.is_retryable());
    assert_eq!(coordinator.stored_version().unwrap(), None);
}

#[tokio::test]
async fn test_requests_bypass_caches() {
    let harness = Harness::start().await;
    harness.serve_version(2000).await;

    harness
        .coordinator
        .check_for_updates(CheckTrigger::Periodic)
        .await
        .unwrap();
    harness
        .coordinator
        .check_for_updates(CheckTrigger::Periodic)
        .await
        .unwrap();

    let requests = harness.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);

    for request in &requests {
        assert!(request
            .url
            .query_pairs()
            .any(|(key, value)| key == CACHE_BUST_PARAM && !value.is_empty()));
        assert_eq!(
            request
                .headers
                .get("cache-control")
                .and_then(|v| v.to_str().ok()),
            Some("no-cache")
        );
    }
}
