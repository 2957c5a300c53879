//! End-to-end session scenarios on paused time.
//!
//! Every coordinator runs against mocks; `tokio::time` is paused so
//! minutes of idleness pass instantly and deterministically.

mod common;

use std::time::Duration;

use tokio::time::sleep;

use common::{test_config, version_body, MockSession, VERSION_URL};
use dosewatch::inactivity::{ActivityKind, InactivityConfig, SIGNED_OUT_MESSAGE};
use dosewatch::session::SessionCoordinators;
use dosewatch::traits::{KeyValueStore, NotificationKind, ReferenceClock, Route};
use dosewatch::update::{APP_VERSION_KEY, UPDATE_AVAILABLE_MESSAGE};

const MINUTE: Duration = Duration::from_secs(60);

#[tokio::test(start_paused = true)]
async fn test_steady_activity_keeps_session_alive() {
    let mocks = MockSession::new();
    let session =
        SessionCoordinators::start(&test_config().with_inactivity_minutes(1), mocks.collaborators());

    for _ in 0..20 {
        sleep(Duration::from_secs(30)).await;
        session.record_activity(ActivityKind::PointerMove);
    }
    assert!(!session.signed_out());
    assert_eq!(mocks.auth.sign_out_count(), 0);

    // The last interaction was just now; a full window has not passed
    sleep(Duration::from_secs(59)).await;
    assert!(!session.signed_out());

    sleep(Duration::from_secs(2)).await;
    assert!(session.signed_out());
    assert_eq!(mocks.auth.sign_out_count(), 1);
    assert_eq!(mocks.shell.navigations(), vec![Route::Auth]);
    assert_eq!(
        mocks.shell.notifications_of(NotificationKind::Info),
        vec![SIGNED_OUT_MESSAGE.to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn test_sign_out_fires_once() {
    let mocks = MockSession::new();
    let session =
        SessionCoordinators::start(&test_config().with_inactivity_minutes(1), mocks.collaborators());

    sleep(MINUTE * 10).await;
    // Activity after the sign-out must not re-arm anything
    session.record_activity(ActivityKind::Click);
    sleep(MINUTE * 10).await;

    assert_eq!(mocks.auth.sign_out_count(), 1);
    assert_eq!(mocks.shell.navigations().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failed_sign_out_still_leaves_authenticated_area() {
    let mocks = MockSession::new();
    mocks.auth.set_should_fail(true);
    let session =
        SessionCoordinators::start(&test_config().with_inactivity_minutes(2), mocks.collaborators());

    sleep(MINUTE * 2 + Duration::from_secs(1)).await;

    assert!(session.signed_out());
    assert_eq!(mocks.auth.sign_out_count(), 1);
    assert_eq!(mocks.shell.navigations(), vec![Route::Auth]);
}

#[tokio::test(start_paused = true)]
async fn test_shortening_the_window_replaces_the_old_deadline() {
    let mocks = MockSession::new();
    let mut session =
        SessionCoordinators::start(&test_config().with_inactivity_minutes(15), mocks.collaborators());

    sleep(MINUTE * 3).await;
    session
        .inactivity_mut()
        .reconfigure(InactivityConfig::new(1, true));

    sleep(Duration::from_secs(59)).await;
    assert_eq!(mocks.auth.sign_out_count(), 0);

    sleep(Duration::from_secs(2)).await;
    assert_eq!(mocks.auth.sign_out_count(), 1);

    // The original 15 minute deadline never fires
    sleep(MINUTE * 20).await;
    assert_eq!(mocks.auth.sign_out_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_disabled_monitor_never_signs_out() {
    let mocks = MockSession::new();
    let session = SessionCoordinators::start(
        &test_config()
            .with_inactivity_minutes(1)
            .with_inactivity_enabled(false),
        mocks.collaborators(),
    );

    sleep(MINUTE * 60).await;
    assert!(!session.inactivity().is_running());
    assert_eq!(mocks.auth.sign_out_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_open_file_picker_defers_sign_out() {
    let mocks = MockSession::new();
    let session =
        SessionCoordinators::start(&test_config().with_inactivity_minutes(1), mocks.collaborators());

    let lease = session.flags().acquire_file_picker();
    sleep(MINUTE * 4 + Duration::from_secs(30)).await;
    assert_eq!(mocks.auth.sign_out_count(), 0);

    drop(lease);
    sleep(MINUTE + Duration::from_secs(1)).await;
    assert_eq!(mocks.auth.sign_out_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_poller_picks_up_a_new_deployment() {
    let mocks = MockSession::new();
    mocks.http.set_json(VERSION_URL, 200, &version_body(1000));

    let session = SessionCoordinators::start(
        &test_config()
            .with_poll_interval(Some(MINUTE * 5))
            .with_inactivity_enabled(false),
        mocks.collaborators(),
    );

    // First check runs right away and only records the version
    sleep(Duration::from_secs(1)).await;
    assert_eq!(mocks.store.peek(APP_VERSION_KEY).as_deref(), Some("1000"));
    assert_eq!(mocks.shell.reload_count(), 0);

    mocks.http.set_json(VERSION_URL, 200, &version_body(2000));
    // Tick at 5:00, reload 1.5s later
    sleep(MINUTE * 5 + Duration::from_secs(2)).await;

    assert_eq!(mocks.store.peek(APP_VERSION_KEY).as_deref(), Some("2000"));
    assert_eq!(
        mocks.shell.notifications_of(NotificationKind::Success),
        vec![UPDATE_AVAILABLE_MESSAGE.to_string()]
    );
    assert_eq!(mocks.shell.reload_count(), 1);

    // Later ticks see the same version and leave the app alone
    sleep(MINUTE * 15).await;
    assert_eq!(mocks.shell.reload_count(), 1);
    drop(session);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_pending_reload() {
    let mocks = MockSession::new();
    mocks.store.set(APP_VERSION_KEY, "1000").unwrap();
    mocks.http.set_json(VERSION_URL, 200, &version_body(2000));

    let mut session = SessionCoordinators::start(
        &test_config().with_poll_interval(Some(MINUTE * 5)),
        mocks.collaborators(),
    );

    sleep(Duration::from_millis(100)).await;
    assert!(session.update().has_pending_reload());

    session.shutdown();
    sleep(MINUTE * 30).await;

    assert_eq!(mocks.shell.reload_count(), 0);
    assert_eq!(mocks.auth.sign_out_count(), 0);
    // Shutting down again is harmless
    session.shutdown();
}

#[tokio::test(start_paused = true)]
async fn test_pull_gesture_works_with_broken_version_endpoint() {
    let mocks = MockSession::new();
    mocks.http.set_json(VERSION_URL, 500, "internal error");

    let mut session = SessionCoordinators::start(
        &test_config().with_poll_interval(Some(MINUTE)),
        mocks.collaborators(),
    );
    sleep(Duration::from_secs(1)).await;
    assert_eq!(mocks.store.peek(APP_VERSION_KEY), None);

    let pull = session.pull_to_refresh();
    pull.touch_start(10.0, 0.0);
    assert!(pull.touch_move(120.0));
    pull.touch_end();

    assert_eq!(mocks.shell.reload_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_lockout_counts_down_on_session_clock() {
    let mocks = MockSession::new();
    let session = SessionCoordinators::start(&test_config(), mocks.collaborators());

    let lock_end = mocks.clock.now_utc() + chrono::Duration::seconds(10);
    let timer = session.start_lockout(true, Some(lock_end));
    assert_eq!(timer.remaining_seconds(), 10);
    assert!(timer.is_locked());

    let mut seen = Vec::new();
    sleep(Duration::from_millis(500)).await;
    for _ in 0..11 {
        seen.push(timer.remaining_seconds());
        sleep(Duration::from_secs(1)).await;
    }

    assert_eq!(seen, vec![10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
    assert!(!timer.is_locked());
    assert!(!timer.is_ticking());
}
