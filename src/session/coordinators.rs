//! The coordinator bundle for one application session.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::{SessionFlags, Teardown};
use crate::config::SessionConfig;
use crate::inactivity::{ActivityKind, InactivityConfig, InactivityHandle, InactivityMonitor};
use crate::intake::OverdueEvaluator;
use crate::lockout::LockoutTimer;
use crate::traits::{AppShell, AuthGateway, HttpClient, KeyValueStore, Notifier, ReferenceClock};
use crate::update::{spawn_update_poller, PullToRefresh, UpdateCoordinator};

/// Host-side implementations the coordinators attach to.
#[derive(Clone)]
pub struct SessionCollaborators {
    pub http: Arc<dyn HttpClient>,
    pub store: Arc<dyn KeyValueStore>,
    pub auth: Arc<dyn AuthGateway>,
    pub shell: Arc<dyn AppShell>,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn ReferenceClock>,
}

/// Every coordinator of a running session.
///
/// Coordinators never call each other; they only share the session flags.
pub struct SessionCoordinators {
    flags: SessionFlags,
    inactivity: InactivityHandle,
    update: Arc<UpdateCoordinator>,
    pull: PullToRefresh,
    overdue: OverdueEvaluator,
    clock: Arc<dyn ReferenceClock>,
    teardown: Teardown,
}

impl SessionCoordinators {
    /// Wire and start everything. Must be called inside a tokio runtime.
    pub fn start(config: &SessionConfig, collaborators: SessionCollaborators) -> Self {
        let SessionCollaborators {
            http,
            store,
            auth,
            shell,
            notifier,
            clock,
        } = collaborators;
        let flags = SessionFlags::new();
        let mut teardown = Teardown::new();

        let inactivity = InactivityMonitor::new(auth, Arc::clone(&shell), Arc::clone(&notifier))
            .with_flags(flags.clone())
            .start(InactivityConfig::new(
                config.inactivity_minutes,
                config.inactivity_enabled,
            ));

        let update = Arc::new(
            UpdateCoordinator::new(http, store, shell, notifier, config).with_flags(flags.clone()),
        );
        {
            let update = Arc::clone(&update);
            teardown.add("pending reload", move || update.cancel_pending_reload());
        }
        if let Some(interval) = config.poll_interval {
            teardown.add_subscription(spawn_update_poller(Arc::clone(&update), interval));
        }

        let pull = PullToRefresh::new(update.reloader().clone()).with_threshold(config.pull_threshold);
        let overdue = OverdueEvaluator::new(Arc::clone(&clock));

        tracing::info!(
            "Session started (inactivity: {} min, enabled={}, polling: {:?})",
            config.inactivity_minutes,
            config.inactivity_enabled,
            config.poll_interval
        );

        Self {
            flags,
            inactivity,
            update,
            pull,
            overdue,
            clock,
            teardown,
        }
    }

    pub fn flags(&self) -> &SessionFlags {
        &self.flags
    }

    /// Forward a user interaction to the inactivity monitor.
    pub fn record_activity(&self, kind: ActivityKind) {
        self.inactivity.record(kind);
    }

    pub fn inactivity(&self) -> &InactivityHandle {
        &self.inactivity
    }

    pub fn inactivity_mut(&mut self) -> &mut InactivityHandle {
        &mut self.inactivity
    }

    pub fn update(&self) -> &Arc<UpdateCoordinator> {
        &self.update
    }

    pub fn pull_to_refresh(&mut self) -> &mut PullToRefresh {
        &mut self.pull
    }

    pub fn overdue(&self) -> &OverdueEvaluator {
        &self.overdue
    }

    /// Start a lockout countdown on the session clock.
    pub fn start_lockout(&self, is_locked_out: bool, lock_end: Option<DateTime<Utc>>) -> LockoutTimer {
        LockoutTimer::start(Arc::clone(&self.clock), is_locked_out, lock_end)
    }

    /// Whether the inactivity monitor has signed the user out.
    pub fn signed_out(&self) -> bool {
        self.inactivity.has_fired()
    }

    /// Stop every timer and background task. Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.inactivity.stop();
        if !self.teardown.is_empty() {
            tracing::info!("Shutting down session coordinators");
        }
        self.teardown.run();
    }
}

impl Drop for SessionCoordinators {
    fn drop(&mut self) {
        self.shutdown();
    }
}
