//! Version reconciliation and the background poller.
//!
//! ```text
//! fetch descriptor ──► stored app_version?
//!                        ├─ none      ─► store, no reload        (Initialized)
//!                        ├─ differs   ─► store, notify, reload   (UpdateApplied)
//!                        └─ equal     ─► notify "no update"      (UpToDate)
//! any failure ─► notify error, store untouched, no reload
//! ```

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::checker::{VersionChecker, VersionDescriptor};
use super::errors::UpdateError;
use super::logger::{UpdateEvent, UpdateLogger};
use super::reload::Reloader;
use crate::config::SessionConfig;
use crate::session::{SessionFlags, Subscription};
use crate::traits::{AppShell, HttpClient, KeyValueStore, NotificationKind, Notifier};

/// Storage key holding the last reconciled server timestamp.
pub const APP_VERSION_KEY: &str = "app_version";

/// Notification shown when the server has a newer build.
pub const UPDATE_AVAILABLE_MESSAGE: &str = "A new version is available. Updating...";

/// Notification shown when a manual check finds nothing new.
pub const UP_TO_DATE_MESSAGE: &str = "You are using the latest version";

/// What started a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckTrigger {
    /// The user asked; every outcome is announced.
    Manual,
    /// The background poller; only a found update is announced.
    Periodic,
}

impl CheckTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckTrigger::Manual => "manual",
            CheckTrigger::Periodic => "periodic",
        }
    }

    fn is_quiet(&self) -> bool {
        matches!(self, CheckTrigger::Periodic)
    }
}

impl fmt::Display for CheckTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a successful check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Nothing was stored yet; the server version is now recorded.
    Initialized { version: VersionDescriptor },
    /// The server version differed; it is stored and a reload is pending.
    UpdateApplied {
        previous: String,
        version: VersionDescriptor,
    },
    /// Stored and server versions match.
    UpToDate { version: VersionDescriptor },
}

impl UpdateOutcome {
    pub fn reload_scheduled(&self) -> bool {
        matches!(self, UpdateOutcome::UpdateApplied { .. })
    }
}

/// Keeps the locally recorded app version in step with the server.
pub struct UpdateCoordinator {
    checker: VersionChecker,
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    reloader: Reloader,
    reload_delay: Duration,
    flags: Option<SessionFlags>,
    pending_reload: Mutex<Option<Subscription>>,
}

impl UpdateCoordinator {
    pub fn new(
        http: Arc<dyn HttpClient>,
        store: Arc<dyn KeyValueStore>,
        shell: Arc<dyn AppShell>,
        notifier: Arc<dyn Notifier>,
        config: &SessionConfig,
    ) -> Self {
        Self {
            checker: VersionChecker::new(http, config.version_url.clone())
                .with_timeout(config.fetch_timeout),
            store,
            notifier,
            reloader: Reloader::new(shell),
            reload_delay: config.reload_delay,
            flags: None,
            pending_reload: Mutex::new(None),
        }
    }

    /// Skip background checks and hold reloads while a file picker is open.
    pub fn with_flags(mut self, flags: SessionFlags) -> Self {
        self.reloader = self.reloader.with_flags(flags.clone());
        self.flags = Some(flags);
        self
    }

    /// The reload action, for wiring the pull gesture.
    pub fn reloader(&self) -> &Reloader {
        &self.reloader
    }

    pub fn checker(&self) -> &VersionChecker {
        &self.checker
    }

    /// The locally recorded version marker, if any.
    pub fn stored_version(&self) -> Result<Option<String>, UpdateError> {
        Ok(self.store.get(APP_VERSION_KEY)?)
    }

    /// Fetch the server version and reconcile the stored one.
    ///
    /// On any error the stored version is left as it was and no reload is
    /// scheduled.
    pub async fn check_for_updates(
        &self,
        trigger: CheckTrigger,
    ) -> Result<UpdateOutcome, UpdateError> {
        let mut logger = UpdateLogger::new();
        logger.log_check_started(trigger.as_str(), self.checker.url());

        match self.reconcile(&logger).await {
            Ok(outcome) => {
                self.announce(trigger, &outcome);
                Ok(outcome)
            }
            Err(err) => {
                logger.log_check_failed(&err);
                if !trigger.is_quiet() {
                    self.notifier
                        .notify(NotificationKind::Error, &err.user_message());
                }
                Err(err)
            }
        }
    }

    async fn reconcile(&self, logger: &UpdateLogger) -> Result<UpdateOutcome, UpdateError> {
        let server = self.checker.fetch().await?;
        let stored = self.stored_version()?;
        let marker = server.marker();

        logger.log_check_completed(stored.as_deref(), &marker);

        match stored {
            None => {
                self.store.set(APP_VERSION_KEY, &marker)?;
                logger.log(&UpdateEvent::VersionInitialized { version: marker });
                Ok(UpdateOutcome::Initialized { version: server })
            }
            Some(previous) if previous != marker => {
                // Persist first: a reload must never start with a stale marker
                self.store.set(APP_VERSION_KEY, &marker)?;
                logger.log(&UpdateEvent::ReloadScheduled {
                    version: marker,
                    delay: self.reload_delay,
                });
                self.schedule_reload(&server);
                Ok(UpdateOutcome::UpdateApplied {
                    previous,
                    version: server,
                })
            }
            Some(_) => Ok(UpdateOutcome::UpToDate { version: server }),
        }
    }

    fn announce(&self, trigger: CheckTrigger, outcome: &UpdateOutcome) {
        match outcome {
            UpdateOutcome::UpdateApplied { .. } => {
                self.notifier
                    .notify(NotificationKind::Success, UPDATE_AVAILABLE_MESSAGE);
            }
            UpdateOutcome::UpToDate { .. } if !trigger.is_quiet() => {
                self.notifier.notify(NotificationKind::Info, UP_TO_DATE_MESSAGE);
            }
            _ => {}
        }
    }

    fn schedule_reload(&self, version: &VersionDescriptor) {
        let subscription = self.reloader.reload_after(
            self.reload_delay,
            format!("new version {}", version.label()),
        );
        let mut pending = match self.pending_reload.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        // A newer schedule replaces (and cancels) an older one
        *pending = Some(subscription);
    }

    /// Whether a reload is scheduled and has not happened yet.
    pub fn has_pending_reload(&self) -> bool {
        match self.pending_reload.lock() {
            Ok(guard) => guard.as_ref().is_some_and(Subscription::is_active),
            Err(poisoned) => poisoned.into_inner().as_ref().is_some_and(Subscription::is_active),
        }
    }

    /// Cancel a scheduled reload, if any.
    pub fn cancel_pending_reload(&self) {
        let taken = match self.pending_reload.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(mut subscription) = taken {
            subscription.cancel();
        }
    }

    fn picker_open(&self) -> bool {
        self.flags
            .as_ref()
            .is_some_and(|flags| flags.is_file_picker_active())
    }
}

impl fmt::Debug for UpdateCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateCoordinator")
            .field("checker", &self.checker)
            .field("reload_delay", &self.reload_delay)
            .finish_non_exhaustive()
    }
}

/// Spawn the periodic version check.
///
/// The first check runs immediately, then once per `interval`. Ticks that
/// land while a file picker is open are skipped. The returned subscription
/// owns the task.
pub fn spawn_update_poller(coordinator: Arc<UpdateCoordinator>, interval: Duration) -> Subscription {
    let task = tokio::spawn(async move {
        tracing::info!("Update poller started (interval: {}s)", interval.as_secs());

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            if coordinator.picker_open() {
                tracing::debug!("File picker open, skipping version check");
                continue;
            }

            match coordinator.check_for_updates(CheckTrigger::Periodic).await {
                Ok(outcome) => tracing::trace!("Periodic version check: {:?}", outcome),
                Err(e) => tracing::debug!("Periodic version check failed, retrying next tick: {}", e),
            }
        }
    });

    Subscription::new("update poller", task)
}
