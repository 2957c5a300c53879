//! The single reload action shared by every reload trigger.

use std::sync::Arc;
use std::time::Duration;

use super::logger::{log_event, UpdateEvent};
use crate::session::{SessionFlags, Subscription};
use crate::traits::AppShell;

/// How often a delayed reload re-checks an open file picker.
pub const PICKER_RECHECK_INTERVAL: Duration = Duration::from_millis(500);

/// Reloads the host application.
///
/// The version path and the pull gesture each hold a clone; neither knows
/// about the other.
#[derive(Clone)]
pub struct Reloader {
    shell: Arc<dyn AppShell>,
    flags: Option<SessionFlags>,
}

impl Reloader {
    pub fn new(shell: Arc<dyn AppShell>) -> Self {
        Self { shell, flags: None }
    }

    /// Hold delayed reloads while a file picker lease is active.
    pub fn with_flags(mut self, flags: SessionFlags) -> Self {
        self.flags = Some(flags);
        self
    }

    /// Reload immediately.
    pub fn reload_now(&self, reason: &str) {
        log_event(&UpdateEvent::ReloadRequested {
            reason: reason.to_string(),
        });
        self.shell.reload();
    }

    /// Reload once `delay` has passed and no file picker is open.
    ///
    /// Dropping the returned subscription cancels the reload.
    pub fn reload_after(&self, delay: Duration, reason: impl Into<String>) -> Subscription {
        let reloader = self.clone();
        let reason = reason.into();

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let mut deferred = false;
            while reloader.picker_open() {
                if !deferred {
                    log_event(&UpdateEvent::ReloadDeferred {
                        reason: reason.clone(),
                    });
                    deferred = true;
                }
                tokio::time::sleep(PICKER_RECHECK_INTERVAL).await;
            }

            reloader.reload_now(&reason);
        });

        Subscription::new("delayed reload", task)
    }

    fn picker_open(&self) -> bool {
        self.flags
            .as_ref()
            .is_some_and(|flags| flags.is_file_picker_active())
    }
}

impl std::fmt::Debug for Reloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reloader")
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}
