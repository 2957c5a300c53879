//! Update event logging.
//!
//! Structured `tracing` output for version checks and reloads, under the
//! `dosewatch::update` target.

use std::time::{Duration, Instant};

use super::errors::UpdateError;

/// Log level for update events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateLogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Types of update events that can be logged.
#[derive(Debug, Clone)]
pub enum UpdateEvent {
    // ========== Check Events ==========
    /// Starting a version check
    CheckStarted { trigger: String, url: String },
    /// Version check completed
    CheckCompleted {
        local_version: Option<String>,
        server_version: String,
        update_available: bool,
        duration: Duration,
    },
    /// Version check failed
    CheckFailed {
        error: String,
        error_code: String,
        duration: Duration,
    },

    // ========== Reconciliation Events ==========
    /// First run: server version recorded without reloading
    VersionInitialized { version: String },
    /// New version persisted, reload pending
    ReloadScheduled { version: String, delay: Duration },

    // ========== Reload Events ==========
    /// Application reload requested
    ReloadRequested { reason: String },
    /// Reload suppressed because a file picker is open
    ReloadDeferred { reason: String },
}

impl UpdateEvent {
    /// Get the log level for this event.
    pub fn level(&self) -> UpdateLogLevel {
        match self {
            UpdateEvent::CheckStarted { .. } => UpdateLogLevel::Debug,

            UpdateEvent::CheckCompleted { .. }
            | UpdateEvent::VersionInitialized { .. }
            | UpdateEvent::ReloadScheduled { .. }
            | UpdateEvent::ReloadRequested { .. } => UpdateLogLevel::Info,

            UpdateEvent::ReloadDeferred { .. } => UpdateLogLevel::Warn,

            UpdateEvent::CheckFailed { .. } => UpdateLogLevel::Error,
        }
    }

    /// Get a human-readable message for this event.
    pub fn message(&self) -> String {
        match self {
            UpdateEvent::CheckStarted { trigger, url } => {
                format!("Checking for updates ({} check) at {}", trigger, url)
            }
            UpdateEvent::CheckCompleted {
                local_version,
                server_version,
                update_available,
                duration,
            } => {
                let local = local_version.as_deref().unwrap_or("none");
                if *update_available {
                    format!(
                        "Update available: {} -> {} (checked in {:.1}s)",
                        local,
                        server_version,
                        duration.as_secs_f32()
                    )
                } else {
                    format!(
                        "Already up to date: {} (checked in {:.1}s)",
                        server_version,
                        duration.as_secs_f32()
                    )
                }
            }
            UpdateEvent::CheckFailed {
                error,
                error_code,
                duration,
            } => {
                format!(
                    "Update check failed [{}]: {} (after {:.1}s)",
                    error_code,
                    error,
                    duration.as_secs_f32()
                )
            }
            UpdateEvent::VersionInitialized { version } => {
                format!("Recorded initial application version {}", version)
            }
            UpdateEvent::ReloadScheduled { version, delay } => {
                format!(
                    "Stored version {}, reloading in {}ms",
                    version,
                    delay.as_millis()
                )
            }
            UpdateEvent::ReloadRequested { reason } => {
                format!("Reloading application: {}", reason)
            }
            UpdateEvent::ReloadDeferred { reason } => {
                format!("Reload skipped while a file picker is open: {}", reason)
            }
        }
    }
}

/// Times one operation and writes its events.
#[derive(Debug)]
pub struct UpdateLogger {
    operation_start: Option<Instant>,
}

impl Default for UpdateLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateLogger {
    pub fn new() -> Self {
        Self {
            operation_start: None,
        }
    }

    /// Start timing an operation.
    pub fn start_operation(&mut self) {
        self.operation_start = Some(Instant::now());
    }

    /// Get the elapsed duration since the operation started.
    pub fn elapsed(&self) -> Duration {
        self.operation_start
            .map(|start| start.elapsed())
            .unwrap_or_default()
    }

    /// Log an update event.
    pub fn log(&self, event: &UpdateEvent) {
        log_event(event);
    }

    // ========== Convenience methods for common events ==========

    /// Log the start of a version check.
    pub fn log_check_started(&mut self, trigger: &str, url: &str) {
        self.start_operation();
        self.log(&UpdateEvent::CheckStarted {
            trigger: trigger.to_string(),
            url: url.to_string(),
        });
    }

    /// Log a successful version check.
    pub fn log_check_completed(&self, local_version: Option<&str>, server_version: &str) {
        self.log(&UpdateEvent::CheckCompleted {
            local_version: local_version.map(str::to_string),
            server_version: server_version.to_string(),
            update_available: local_version.is_some_and(|local| local != server_version),
            duration: self.elapsed(),
        });
    }

    /// Log a failed version check.
    pub fn log_check_failed(&self, error: &UpdateError) {
        tracing::error!(
            target: "dosewatch::update",
            error_code = %error.error_code(),
            error_category = %error.category(),
            retryable = %error.is_retryable(),
            "Update error: {}",
            error
        );
        self.log(&UpdateEvent::CheckFailed {
            error: error.to_string(),
            error_code: error.error_code().to_string(),
            duration: self.elapsed(),
        });
    }
}

/// Write one event at its level.
pub fn log_event(event: &UpdateEvent) {
    let message = event.message();

    match event.level() {
        UpdateLogLevel::Debug => {
            tracing::debug!(target: "dosewatch::update", "{}", message);
        }
        UpdateLogLevel::Info => {
            tracing::info!(target: "dosewatch::update", "{}", message);
        }
        UpdateLogLevel::Warn => {
            tracing::warn!(target: "dosewatch::update", "{}", message);
        }
        UpdateLogLevel::Error => {
            tracing::error!(target: "dosewatch::update", "{}", message);
        }
    }
}
