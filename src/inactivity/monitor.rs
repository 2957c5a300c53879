//! Inactivity deadline task and its handle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

use super::types::ActivityKind;
use crate::session::{SessionFlags, Subscription};
use crate::traits::{AppShell, AuthGateway, NotificationKind, Notifier, Route};

/// Minimum spacing between two accepted deadline resets.
pub const ACTIVITY_THROTTLE: Duration = Duration::from_secs(1);

/// Notification shown when the session ends for inactivity.
pub const SIGNED_OUT_MESSAGE: &str = "You have been signed out after a period of inactivity";

/// Monitor settings. A zero timeout behaves like `enabled = false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InactivityConfig {
    pub timeout_minutes: u32,
    pub enabled: bool,
}

impl InactivityConfig {
    pub fn new(timeout_minutes: u32, enabled: bool) -> Self {
        Self {
            timeout_minutes,
            enabled,
        }
    }

    pub fn disabled() -> Self {
        Self::new(0, false)
    }

    /// Whether this configuration arms a deadline at all.
    pub fn is_active(&self) -> bool {
        self.enabled && self.timeout_minutes > 0
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_minutes) * 60)
    }
}

#[derive(Debug, Clone, Copy)]
enum Signal {
    Activity(ActivityKind),
    Reset,
}

/// Factory for inactivity monitor runs.
///
/// Holds the collaborators; [`InactivityMonitor::start`] spawns the
/// deadline task and returns the handle that owns it.
#[derive(Clone)]
pub struct InactivityMonitor {
    auth: Arc<dyn AuthGateway>,
    shell: Arc<dyn AppShell>,
    notifier: Arc<dyn Notifier>,
    flags: Option<SessionFlags>,
    throttle: Duration,
}

impl InactivityMonitor {
    pub fn new(
        auth: Arc<dyn AuthGateway>,
        shell: Arc<dyn AppShell>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            auth,
            shell,
            notifier,
            flags: None,
            throttle: ACTIVITY_THROTTLE,
        }
    }

    /// Consult session flags before signing out; an open file picker
    /// re-arms the deadline instead.
    pub fn with_flags(mut self, flags: SessionFlags) -> Self {
        self.flags = Some(flags);
        self
    }

    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    /// Begin observing. Inactive configurations return an idle handle.
    pub fn start(&self, config: InactivityConfig) -> InactivityHandle {
        let mut handle = InactivityHandle {
            monitor: self.clone(),
            config,
            run: None,
        };
        handle.spawn_run();
        handle
    }

    async fn run(self, window: Duration, mut rx: mpsc::UnboundedReceiver<Signal>, fired: Arc<AtomicBool>) {
        let mut last_reset = Instant::now();
        let deadline = tokio::time::sleep_until(last_reset + window);
        tokio::pin!(deadline);

        tracing::debug!("Inactivity monitor armed ({:?})", window);

        loop {
            tokio::select! {
                () = deadline.as_mut() => {
                    if self.flags.as_ref().is_some_and(|f| f.is_file_picker_active()) {
                        tracing::debug!("Inactivity deadline reached with file picker open, re-arming");
                        last_reset = Instant::now();
                        deadline.as_mut().reset(last_reset + window);
                        continue;
                    }
                    break;
                }
                signal = rx.recv() => {
                    let Some(signal) = signal else {
                        // Handle dropped without an explicit stop
                        return;
                    };
                    let now = Instant::now();
                    if now.duration_since(last_reset) > self.throttle {
                        last_reset = now;
                        deadline.as_mut().reset(now + window);
                        match signal {
                            Signal::Activity(kind) => tracing::trace!("Inactivity deadline reset by {}", kind),
                            Signal::Reset => tracing::trace!("Inactivity deadline reset"),
                        }
                    }
                }
            }
        }

        fired.store(true, Ordering::SeqCst);
        drop(rx);
        // Detached from the run's subscription: stopping or reconfiguring
        // the handle mid sign-out must not strand the user before navigation.
        tokio::spawn(async move { self.sign_out_for_inactivity().await });
    }

    async fn sign_out_for_inactivity(&self) {
        tracing::info!("Session inactive, signing out");
        self.notifier.notify(NotificationKind::Info, SIGNED_OUT_MESSAGE);

        if let Err(e) = self.auth.sign_out().await {
            // The session is expired either way; never leave the user on
            // an authenticated screen.
            tracing::warn!("Sign-out after inactivity failed: {}", e);
        }

        self.shell.navigate(Route::Auth);
    }
}

struct Run {
    tx: mpsc::UnboundedSender<Signal>,
    fired: Arc<AtomicBool>,
    subscription: Subscription,
}

/// Owns the running monitor. Dropping it cancels the pending deadline.
pub struct InactivityHandle {
    monitor: InactivityMonitor,
    config: InactivityConfig,
    run: Option<Run>,
}

impl InactivityHandle {
    fn spawn_run(&mut self) {
        if !self.config.is_active() {
            tracing::debug!("Inactivity monitor disabled");
            return;
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let fired = Arc::new(AtomicBool::new(false));
        let task = tokio::spawn(self.monitor.clone().run(
            self.config.window(),
            rx,
            Arc::clone(&fired),
        ));

        self.run = Some(Run {
            tx,
            fired,
            subscription: Subscription::new("inactivity monitor", task),
        });
    }

    pub fn config(&self) -> InactivityConfig {
        self.config
    }

    /// Report a user interaction.
    pub fn record(&self, kind: ActivityKind) {
        self.send(Signal::Activity(kind));
    }

    /// Push the deadline out, subject to the same throttle as interactions.
    pub fn reset_timer(&self) {
        self.send(Signal::Reset);
    }

    fn send(&self, signal: Signal) {
        if let Some(run) = &self.run {
            // A closed channel means the run already fired
            let _ = run.tx.send(signal);
        }
    }

    /// Apply a new configuration.
    ///
    /// Any change tears down the current run and starts from a clean
    /// deadline; an identical configuration on a live run is a no-op.
    pub fn reconfigure(&mut self, config: InactivityConfig) {
        if config == self.config && self.is_running() {
            return;
        }
        tracing::debug!(
            "Reconfiguring inactivity monitor: {} min, enabled={}",
            config.timeout_minutes,
            config.enabled
        );
        self.stop();
        self.config = config;
        self.spawn_run();
    }

    /// Cancel the pending deadline. Nothing fires afterwards; a sign-out
    /// already under way still completes.
    pub fn stop(&mut self) {
        if let Some(mut run) = self.run.take() {
            run.subscription.cancel();
        }
    }

    /// Whether a deadline is armed.
    pub fn is_running(&self) -> bool {
        self.run
            .as_ref()
            .is_some_and(|run| run.subscription.is_active() && !run.fired.load(Ordering::SeqCst))
    }

    /// Whether the current run reached its deadline and signed out.
    pub fn has_fired(&self) -> bool {
        self.run
            .as_ref()
            .is_some_and(|run| run.fired.load(Ordering::SeqCst))
    }
}

impl Drop for InactivityHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
