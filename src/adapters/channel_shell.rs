//! Channel-backed shell and notifier.
//!
//! Coordinators run on background tasks; the UI owns the event loop. This
//! adapter turns shell requests into messages the UI loop drains, the same
//! way the rest of the app talks to its main loop.

use tokio::sync::mpsc;

use crate::traits::{AppShell, NotificationKind, Notifier, Route};

/// A request from a coordinator to the host UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    Navigate(Route),
    Reload,
    Notify {
        kind: NotificationKind,
        message: String,
    },
}

/// [`AppShell`] + [`Notifier`] that forwards everything over an unbounded
/// channel.
#[derive(Debug, Clone)]
pub struct ChannelShell {
    tx: mpsc::UnboundedSender<ShellEvent>,
}

impl ChannelShell {
    pub fn new(tx: mpsc::UnboundedSender<ShellEvent>) -> Self {
        Self { tx }
    }

    /// Create a shell together with the receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ShellEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    fn send(&self, event: ShellEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("Shell channel closed, dropping event");
        }
    }
}

impl AppShell for ChannelShell {
    fn navigate(&self, route: Route) {
        self.send(ShellEvent::Navigate(route));
    }

    fn reload(&self) {
        self.send(ShellEvent::Reload);
    }
}

impl Notifier for ChannelShell {
    fn notify(&self, kind: NotificationKind, message: &str) {
        self.send(ShellEvent::Notify {
            kind,
            message: message.to_string(),
        });
    }
}
