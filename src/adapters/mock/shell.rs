//! Recording shell and notifier for testing.

use std::sync::{Arc, Mutex};

use crate::traits::{AppShell, NotificationKind, Notifier, Route};

/// Records every shell call and notification in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingShell {
    navigations: Arc<Mutex<Vec<Route>>>,
    reloads: Arc<Mutex<usize>>,
    notifications: Arc<Mutex<Vec<(NotificationKind, String)>>>,
}

impl RecordingShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigations(&self) -> Vec<Route> {
        self.navigations.lock().unwrap().clone()
    }

    pub fn reload_count(&self) -> usize {
        *self.reloads.lock().unwrap()
    }

    pub fn notifications(&self) -> Vec<(NotificationKind, String)> {
        self.notifications.lock().unwrap().clone()
    }

    /// Notifications of one kind, messages only.
    pub fn notifications_of(&self, kind: NotificationKind) -> Vec<String> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl AppShell for RecordingShell {
    fn navigate(&self, route: Route) {
        self.navigations.lock().unwrap().push(route);
    }

    fn reload(&self) {
        *self.reloads.lock().unwrap() += 1;
    }
}

impl Notifier for RecordingShell {
    fn notify(&self, kind: NotificationKind, message: &str) {
        self.notifications
            .lock()
            .unwrap()
            .push((kind, message.to_string()));
    }
}
