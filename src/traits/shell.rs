//! Application shell and notification collaborators.

use std::fmt;

/// Navigable entry points the coordinators may send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Authentication entry point
    Auth,
    /// Application home
    Home,
}

impl Route {
    /// Path of the route in the host router.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Auth => "/auth",
            Route::Home => "/",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Success,
    Info,
    Error,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Info => "info",
            NotificationKind::Error => "error",
        }
    }
}

/// The host application: routing and full reloads.
pub trait AppShell: Send + Sync {
    /// Navigate to a route.
    fn navigate(&self, route: Route);

    /// Reload the whole application, discarding cached assets.
    fn reload(&self);
}

/// Transient user-facing notifications (toasts).
///
/// Notifications are a side effect only; coordinators never branch on
/// whether one was shown.
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotificationKind, message: &str);
}
