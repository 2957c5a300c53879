//! Cancellation handles for spawned coordinator tasks.
//!
//! Each `start`/`spawn` operation hands back a [`Subscription`]; the
//! session root collects them in a [`Teardown`] and releases everything
//! with one call.

use tokio::task::JoinHandle;

/// Owns a background task and aborts it when stopped or dropped.
#[derive(Debug)]
#[must_use = "dropping a Subscription immediately cancels its task"]
pub struct Subscription {
    name: &'static str,
    handle: Option<JoinHandle<()>>,
}

impl Subscription {
    pub fn new(name: &'static str, handle: JoinHandle<()>) -> Self {
        Self {
            name,
            handle: Some(handle),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the task is still running.
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Abort the task. Calling this more than once is harmless.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                tracing::debug!("Cancelling {}", self.name);
            }
            handle.abort();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

type Disposer = Box<dyn FnOnce() + Send>;

/// Ordered collection of disposers released together.
///
/// Disposers run in reverse registration order, so later resources that
/// may depend on earlier ones go first.
#[derive(Default)]
pub struct Teardown {
    disposers: Vec<(&'static str, Disposer)>,
}

impl Teardown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscription.
    pub fn add_subscription(&mut self, mut subscription: Subscription) {
        let name = subscription.name();
        self.disposers
            .push((name, Box::new(move || subscription.cancel())));
    }

    /// Register an arbitrary disposer.
    pub fn add(&mut self, name: &'static str, disposer: impl FnOnce() + Send + 'static) {
        self.disposers.push((name, Box::new(disposer)));
    }

    pub fn len(&self) -> usize {
        self.disposers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disposers.is_empty()
    }

    /// Run every disposer. The teardown is empty afterwards.
    pub fn run(&mut self) {
        while let Some((name, disposer)) = self.disposers.pop() {
            tracing::trace!("Tearing down {}", name);
            disposer();
        }
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.run();
    }
}

impl std::fmt::Debug for Teardown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Teardown")
            .field(
                "disposers",
                &self.disposers.iter().map(|(n, _)| *n).collect::<Vec<_>>(),
            )
            .finish()
    }
}
