//! Mock auth gateway for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::traits::{AuthError, AuthGateway};

/// Counts sign-out calls and optionally fails or slows them.
#[derive(Debug, Clone, Default)]
pub struct MockAuth {
    sign_outs: Arc<AtomicUsize>,
    should_fail: Arc<AtomicBool>,
    delay: Option<Duration>,
}

impl MockAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway whose every sign-out fails as unreachable.
    pub fn failing() -> Self {
        let auth = Self::new();
        auth.set_should_fail(true);
        auth
    }

    /// Make every sign-out take `delay` (on tokio time) before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Number of sign-out attempts, successful or not.
    pub fn sign_out_count(&self) -> usize {
        self.sign_outs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthGateway for MockAuth {
    async fn sign_out(&self) -> Result<(), AuthError> {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.should_fail.load(Ordering::SeqCst) {
            Err(AuthError::Unreachable("mock sign-out failure".to_string()))
        } else {
            Ok(())
        }
    }
}
