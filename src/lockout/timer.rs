//! Once-per-second lockout countdown.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::session::Subscription;
use crate::traits::ReferenceClock;

/// Length of a lockout, for display.
pub const LOCKOUT_DURATION: Duration = Duration::from_secs(30);

/// Countdown refresh rate.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Whole seconds left until `lock_end`, rounded up and never negative.
pub fn remaining_seconds(lock_end: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let millis = lock_end.signed_duration_since(now).num_milliseconds();
    if millis <= 0 {
        0
    } else {
        // Positive i64 always fits in u64
        (millis as u64).div_ceil(1000)
    }
}

/// Publishes the seconds left in a lockout until it reaches zero.
pub struct LockoutTimer {
    lock_end: Option<DateTime<Utc>>,
    remaining: watch::Receiver<u64>,
    ticker: Option<Subscription>,
}

impl LockoutTimer {
    /// Begin counting down. A missing end time or `is_locked_out = false`
    /// yields a timer fixed at 0 with no background task.
    pub fn start(
        clock: Arc<dyn ReferenceClock>,
        is_locked_out: bool,
        lock_end: Option<DateTime<Utc>>,
    ) -> Self {
        let lock_end = lock_end.filter(|_| is_locked_out);

        let initial = lock_end.map_or(0, |end| remaining_seconds(end, clock.now_utc()));
        let (tx, rx) = watch::channel(initial);

        let ticker = match lock_end {
            Some(end) if initial > 0 => {
                tracing::debug!("Lockout active, {}s remaining", initial);
                let task = tokio::spawn(tick(clock, end, tx));
                Some(Subscription::new("lockout timer", task))
            }
            _ => None,
        };

        Self {
            lock_end,
            remaining: rx,
            ticker,
        }
    }

    /// A timer that is not locked out.
    pub fn idle() -> Self {
        let (_, rx) = watch::channel(0);
        Self {
            lock_end: None,
            remaining: rx,
            ticker: None,
        }
    }

    pub fn lock_end(&self) -> Option<DateTime<Utc>> {
        self.lock_end
    }

    /// Seconds left as of the last tick.
    pub fn remaining_seconds(&self) -> u64 {
        *self.remaining.borrow()
    }

    /// Receiver that sees every published value.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.remaining.clone()
    }

    /// Fraction of [`LOCKOUT_DURATION`] still remaining, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        let total = LOCKOUT_DURATION.as_secs() as f32;
        (self.remaining_seconds() as f32 / total).clamp(0.0, 1.0)
    }

    pub fn is_locked(&self) -> bool {
        self.remaining_seconds() > 0
    }

    /// Whether the countdown task is still running.
    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(Subscription::is_active)
    }

    /// Stop ticking; the last published value is kept.
    pub fn stop(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }
}

impl Drop for LockoutTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for LockoutTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockoutTimer")
            .field("lock_end", &self.lock_end)
            .field("remaining", &self.remaining_seconds())
            .field("ticking", &self.is_ticking())
            .finish()
    }
}

async fn tick(clock: Arc<dyn ReferenceClock>, lock_end: DateTime<Utc>, tx: watch::Sender<u64>) {
    let mut interval = tokio::time::interval(TICK_INTERVAL);

    loop {
        interval.tick().await;

        let remaining = remaining_seconds(lock_end, clock.now_utc());
        tx.send_replace(remaining);
        tracing::trace!("Lockout: {}s remaining", remaining);

        if remaining == 0 {
            tracing::debug!("Lockout ended");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::InstantClock;
    use chrono::{Duration as ChronoDuration, FixedOffset};
    use tokio::time::sleep;

    fn base_fixed() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-03-01T08:00:00Z").unwrap()
    }

    fn base() -> DateTime<Utc> {
        base_fixed().with_timezone(&Utc)
    }

    fn clock() -> Arc<InstantClock> {
        Arc::new(InstantClock::new(base_fixed()))
    }

    #[test]
    fn test_remaining_seconds_rounds_up() {
        let now = base();
        assert_eq!(remaining_seconds(now + ChronoDuration::milliseconds(30_000), now), 30);
        assert_eq!(remaining_seconds(now + ChronoDuration::milliseconds(29_001), now), 30);
        assert_eq!(remaining_seconds(now + ChronoDuration::milliseconds(1), now), 1);
        assert_eq!(remaining_seconds(now, now), 0);
        assert_eq!(remaining_seconds(now - ChronoDuration::seconds(5), now), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_counts_down_to_zero_and_stops() {
        let clock = clock();
        let end = base() + ChronoDuration::seconds(30);
        let timer = LockoutTimer::start(clock, true, Some(end));

        assert_eq!(timer.remaining_seconds(), 30);
        assert_eq!(timer.progress(), 1.0);
        assert!(timer.is_ticking());

        // Sample half-way between ticks
        sleep(Duration::from_millis(500)).await;
        let mut previous = timer.remaining_seconds();
        for second in 1..=30u64 {
            sleep(Duration::from_millis(1000)).await;
            let now = timer.remaining_seconds();
            assert!(now <= previous);
            assert_eq!(now, 30 - second);
            previous = now;
        }

        assert!(!timer.is_locked());
        sleep(Duration::from_secs(10)).await;
        assert_eq!(timer.remaining_seconds(), 0);
        assert!(!timer.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscriber_sees_updates() {
        let clock = clock();
        let timer = LockoutTimer::start(clock, true, Some(base() + ChronoDuration::seconds(3)));
        let mut rx = timer.subscribe();

        let mut seen = vec![*rx.borrow_and_update()];
        while rx.changed().await.is_ok() {
            seen.push(*rx.borrow_and_update());
            if seen.last() == Some(&0) {
                break;
            }
        }
        assert_eq!(seen.first(), Some(&3));
        assert_eq!(seen.last(), Some(&0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_locked_out_is_zero_without_timer() {
        let clock = clock();

        let unlocked = LockoutTimer::start(clock.clone(), false, Some(base() + ChronoDuration::seconds(30)));
        assert_eq!(unlocked.remaining_seconds(), 0);
        assert!(!unlocked.is_ticking());
        assert!(unlocked.lock_end().is_none());

        let no_end = LockoutTimer::start(clock, true, None);
        assert_eq!(no_end.remaining_seconds(), 0);
        assert!(!no_end.is_ticking());

        assert_eq!(LockoutTimer::idle().progress(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_lock_end_is_zero() {
        let clock = clock();
        let timer = LockoutTimer::start(clock, true, Some(base() - ChronoDuration::seconds(1)));
        assert_eq!(timer.remaining_seconds(), 0);
        assert!(!timer.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_freezes_value() {
        let clock = clock();
        let mut timer = LockoutTimer::start(clock, true, Some(base() + ChronoDuration::seconds(30)));

        sleep(Duration::from_millis(2500)).await;
        timer.stop();
        let frozen = timer.remaining_seconds();
        assert_eq!(frozen, 28);

        sleep(Duration::from_secs(5)).await;
        assert_eq!(timer.remaining_seconds(), frozen);
        assert!(!timer.is_ticking());
    }
}
