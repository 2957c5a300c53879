//! Lockout countdown command.

use chrono::Duration;
use color_eyre::Result;

use crate::config::SessionConfig;
use crate::lockout::LockoutTimer;
use crate::traits::ReferenceClock;

/// Longest countdown the command will run.
pub const MAX_LOCKOUT_SECS: u64 = 24 * 60 * 60;

/// Call `on_tick` with every published value until the countdown ends.
pub async fn follow_countdown(timer: &LockoutTimer, mut on_tick: impl FnMut(u64)) {
    let mut rx = timer.subscribe();
    let mut last = *rx.borrow_and_update();
    on_tick(last);

    while last > 0 {
        if rx.changed().await.is_err() {
            break;
        }
        let value = *rx.borrow_and_update();
        if value != last {
            on_tick(value);
            last = value;
        }
    }
}

/// Handle the --lockout command.
pub async fn handle_lockout_command(config: &SessionConfig, seconds: u64) -> Result<()> {
    let clock = config.reference_clock();
    let seconds = seconds.min(MAX_LOCKOUT_SECS);
    // Bounded above, so the cast cannot wrap
    let lock_end = clock.now_utc() + Duration::seconds(seconds as i64);

    let timer = LockoutTimer::start(clock, seconds > 0, Some(lock_end));
    follow_countdown(&timer, |remaining| {
        if remaining > 0 {
            println!("Locked: try again in {}s", remaining);
        } else {
            println!("Unlocked");
        }
    })
    .await;
    Ok(())
}
