//! Session configuration.
//!
//! Defaults, builder overrides, and environment overrides for every
//! coordinator.

use chrono::FixedOffset;
use chrono_tz::Tz;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::adapters::system_clock::{parse_offset, parse_zone, utc_offset};
use crate::adapters::{FixedOffsetClock, ZonedClock};
use crate::traits::ReferenceClock;

/// Default inactivity window before automatic sign-out.
pub const DEFAULT_INACTIVITY_MINUTES: u32 = 15;

/// Default version descriptor endpoint.
pub const DEFAULT_VERSION_URL: &str = "http://localhost:5173/version.json";

/// Default auth service base URL.
pub const DEFAULT_AUTH_URL: &str = "http://localhost:54321/auth/v1";

/// Default interval between background version checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Default bound on a version fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Default delay between announcing an update and reloading.
pub const DEFAULT_RELOAD_DELAY: Duration = Duration::from_millis(1500);

/// Default pull distance, in pixels, for the force-reload gesture.
pub const DEFAULT_PULL_THRESHOLD: f32 = 80.0;

/// Configuration for the session coordinators.
///
/// # Example
///
/// ```ignore
/// use dosewatch::config::SessionConfig;
///
/// let config = SessionConfig::default()
///     .with_inactivity_minutes(5)
///     .with_poll_interval(None);
/// ```
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Minutes of inactivity before sign-out; 0 disables the monitor
    pub inactivity_minutes: u32,
    /// Master switch for the inactivity monitor
    pub inactivity_enabled: bool,
    /// Version descriptor endpoint
    pub version_url: String,
    /// Auth service base URL (sign-out posts to `<auth_url>/logout`)
    pub auth_url: String,
    /// Background version check interval; `None` disables polling
    pub poll_interval: Option<Duration>,
    /// Upper bound on one version fetch
    pub fetch_timeout: Duration,
    /// Delay between the update notification and the reload
    pub reload_delay: Duration,
    /// Pull distance that forces a reload
    pub pull_threshold: f32,
    /// Reference offset, used when no named zone is set
    pub reference_offset: FixedOffset,
    /// Named reference timezone; takes precedence over `reference_offset`
    pub reference_zone: Option<Tz>,
    /// Key-value storage file; `None` uses `~/.dosewatch/storage.json`
    pub storage_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            inactivity_minutes: DEFAULT_INACTIVITY_MINUTES,
            inactivity_enabled: true,
            version_url: DEFAULT_VERSION_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            poll_interval: Some(DEFAULT_POLL_INTERVAL),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            reload_delay: DEFAULT_RELOAD_DELAY,
            pull_threshold: DEFAULT_PULL_THRESHOLD,
            reference_offset: utc_offset(),
            reference_zone: None,
            storage_path: None,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inactivity_minutes(mut self, minutes: u32) -> Self {
        self.inactivity_minutes = minutes;
        self
    }

    pub fn with_inactivity_enabled(mut self, enabled: bool) -> Self {
        self.inactivity_enabled = enabled;
        self
    }

    pub fn with_version_url(mut self, url: impl Into<String>) -> Self {
        self.version_url = url.into();
        self
    }

    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Option<Duration>) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_reload_delay(mut self, delay: Duration) -> Self {
        self.reload_delay = delay;
        self
    }

    pub fn with_pull_threshold(mut self, threshold: f32) -> Self {
        self.pull_threshold = threshold;
        self
    }

    pub fn with_reference_offset(mut self, offset: FixedOffset) -> Self {
        self.reference_offset = offset;
        self
    }

    pub fn with_reference_zone(mut self, zone: Tz) -> Self {
        self.reference_zone = Some(zone);
        self
    }

    /// The clock every reference-time computation reads.
    pub fn reference_clock(&self) -> Arc<dyn ReferenceClock> {
        match self.reference_zone {
            Some(zone) => Arc::new(ZonedClock::new(zone)),
            None => Arc::new(FixedOffsetClock::new(self.reference_offset)),
        }
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    /// Defaults overridden by `DOSEWATCH_*` environment variables.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(minutes) = env_parse::<u32>("DOSEWATCH_INACTIVITY_MINUTES") {
            config.inactivity_minutes = minutes;
        }
        if let Some(enabled) = env_bool("DOSEWATCH_INACTIVITY_ENABLED") {
            config.inactivity_enabled = enabled;
        }
        if let Ok(url) = std::env::var("DOSEWATCH_VERSION_URL") {
            config.version_url = url;
        }
        if let Ok(url) = std::env::var("DOSEWATCH_AUTH_URL") {
            config.auth_url = url;
        }
        if let Some(secs) = env_parse::<u64>("DOSEWATCH_POLL_SECS") {
            config.poll_interval = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(secs) = env_parse::<u64>("DOSEWATCH_FETCH_TIMEOUT_SECS") {
            if secs > 0 {
                config.fetch_timeout = Duration::from_secs(secs);
            }
        }
        if let Ok(raw) = std::env::var("DOSEWATCH_TZ_OFFSET") {
            match parse_offset(&raw) {
                Some(offset) => config.reference_offset = offset,
                None => tracing::warn!("Ignoring invalid DOSEWATCH_TZ_OFFSET={:?}", raw),
            }
        }
        if let Ok(raw) = std::env::var("DOSEWATCH_TZ") {
            match parse_zone(&raw) {
                Some(zone) => config.reference_zone = Some(zone),
                None => tracing::warn!("Ignoring invalid DOSEWATCH_TZ={:?}", raw),
            }
        }
        if let Ok(path) = std::env::var("DOSEWATCH_STORAGE_PATH") {
            config.storage_path = Some(PathBuf::from(path));
        }

        config
    }
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}={:?}", name, raw);
            None
        }
    }
}

fn env_bool(name: &str) -> Option<bool> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            tracing::warn!("Ignoring invalid {}={:?}", name, raw);
            None
        }
    }
}
