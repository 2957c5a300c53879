//! Pull-to-refresh failsafe.
//!
//! Dragging down past a threshold from the top of the page reloads the app
//! outright. No version comparison is involved, so this still works when
//! the version endpoint or the stored marker is what is broken.

use super::reload::Reloader;
use crate::config::DEFAULT_PULL_THRESHOLD;

#[derive(Debug, Clone, Copy)]
struct Gesture {
    start_y: f32,
    last_y: f32,
    fired: bool,
}

/// Touch gesture tracker. Feed it raw touch coordinates.
#[derive(Debug)]
pub struct PullToRefresh {
    reloader: Reloader,
    threshold: f32,
    gesture: Option<Gesture>,
}

impl PullToRefresh {
    pub fn new(reloader: Reloader) -> Self {
        Self {
            reloader,
            threshold: DEFAULT_PULL_THRESHOLD,
            gesture: None,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// A finger touched down. Only gestures starting at the top of the
    /// scroll area are tracked.
    pub fn touch_start(&mut self, y: f32, scroll_top: f32) {
        self.gesture = (scroll_top <= 0.0).then_some(Gesture {
            start_y: y,
            last_y: y,
            fired: false,
        });
    }

    /// The finger moved. Returns `true` if this move forced the reload.
    pub fn touch_move(&mut self, y: f32) -> bool {
        let Some(gesture) = self.gesture.as_mut() else {
            return false;
        };
        gesture.last_y = y;

        if gesture.fired || y - gesture.start_y <= self.threshold {
            return false;
        }

        gesture.fired = true;
        tracing::info!("Pull gesture passed {}px, forcing reload", self.threshold);
        self.reloader.reload_now("pull to refresh");
        true
    }

    /// The finger lifted; the next gesture starts fresh.
    pub fn touch_end(&mut self) {
        self.gesture = None;
    }

    /// Current downward drag distance, 0 when no gesture is tracked.
    pub fn pull_distance(&self) -> f32 {
        self.gesture
            .map(|g| (g.last_y - g.start_y).max(0.0))
            .unwrap_or(0.0)
    }
}
