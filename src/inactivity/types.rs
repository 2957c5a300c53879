//! Interaction kinds that count as user activity.

use std::fmt;
use std::str::FromStr;

/// A qualifying user interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    PointerPress,
    PointerMove,
    KeyPress,
    Scroll,
    TouchStart,
    Click,
}

impl ActivityKind {
    /// Every kind the monitor listens for.
    pub const ALL: [ActivityKind; 6] = [
        ActivityKind::PointerPress,
        ActivityKind::PointerMove,
        ActivityKind::KeyPress,
        ActivityKind::Scroll,
        ActivityKind::TouchStart,
        ActivityKind::Click,
    ];

    /// The DOM event name hosts subscribe to for this kind.
    pub fn event_name(&self) -> &'static str {
        match self {
            ActivityKind::PointerPress => "mousedown",
            ActivityKind::PointerMove => "mousemove",
            ActivityKind::KeyPress => "keypress",
            ActivityKind::Scroll => "scroll",
            ActivityKind::TouchStart => "touchstart",
            ActivityKind::Click => "click",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}

/// Error for event names that are not activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownActivity(pub String);

impl fmt::Display for UnknownActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not an activity event: {}", self.0)
    }
}

impl std::error::Error for UnknownActivity {}

impl FromStr for ActivityKind {
    type Err = UnknownActivity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityKind::ALL
            .into_iter()
            .find(|kind| kind.event_name() == s)
            .ok_or_else(|| UnknownActivity(s.to_string()))
    }
}
