//! Session inactivity monitor.
//!
//! Signs the user out after a configured window without interaction.
//!
//! ```text
//! record(kind) ──► throttle (1s) ──► reset deadline ──┐
//!                                                     ▼
//!                              deadline elapsed ──► notify ─► sign_out ─► navigate(/auth)
//! ```
//!
//! The monitor runs as one tokio task per configuration. Reconfiguring
//! aborts that task and starts a fresh one, so an old deadline can never
//! fire after a new one was armed.

mod monitor;
mod types;

pub use monitor::{
    InactivityConfig, InactivityHandle, InactivityMonitor, ACTIVITY_THROTTLE,
    SIGNED_OUT_MESSAGE,
};
pub use types::{ActivityKind, UnknownActivity};
