//! Session-scoped state and lifecycle.
//!
//! - [`SessionFlags`] / [`FilePickerLease`]: flags owned by the session
//!   root and released on drop
//! - [`Subscription`] / [`Teardown`]: ownership of spawned tasks
//! - [`SessionCoordinators`]: every coordinator wired from one
//!   [`SessionConfig`](crate::config::SessionConfig), stopped with one call

mod coordinators;
mod flags;
mod teardown;

pub use coordinators::{SessionCollaborators, SessionCoordinators};
pub use flags::{FilePickerLease, SessionFlags};
pub use teardown::{Subscription, Teardown};
