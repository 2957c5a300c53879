//! dosewatch - session lifecycle coordinators for a medication tracker
//!
//! Four independent, timer-driven coordinators and the seams they attach
//! to:
//!
//! - [`inactivity`]: sign out after a period without interaction
//! - [`update`]: keep the running build in step with the deployed one
//! - [`intake`]: decide whether a scheduled intake is overdue
//! - [`lockout`]: count down a temporary lockout
//!
//! Collaborators (HTTP, storage, auth, shell, notifications, clock) are
//! traits in [`traits`] with production implementations in [`adapters`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod inactivity;
pub mod intake;
pub mod lockout;
pub mod session;
pub mod traits;
pub mod update;
