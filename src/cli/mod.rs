//! CLI module for dosewatch.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version display
//! - One-off version checks, intake status and lockout countdowns
//! - The interactive session
//!
//! # Usage
//!
//! ```ignore
//! use dosewatch::cli::{parse_args, run_cli_command};
//! use dosewatch::config::SessionConfig;
//!
//! let command = parse_args(std::env::args());
//! runtime.block_on(run_cli_command(command, &SessionConfig::from_env()))?;
//! ```

pub mod args;
pub mod check;
pub mod lockout;
pub mod overdue;
pub mod session;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use check::handle_check_update_command;
pub use lockout::handle_lockout_command;
pub use overdue::handle_overdue_command;
pub use session::run_session;
pub use version::{handle_version_command, VERSION};

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::config::SessionConfig;

/// Run a parsed command to completion.
pub async fn run_cli_command(command: CliCommand, config: &SessionConfig) -> Result<()> {
    match command {
        CliCommand::Version => {
            handle_version_command();
            Ok(())
        }
        CliCommand::CheckUpdate => handle_check_update_command(config).await,
        CliCommand::Overdue(raw) => handle_overdue_command(config, &raw),
        CliCommand::Lockout(seconds) => handle_lockout_command(config, seconds).await,
        CliCommand::RunSession => run_session(config).await,
        CliCommand::Invalid(message) => {
            eprintln!("{}", USAGE);
            Err(eyre!(message))
        }
    }
}
