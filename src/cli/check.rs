//! Manual version check command.

use color_eyre::Result;

use super::session::{print_shell_event, production_collaborators};
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::update::{CheckTrigger, UpdateCoordinator, UpdateOutcome};

/// Describe a check outcome in one line.
pub fn describe_outcome(outcome: &UpdateOutcome) -> String {
    match outcome {
        UpdateOutcome::Initialized { version } => {
            format!("No version recorded yet; stored {}", version.marker())
        }
        UpdateOutcome::UpdateApplied { previous, version } => {
            format!(
                "Update available: {} -> {} ({})",
                previous,
                version.marker(),
                version.label()
            )
        }
        UpdateOutcome::UpToDate { version } => {
            format!("Already up to date ({})", version.label())
        }
    }
}

/// Handle the --check-update command.
///
/// The stored version is reconciled exactly as in a session; there is no
/// application to reload, so the reload is reported instead.
pub async fn handle_check_update_command(config: &SessionConfig) -> Result<()> {
    let (collaborators, mut events) = production_collaborators(config)?;
    let coordinator = UpdateCoordinator::new(
        collaborators.http,
        collaborators.store,
        collaborators.shell,
        collaborators.notifier,
        config,
    );

    println!("Checking {} ...", config.version_url);
    let result = coordinator.check_for_updates(CheckTrigger::Manual).await;
    coordinator.cancel_pending_reload();

    while let Ok(event) = events.try_recv() {
        print_shell_event(&event);
    }

    match result {
        Ok(outcome) => {
            println!("{}", describe_outcome(&outcome));
            if outcome.reload_scheduled() {
                println!("A running session would reload now.");
            }
            Ok(())
        }
        Err(e) => Err(SessionError::from(e).into()),
    }
}
