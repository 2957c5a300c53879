//! Interactive session command.
//!
//! Runs every coordinator against the real collaborators. Each stdin line
//! counts as a key press; a few lines are also commands:
//!
//! - `check`: manual version check
//! - `pull`: perform a pull-to-refresh gesture
//! - `pick`: open or close a simulated file picker

use color_eyre::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::adapters::{
    ChannelShell, FileKeyValueStore, HttpAuthGateway, ReqwestHttpClient,
    ShellEvent,
};
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::inactivity::ActivityKind;
use crate::session::{FilePickerLease, SessionCollaborators, SessionCoordinators};
use crate::traits::{HttpClient, KeyValueStore, Route};
use crate::update::CheckTrigger;

/// Wire the production adapters. Shell requests and notifications arrive
/// on the returned receiver.
pub fn production_collaborators(
    config: &SessionConfig,
) -> Result<(SessionCollaborators, mpsc::UnboundedReceiver<ShellEvent>), SessionError> {
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::with_timeout(config.fetch_timeout)?);

    let store = match &config.storage_path {
        Some(path) => FileKeyValueStore::at_path(path),
        None => FileKeyValueStore::new().ok_or_else(|| {
            SessionError::configuration("Could not determine home directory for storage")
        })?,
    };
    tracing::debug!("Using storage at {}", store.path().display());
    let store: Arc<dyn KeyValueStore> = Arc::new(store);

    let auth = Arc::new(HttpAuthGateway::new(
        Arc::clone(&http),
        Arc::clone(&store),
        config.auth_url.clone(),
    ));
    let (shell, events) = ChannelShell::channel();
    let shell = Arc::new(shell);

    let collaborators = SessionCollaborators {
        http,
        store,
        auth,
        shell: shell.clone(),
        notifier: shell,
        clock: config.reference_clock(),
    };
    Ok((collaborators, events))
}

/// Print a shell request the way a terminal host would show it.
pub fn print_shell_event(event: &ShellEvent) {
    match event {
        ShellEvent::Navigate(route) => println!("navigate: {}", route),
        ShellEvent::Reload => println!("reload requested"),
        ShellEvent::Notify { kind, message } => println!("[{}] {}", kind.as_str(), message),
    }
}

/// Handle the default command: run until sign-out, end of input plus
/// sign-out, or Ctrl+C.
pub async fn run_session(config: &SessionConfig) -> Result<()> {
    let (collaborators, mut events) = production_collaborators(config)?;
    let mut session = SessionCoordinators::start(config, collaborators);
    let mut picker: Option<FilePickerLease> = None;

    println!(
        "Session started. Signing out after {} minute(s) without input. Ctrl+C to quit.",
        config.inactivity_minutes
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => handle_line(&mut session, &mut picker, line.trim()).await,
                Ok(None) => {
                    tracing::debug!("stdin closed, waiting for sign-out or Ctrl+C");
                    stdin_open = false;
                }
                Err(e) => {
                    tracing::warn!("Failed to read stdin: {}", e);
                    stdin_open = false;
                }
            },
            event = events.recv() => match event {
                Some(event) => {
                    print_shell_event(&event);
                    if event == ShellEvent::Navigate(Route::Auth) {
                        break;
                    }
                }
                None => break,
            },
            _ = &mut ctrl_c => {
                println!("Interrupted");
                break;
            }
        }
    }

    drop(picker);
    session.shutdown();
    Ok(())
}

async fn handle_line(
    session: &mut SessionCoordinators,
    picker: &mut Option<FilePickerLease>,
    line: &str,
) {
    session.record_activity(ActivityKind::KeyPress);

    match line {
        "check" => {
            // Outcome is reported through the notifier
            let _ = session.update().check_for_updates(CheckTrigger::Manual).await;
        }
        "pull" => {
            let pull = session.pull_to_refresh();
            let distance = pull.threshold() + 1.0;
            pull.touch_start(0.0, 0.0);
            pull.touch_move(distance);
            pull.touch_end();
        }
        "pick" => {
            if picker.take().is_some() {
                println!("file picker closed");
            } else {
                *picker = Some(session.flags().acquire_file_picker());
                println!("file picker open");
            }
        }
        _ => {}
    }
}
