//! Command-line argument parsing for the dosewatch CLI.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Run one manual version check
    CheckUpdate,
    /// Print the intake status of a scheduled time
    Overdue(String),
    /// Count down a lockout of the given length
    Lockout(u64),
    /// Run an interactive session (default)
    RunSession,
    /// Arguments that could not be understood
    Invalid(String),
}

/// Usage text printed for invalid arguments.
pub const USAGE: &str = "\
Usage: dosewatch [OPTION]

Options:
  -V, --version             Print the version and exit
      --check-update        Check the version endpoint once
      --overdue <TIME>      Evaluate a scheduled intake (RFC 3339 or YYYY-MM-DDTHH:MM)
      --lockout <SECONDS>   Count down a lockout
  (none)                    Run a session; each stdin line counts as a key press";

/// Parse command-line arguments and return the appropriate command.
///
/// # Examples
///
/// ```
/// use dosewatch::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["dosewatch".to_string(), "--lockout".to_string(), "30".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Lockout(30));
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--check-update" => return CliCommand::CheckUpdate,
            "--overdue" => {
                return match args.next() {
                    Some(time) => CliCommand::Overdue(time),
                    None => CliCommand::Invalid("--overdue requires a time".to_string()),
                };
            }
            "--lockout" => {
                return match args.next().map(|raw| raw.parse::<u64>()) {
                    Some(Ok(seconds)) => CliCommand::Lockout(seconds),
                    Some(Err(_)) => {
                        CliCommand::Invalid("--lockout expects a whole number of seconds".to_string())
                    }
                    None => CliCommand::Invalid("--lockout requires a number of seconds".to_string()),
                };
            }
            other if other.starts_with('-') => {
                return CliCommand::Invalid(format!("Unknown option '{}'", other));
            }
            _ => {}
        }
    }
    CliCommand::RunSession
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        let args: Vec<String> = std::iter::once("dosewatch")
            .chain(args.iter().copied())
            .map(String::from)
            .collect();
        parse_args(args.into_iter())
    }

    #[test]
    fn test_parse_version_flags() {
        assert_eq!(parse(&["--version"]), CliCommand::Version);
        assert_eq!(parse(&["-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_check_update() {
        assert_eq!(parse(&["--check-update"]), CliCommand::CheckUpdate);
    }

    #[test]
    fn test_parse_overdue() {
        assert_eq!(
            parse(&["--overdue", "2024-03-01T08:00"]),
            CliCommand::Overdue("2024-03-01T08:00".to_string())
        );
        assert!(matches!(parse(&["--overdue"]), CliCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_lockout() {
        assert_eq!(parse(&["--lockout", "30"]), CliCommand::Lockout(30));
        assert!(matches!(parse(&["--lockout", "-5"]), CliCommand::Invalid(_)));
        assert!(matches!(parse(&["--lockout", "soon"]), CliCommand::Invalid(_)));
        assert!(matches!(parse(&["--lockout"]), CliCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&[]), CliCommand::RunSession);
    }

    #[test]
    fn test_parse_unknown_flag() {
        assert_eq!(
            parse(&["--unknown"]),
            CliCommand::Invalid("Unknown option '--unknown'".to_string())
        );
    }

    #[test]
    fn test_first_command_wins() {
        assert_eq!(parse(&["--check-update", "--version"]), CliCommand::CheckUpdate);
    }
}
