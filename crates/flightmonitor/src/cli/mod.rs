//! Command-line interface for flightmonitor.
//!
//! This module provides the CLI structure for the `flimon` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, ListCommand, OutputFormat, ShowCommand, StatusCommand, SubmitCommand,
};

/// flimon - Record and display flight instrument readings
///
/// Submits altitude, heading (HIS) and attitude (ADI) readings, keeps them
/// in an append-only history, and shows them as text, a table, or an
/// instrument panel.
#[derive(Debug, Parser)]
#[command(name = "flimon")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate and record a reading
    Submit(SubmitCommand),

    /// List every recorded reading
    List(ListCommand),

    /// Show the latest (or a given) reading
    Show(ShowCommand),

    /// Show storage status
    Status(StatusCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Verbosity;
    use crate::render::View;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "flimon");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(parse(&["flimon", "-q", "status"]).verbosity(), Verbosity::Quiet);
        assert_eq!(parse(&["flimon", "status"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["flimon", "-v", "status"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["flimon", "-vv", "status"]).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_submit_flags() {
        let cli = parse(&[
            "flimon", "submit", "--altitude", "1500", "--his", "90", "--adi", "-20",
        ]);
        let Command::Submit(cmd) = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(cmd.altitude.as_deref(), Some("1500"));
        assert_eq!(cmd.heading.as_deref(), Some("90"));
        assert_eq!(cmd.attitude.as_deref(), Some("-20"));
    }

    #[test]
    fn test_parse_submit_keeps_unparsable_text() {
        let cli = parse(&[
            "flimon", "submit", "-a", "high", "--heading", "1", "--attitude", "0",
        ]);
        let Command::Submit(cmd) = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(cmd.altitude.as_deref(), Some("high"));
    }

    #[test]
    fn test_parse_submit_body() {
        let cli = parse(&["flimon", "submit", "--body", r#"{"altitude":1}"#]);
        assert!(matches!(cli.command, Command::Submit(SubmitCommand { body: Some(_), .. })));
    }

    #[test]
    fn test_submit_requires_input() {
        assert!(Cli::try_parse_from(["flimon", "submit"]).is_err());
        assert!(Cli::try_parse_from(["flimon", "submit", "--altitude", "1"]).is_err());
        assert!(Cli::try_parse_from([
            "flimon", "submit", "--body", "{}", "--altitude", "1", "--heading", "1",
            "--attitude", "1",
        ])
        .is_err());
    }

    #[test]
    fn test_parse_list() {
        let cli = parse(&["flimon", "list", "--format", "json", "--oldest-first"]);
        let Command::List(cmd) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(cmd.format, OutputFormat::Json);
        assert!(cmd.oldest_first);
    }

    #[test]
    fn test_parse_show_view() {
        let cli = parse(&["flimon", "show", "--view", "visual", "-p", "3"]);
        let Command::Show(cmd) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(cmd.view, Some(View::Visual));
        assert_eq!(cmd.position, Some(3));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["flimon", "-c", "/custom/config.toml", "status"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_config_validate() {
        let cli = parse(&["flimon", "config", "validate", "--file", "x.toml"]);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }
}
