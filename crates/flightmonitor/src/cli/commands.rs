//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Subcommand, ValueEnum};

use crate::reading::Candidate;
use crate::render::View;

/// Submit command arguments.
///
/// Values are taken as text and coerced by the validator, so a typo is
/// reported as "not a number" rather than rejected by the argument parser.
#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["altitude", "body"])
))]
pub struct SubmitCommand {
    /// Altitude (0 to 3000)
    #[arg(short, long, requires_all = ["heading", "attitude"], allow_hyphen_values = true)]
    pub altitude: Option<String>,

    /// Heading indicator, HIS (0 to 360 degrees)
    #[arg(long = "heading", visible_alias = "his", allow_hyphen_values = true)]
    pub heading: Option<String>,

    /// Attitude director indicator, ADI (-100 to 100)
    #[arg(long = "attitude", visible_alias = "adi", allow_hyphen_values = true)]
    pub attitude: Option<String>,

    /// Raw JSON body, e.g. '{"altitude": 1500, "his": 90, "adi": 0}'
    #[arg(long, conflicts_with_all = ["altitude", "heading", "attitude"])]
    pub body: Option<String>,

    /// Output the stored reading as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl SubmitCommand {
    /// Build the candidate from the flag values.
    ///
    /// Returns `None` when `--body` was given instead.
    #[must_use]
    pub fn flag_candidate(&self) -> Option<Candidate> {
        self.altitude.as_ref().map(|altitude| Candidate {
            altitude: altitude.clone().into(),
            heading: self.heading.clone().map(Into::into).unwrap_or_default(),
            attitude: self.attitude.clone().map(Into::into).unwrap_or_default(),
        })
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Show newest readings first (defaults to the display setting)
    #[arg(long, conflicts_with = "oldest_first")]
    pub newest_first: bool,

    /// Show oldest readings first
    #[arg(long)]
    pub oldest_first: bool,
}

impl ListCommand {
    /// Resolve ordering against the configured default.
    #[must_use]
    pub fn newest_first_or(&self, default: bool) -> bool {
        if self.newest_first {
            true
        } else if self.oldest_first {
            false
        } else {
            default
        }
    }
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// View to render (defaults to the display setting)
    #[arg(long, value_enum)]
    pub view: Option<View>,

    /// Sequence position to show instead of the latest reading
    #[arg(short, long)]
    pub position: Option<i64>,

    /// Output the reading and its projected display parameters as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::RawValue;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_flag_candidate() {
        let cmd = SubmitCommand {
            altitude: Some("1500".to_string()),
            heading: Some("90".to_string()),
            attitude: Some("-5".to_string()),
            body: None,
            json: false,
        };
        let candidate = cmd.flag_candidate().unwrap();
        assert_eq!(candidate.altitude, RawValue::from("1500"));
        assert_eq!(candidate.heading, RawValue::from("90"));
        assert_eq!(candidate.attitude, RawValue::from("-5"));
    }

    #[test]
    fn test_flag_candidate_absent_with_body() {
        let cmd = SubmitCommand {
            altitude: None,
            heading: None,
            attitude: None,
            body: Some("{}".to_string()),
            json: false,
        };
        assert!(cmd.flag_candidate().is_none());
    }

    #[test]
    fn test_list_ordering() {
        let mut cmd = ListCommand {
            format: OutputFormat::Table,
            newest_first: false,
            oldest_first: false,
        };
        assert!(cmd.newest_first_or(true));
        assert!(!cmd.newest_first_or(false));

        cmd.oldest_first = true;
        assert!(!cmd.newest_first_or(true));

        cmd.oldest_first = false;
        cmd.newest_first = true;
        assert!(cmd.newest_first_or(false));
    }

    #[test]
    fn test_show_command_debug() {
        let cmd = ShowCommand {
            view: Some(View::Visual),
            position: None,
            json: false,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Visual"));
    }
}
