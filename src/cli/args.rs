use std::ffi::OsString;

use clap::{Parser, Subcommand, ValueEnum};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::PomtrackError;

#[derive(Parser, Debug)]
#[command(name = "pomtrack")]
#[command(about = "A pomodoro session tracker for the terminal and status bar")]
#[command(long_about = "pomtrack - A pomodoro session tracker

Tracks 25-minute work sessions and the breaks between them. State lives in
~/.pomtrack/state.yaml so every command is a short-lived process, which makes
pomtrack easy to drive from a tmux status line or a hotkey.

QUICK START:
  pomtrack init             Create the session record
  pomtrack start            Start a session
  pomtrack start_minus_5    Start a session that began 5 minutes ago
  pomtrack progress         Show minutes left (for status bars)
  pomtrack log              Write the session log and reset the count

For more information on a specific command, run:
  pomtrack <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Create the session record
    ///
    /// Writes a fresh record (nothing running, count 0) unless one exists.
    Init {
        /// Overwrite an existing record
        #[arg(long)]
        force: bool,
    },

    /// Start a session
    ///
    /// Does nothing if a session is already running. Reports how long the
    /// break was.
    ///
    /// Examples:
    ///   pomtrack start
    ///   pomtrack start --slip 5
    ///   pomtrack start_minus_5
    Start {
        /// Minutes to backdate the start by
        #[arg(long, short = 's', default_value_t = 0)]
        slip: u32,
    },

    /// Print minutes left, completing the session once time is up
    ///
    /// Prints nothing when no session is running.
    Poll,

    /// Complete the running session and count it
    #[command(visible_alias = "done!", alias = "complete")]
    Done,

    /// Abort the running session without counting it
    #[command(visible_aliases = ["stop", "quit"])]
    Abort,

    /// Reset the completed-session count
    Reset,

    /// Show the status-bar string
    #[command(visible_alias = "report")]
    Progress,

    /// Write the session log (summary, commits, journal) and reset
    Log {
        /// Print the last written log instead of writing a new one
        #[arg(long)]
        show: bool,
    },

    /// Print the completed-session count
    Count,

    /// Send the status-bar string as a notification
    #[command(visible_alias = "growl")]
    Announce,

    /// Show the session state in detail
    Status,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,

        /// Show installation instructions instead
        #[arg(long)]
        install: bool,
    },
}

static SLIP_COMMAND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:start_)?minus_(.*)$")
        .unwrap_or_else(|e| panic!("Invalid slip command regex: {e}"))
});

/// Parse a backdated-start command name such as `start_minus_5`.
///
/// Returns `Ok(None)` for names outside the `start_minus_N` / `minus_N`
/// family.
///
/// # Errors
///
/// Returns `PomtrackError::UnknownCommand` if the name is in the family but
/// the suffix is not a non-negative integer.
pub fn parse_slip_command(name: &str) -> Result<Option<u32>, PomtrackError> {
    let Some(caps) = SLIP_COMMAND.captures(name) else {
        return Ok(None);
    };

    caps[1]
        .parse::<u32>()
        .map(Some)
        .map_err(|_| PomtrackError::UnknownCommand(name.to_string()))
}

/// Rewrite a `start_minus_N` subcommand into `start --slip N`.
///
/// Global flags before the subcommand are left in place.
///
/// # Errors
///
/// See [`parse_slip_command`].
pub fn expand_slip_alias<I>(args: I) -> Result<Vec<OsString>, PomtrackError>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().collect();

    let mut index = 1;
    while index < args.len() {
        let Some(arg) = args[index].to_str() else {
            break;
        };
        match arg {
            "-o" | "--output" => index += 2,
            flag if flag.starts_with('-') => index += 1,
            name => {
                if let Some(slip) = parse_slip_command(name)? {
                    args.splice(
                        index..=index,
                        ["start".into(), "--slip".into(), slip.to_string().into()],
                    );
                }
                break;
            }
        }
    }

    Ok(args)
}
