//! Output formatting for pomtrack.
//!
//! This module renders command results as colored text or JSON.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::PomtrackError;
use crate::features::focus::SessionStatus;

pub use json::*;
pub use pretty::*;

/// Format a status snapshot based on output format
///
/// # Errors
///
/// Returns `PomtrackError::Parse` if JSON serialization fails.
pub fn format_status(status: &SessionStatus, format: OutputFormat) -> Result<String, PomtrackError> {
    match format {
        OutputFormat::Pretty => Ok(format_status_pretty(status)),
        OutputFormat::Json => format_status_json(status),
    }
}

/// Format a one-line command message based on output format.
///
/// Empty messages stay empty in pretty mode so scripted callers see no output.
///
/// # Errors
///
/// Returns `PomtrackError::Parse` if JSON serialization fails.
pub fn format_message(
    command: &str,
    message: Option<&str>,
    format: OutputFormat,
) -> Result<String, PomtrackError> {
    match format {
        OutputFormat::Pretty => Ok(message.unwrap_or_default().to_string()),
        OutputFormat::Json => format_message_json(command, message),
    }
}
