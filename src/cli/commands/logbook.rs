//! Session log command implementation.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::cli::args::OutputFormat;
use crate::error::PomtrackError;
use crate::features::focus::SessionTracker;
use crate::output::format_message;

/// Run the loggers, keep the report in `last_log` and print it.
///
/// The report is still returned if `last_log` cannot be written.
///
/// # Errors
///
/// Returns `PomtrackError::Storage` if the record cannot be saved.
pub fn log(
    tracker: &mut SessionTracker,
    last_log: &Path,
    format: OutputFormat,
) -> Result<String, PomtrackError> {
    let report = tracker.log()?;
    match fs::write(last_log, &report) {
        Ok(()) => debug!(path = %last_log.display(), "report saved"),
        Err(e) => warn!(path = %last_log.display(), error = %e, "failed to save report"),
    }

    format_message("log", Some(&report), format)
}

/// Print the report from the last `log` run.
///
/// # Errors
///
/// Returns `PomtrackError::Storage` if the saved report exists but cannot be read.
pub fn show_log(last_log: &Path, format: OutputFormat) -> Result<String, PomtrackError> {
    if !last_log.exists() {
        return match format {
            OutputFormat::Pretty => Ok("No session log yet.".to_string()),
            OutputFormat::Json => format_message("log", None, format),
        };
    }

    let report = fs::read_to_string(last_log).map_err(|e| PomtrackError::storage(last_log, e))?;
    format_message("log", Some(&report), format)
}
