//! Session command implementations.
//!
//! Each command loads the record, performs one transition and exits.

use serde_json::json;

use crate::cli::args::OutputFormat;
use crate::config::{Config, Paths};
use crate::error::PomtrackError;
use crate::features::focus::{FileStore, SessionTracker};
use crate::features::logbook::default_loggers;
use crate::features::shell::{AppJournal, DesktopNotifier, GitLog, ShellAudio};
use crate::output::{format_message, format_status, to_json};

/// Build a tracker over the state file with the configured collaborators.
///
/// # Errors
///
/// Returns `PomtrackError::Storage` if the record cannot be loaded, or
/// `PomtrackError::Io` if the working directory is unavailable.
pub fn open_tracker(paths: &Paths, config: &Config) -> Result<SessionTracker, PomtrackError> {
    let store = FileStore::new(paths.state_file.clone());
    let workdir = std::env::current_dir()?;
    let loggers = default_loggers(
        &workdir,
        Box::new(GitLog::new()),
        config.activity.author_or_user(),
        Box::new(AppJournal::new(config.journal.clone())),
    );

    Ok(SessionTracker::open(Box::new(store), config.session.clone())?
        .with_notifier(Box::new(DesktopNotifier::new(config.notifications.clone())))
        .with_audio(Box::new(ShellAudio::new(config.audio.clone())))
        .with_loggers(loggers))
}

/// Start a session backdated by `slip` minutes.
///
/// # Errors
///
/// Returns an error if the record cannot be loaded or saved.
pub fn start(
    tracker: &mut SessionTracker,
    slip: u32,
    format: OutputFormat,
) -> Result<String, PomtrackError> {
    let started = tracker.start(slip)?;
    match format {
        OutputFormat::Pretty => Ok(String::new()),
        OutputFormat::Json => to_json(&json!({
            "started": started,
            "at": tracker.started(),
        })),
    }
}

/// Print minutes left, completing the session if its time is up.
///
/// # Errors
///
/// Returns an error if completing the session fails to save.
pub fn poll(tracker: &mut SessionTracker, format: OutputFormat) -> Result<String, PomtrackError> {
    let remaining = tracker.poll()?;
    match format {
        OutputFormat::Pretty => Ok(remaining.map(|m| m.to_string()).unwrap_or_default()),
        OutputFormat::Json => to_json(&json!({ "remaining": remaining })),
    }
}

/// Complete the running session.
///
/// # Errors
///
/// Returns an error if the record cannot be saved.
pub fn done(tracker: &mut SessionTracker, format: OutputFormat) -> Result<String, PomtrackError> {
    let completed = tracker.complete()?;
    match format {
        OutputFormat::Pretty => Ok(String::new()),
        OutputFormat::Json => to_json(&json!({
            "completed": completed,
            "count": tracker.count(),
        })),
    }
}

/// Abort the running session.
///
/// # Errors
///
/// Returns an error if the record cannot be saved.
pub fn abort(tracker: &mut SessionTracker, format: OutputFormat) -> Result<String, PomtrackError> {
    tracker.abort()?;
    format_message("abort", Some("Aborted"), format)
}

/// Reset the completed count.
///
/// # Errors
///
/// Returns an error if the record cannot be saved.
pub fn reset(tracker: &mut SessionTracker, format: OutputFormat) -> Result<String, PomtrackError> {
    let message = tracker.reset()?;
    format_message("reset", message.as_deref(), format)
}

/// Render the status-bar string.
///
/// # Errors
///
/// Returns an error if completing an expired session fails to save.
pub fn progress(
    tracker: &mut SessionTracker,
    format: OutputFormat,
) -> Result<String, PomtrackError> {
    let progress = tracker.progress()?;
    match format {
        OutputFormat::Pretty => Ok(progress.to_string()),
        OutputFormat::Json => to_json(&json!({
            "display": progress.to_string(),
            "progress": progress,
        })),
    }
}

/// Print the completed count.
///
/// # Errors
///
/// Returns `PomtrackError::Parse` if JSON serialization fails.
pub fn count(tracker: &SessionTracker, format: OutputFormat) -> Result<String, PomtrackError> {
    match format {
        OutputFormat::Pretty => Ok(tracker.count().to_string()),
        OutputFormat::Json => to_json(&json!({ "count": tracker.count() })),
    }
}

/// Send the status-bar string as a notification.
///
/// # Errors
///
/// Returns an error if completing an expired session fails to save.
pub fn announce(
    tracker: &mut SessionTracker,
    format: OutputFormat,
) -> Result<String, PomtrackError> {
    let text = tracker.announce()?;
    format_message("announce", Some(&text), format)
}

/// Show the session state in detail.
///
/// # Errors
///
/// Returns `PomtrackError::Parse` if JSON serialization fails.
pub fn status(tracker: &SessionTracker, format: OutputFormat) -> Result<String, PomtrackError> {
    format_status(&tracker.status(), format)
}
