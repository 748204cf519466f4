//! JSON output formatting for pomtrack.

use serde::Serialize;
use serde_json::json;

use crate::error::PomtrackError;
use crate::features::focus::SessionStatus;

/// Format a status snapshot as JSON
///
/// # Errors
///
/// Returns `PomtrackError::Parse` if JSON serialization fails.
pub fn format_status_json(status: &SessionStatus) -> Result<String, PomtrackError> {
    Ok(serde_json::to_string_pretty(status)?)
}

/// Format a command result as `{"command": ..., "message": ...}`
///
/// # Errors
///
/// Returns `PomtrackError::Parse` if JSON serialization fails.
pub fn format_message_json(command: &str, message: Option<&str>) -> Result<String, PomtrackError> {
    let output = json!({
        "command": command,
        "message": message,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Serialize any value as pretty JSON
///
/// # Errors
///
/// Returns `PomtrackError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, PomtrackError> {
    Ok(serde_json::to_string_pretty(value)?)
}
