//! Error types for pomtrack.

use thiserror::Error;

/// Errors surfaced by the session tracker and its command-line front end.
///
/// Failures of external collaborators are logged and dropped, never returned.
#[derive(Debug, Error)]
pub enum PomtrackError {
    /// The persisted session record is missing, unreadable, or corrupt.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration could not be resolved or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A command name in the slip family that does not carry a valid slip.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl PomtrackError {
    /// Build a storage error for the record at `path`.
    pub fn storage(path: &std::path::Path, detail: impl std::fmt::Display) -> Self {
        Self::Storage(format!("{}: {detail}", path.display()))
    }

    /// Returns true if this error came from the state store.
    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}
