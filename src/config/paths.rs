//! Path resolution for pomtrack state and configuration.
//!
//! All pomtrack data is stored in `~/.pomtrack/` (or `$POMTRACK_HOME`):
//! - `state.yaml` - The persisted session record
//! - `config.yaml` - Optional settings
//! - `last_log.md` - The most recent session report

use std::path::PathBuf;

use crate::error::PomtrackError;

/// Environment variable that overrides the data root.
pub const HOME_ENV: &str = "POMTRACK_HOME";

/// Paths to pomtrack data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Root directory: `~/.pomtrack/`
    pub root: PathBuf,
    /// Session record: `~/.pomtrack/state.yaml`
    pub state_file: PathBuf,
    /// Config file: `~/.pomtrack/config.yaml`
    pub config_file: PathBuf,
    /// Last report: `~/.pomtrack/last_log.md`
    pub last_log: PathBuf,
}

impl Paths {
    /// Resolve paths from `$POMTRACK_HOME`, falling back to `$HOME/.pomtrack`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, PomtrackError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            PomtrackError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".pomtrack")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            state_file: root.join("state.yaml"),
            config_file: root.join("config.yaml"),
            last_log: root.join("last_log.md"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), PomtrackError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                PomtrackError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }
        Ok(())
    }
}
