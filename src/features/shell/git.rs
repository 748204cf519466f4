//! Git history integration.
//!
//! Lists the commits made while sessions were running so the session log
//! can include them.

use std::path::PathBuf;

use super::process::capture_output;
use crate::core::VersionControl;

/// Reads commit history with `git log`.
#[derive(Debug, Clone, Default)]
pub struct GitLog {
    /// Repository to query, or the current directory.
    repo: Option<PathBuf>,
}

impl GitLog {
    /// Query the repository containing the current directory.
    #[must_use]
    pub const fn new() -> Self {
        Self { repo: None }
    }

    /// Query the repository at `repo`.
    #[must_use]
    pub fn in_repo(repo: impl Into<PathBuf>) -> Self {
        Self {
            repo: Some(repo.into()),
        }
    }

    /// Arguments passed to `git`.
    #[must_use]
    pub fn log_args(&self, minutes: u64, author: &str) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(repo) = &self.repo {
            args.push("-C".to_string());
            args.push(repo.display().to_string());
        }
        args.push("log".to_string());
        args.push(format!("--author={author}"));
        args.push("--since".to_string());
        args.push(format!("{minutes} minutes ago"));
        args
    }
}

impl VersionControl for GitLog {
    fn commits_since(&self, minutes: u64, author: &str) -> String {
        capture_output("git", &self.log_args(minutes, author)).unwrap_or_default()
    }
}
