//! The built-in loggers.

use std::path::Path;

use super::Logger;
use crate::core::{Journal, VersionControl};
use crate::features::focus::SessionTracker;

/// Minutes worked plus minutes since the last session ended.
#[must_use]
pub fn logged_minutes(tracker: &SessionTracker) -> f64 {
    let per_session = f64::from(tracker.settings().log_minutes_per_session);
    f64::from(tracker.count()) * per_session + tracker.elapsed()
}

/// Writes `"{worked}m + {elapsed}m {dir}"` followed by a separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLogger {
    label: String,
}

impl SummaryLogger {
    /// Label the summary with the last component of `dir`.
    #[must_use]
    pub fn for_dir(dir: &Path) -> Self {
        let label = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { label }
    }
}

impl Logger for SummaryLogger {
    fn produce(&self, tracker: &SessionTracker, _prior: &str) -> String {
        let worked =
            u64::from(tracker.count()) * u64::from(tracker.settings().log_minutes_per_session);
        #[allow(clippy::cast_possible_truncation)]
        let elapsed = tracker.elapsed().round() as i64;
        format!("{worked}m + {elapsed}m {}\n\n---\n\n", self.label)
    }
}

/// Appends commits made during the logged window.
pub struct ActivityLogger {
    vcs: Box<dyn VersionControl>,
    author: String,
}

impl ActivityLogger {
    /// Search `vcs` for commits by `author`.
    #[must_use]
    pub fn new(vcs: Box<dyn VersionControl>, author: String) -> Self {
        Self { vcs, author }
    }
}

impl Logger for ActivityLogger {
    fn produce(&self, tracker: &SessionTracker, _prior: &str) -> String {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let minutes = logged_minutes(tracker).max(0.0).floor() as u64;
        self.vcs.commits_since(minutes, &self.author)
    }
}

/// Sends the log so far to a journaling app. Contributes no text.
pub struct JournalLogger {
    journal: Box<dyn Journal>,
}

impl JournalLogger {
    #[must_use]
    pub fn new(journal: Box<dyn Journal>) -> Self {
        Self { journal }
    }
}

impl Logger for JournalLogger {
    fn produce(&self, _tracker: &SessionTracker, prior: &str) -> String {
        self.journal.capture(prior);
        String::new()
    }
}
