//! Session logging.
//!
//! A log run passes the tracker through an ordered list of [`Logger`]s.
//! Each one sees the text produced so far and contributes a fragment:
//! - [`SummaryLogger`] writes the time summary line
//! - [`ActivityLogger`] appends recent commits
//! - [`JournalLogger`] hands the accumulated text to a journaling app

mod loggers;

use std::path::Path;

pub use loggers::{logged_minutes, ActivityLogger, JournalLogger, SummaryLogger};

use crate::core::{Journal, VersionControl};
use crate::features::focus::SessionTracker;

/// Something that contributes a fragment to the session log.
pub trait Logger {
    /// Produce this logger's fragment given the tracker and the text so far.
    fn produce(&self, tracker: &SessionTracker, prior: &str) -> String;
}

impl<F> Logger for F
where
    F: Fn(&SessionTracker, &str) -> String,
{
    fn produce(&self, tracker: &SessionTracker, prior: &str) -> String {
        self(tracker, prior)
    }
}

/// The standard logger list: summary, commits, journal.
#[must_use]
pub fn default_loggers(
    workdir: &Path,
    vcs: Box<dyn VersionControl>,
    author: String,
    journal: Box<dyn Journal>,
) -> Vec<Box<dyn Logger>> {
    vec![
        Box::new(SummaryLogger::for_dir(workdir)),
        Box::new(ActivityLogger::new(vcs, author)),
        Box::new(JournalLogger::new(journal)),
    ]
}
