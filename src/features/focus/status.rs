//! A point-in-time view of the tracker for `status` output.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::record::SessionState;
use super::timer::SessionTracker;

/// Everything `pomtrack status` reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStatus {
    pub state: SessionState,
    pub started: Option<DateTime<Utc>>,
    pub last: DateTime<Utc>,
    pub count: u32,
    pub length_minutes: u32,
    /// Minutes left; absent when idle, negative once overdue.
    pub remaining_minutes: Option<f64>,
    /// Minutes since the last session ended.
    pub elapsed_minutes: f64,
}

impl SessionTracker {
    /// Snapshot the tracker without changing it.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            state: self.state(),
            started: self.started(),
            last: self.ended(),
            count: self.count(),
            length_minutes: self.settings().length_minutes,
            remaining_minutes: self.remaining(),
            elapsed_minutes: self.elapsed(),
        }
    }
}
