//! The persisted session record and the states derived from it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The whole of pomtrack's persisted state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// When the running session began. `None` between sessions.
    pub started: Option<DateTime<Utc>>,
    /// When the most recent session ended or was aborted.
    pub last: DateTime<Utc>,
    /// Completed sessions since the last reset.
    pub count: u32,
}

impl SessionRecord {
    /// A fresh record: nothing running, nothing counted, last ended at `now`.
    #[must_use]
    pub const fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            started: None,
            last: now,
            count: 0,
        }
    }

    /// Whether a session has been started and not yet finished or aborted.
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.started.is_some()
    }

    /// Deadline of the running session, if any.
    #[must_use]
    pub fn deadline(&self, length: Duration) -> Option<DateTime<Utc>> {
        self.started.map(|s| s + length)
    }
}

/// Lifecycle state of the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No session running.
    Idle,
    /// Session running with time remaining.
    Active,
    /// Session running past its deadline, not yet polled.
    Expired,
}

impl SessionState {
    /// Derive the state from a record at `now`.
    #[must_use]
    pub fn of(record: &SessionRecord, length: Duration, now: DateTime<Utc>) -> Self {
        match record.deadline(length) {
            None => Self::Idle,
            Some(deadline) if deadline > now => Self::Active,
            Some(_) => Self::Expired,
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Active => write!(f, "Active"),
            Self::Expired => write!(f, "Expired"),
        }
    }
}
