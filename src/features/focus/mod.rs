//! Focus sessions and their persisted record.
//!
//! Provides the work-session tracker:
//! - The persisted session record and its YAML store
//! - The start/poll/complete/abort/reset state machine
//! - Status-bar progress rendering

pub mod progress;
pub mod record;
pub mod status;
pub mod store;
pub mod timer;

pub use progress::{counter_glyph, recent_glyph, Progress, COUNTER_GLYPHS, RECENT_GLYPHS};
pub use record::{SessionRecord, SessionState};
pub use status::SessionStatus;
pub use store::{FileStore, RecordStore};

#[cfg(test)]
pub use store::MemoryStore;
pub use timer::SessionTracker;
