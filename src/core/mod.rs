//! Core abstractions for pomtrack.
//!
//! Time and collaborator capabilities shared across features.

pub mod clock;
mod traits;

pub use clock::{minutes_between, Clock};
pub use traits::{AudioControl, Journal, Notifier, Silent, VersionControl};

#[cfg(test)]
pub use traits::{MockAudioControl, MockJournal, MockNotifier, MockVersionControl};
