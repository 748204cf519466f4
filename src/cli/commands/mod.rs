//! Command implementations for pomtrack.
//!
//! This module contains the implementation of all CLI commands.

mod logbook;
mod session;
mod setup;

pub use logbook::{log, show_log};
pub use session::{
    abort, announce, count, done, open_tracker, poll, progress, reset, start, status,
};
pub use setup::{completions, init};
