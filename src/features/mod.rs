//! Feature implementations for pomtrack.
//!
//! - Focus sessions (record, store, state machine, progress)
//! - Session logging
//! - Shell and desktop integration

pub mod focus;
pub mod logbook;
pub mod shell;
