//! pomtrack - A pomodoro session tracker for the terminal
//!
//! This crate tracks timed work sessions in a small persisted record and
//! renders compact progress strings for tmux status lines and hotkeys.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::PomtrackError;
pub use features::focus::SessionTracker;
