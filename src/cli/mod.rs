//! Command-line interface for pomtrack.

pub mod args;
pub mod commands;
