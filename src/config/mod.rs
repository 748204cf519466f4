//! Configuration management for pomtrack.
//!
//! This module handles locating the data root and loading settings from it.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{
    ActivityConfig, AudioConfig, Config, JournalConfig, NotificationBackend, NotificationConfig,
    SessionConfig,
};
