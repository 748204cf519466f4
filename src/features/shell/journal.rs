//! Journaling app hand-off.
//!
//! Opens the journal app, puts the report on the clipboard, then runs the
//! configured paste command.

use super::process::{spawn_detached, spawn_with_input};
use crate::config::JournalConfig;
use crate::core::Journal;

/// Delivers text to a macOS journaling app via `pbcopy`.
#[derive(Debug, Clone)]
pub struct AppJournal {
    config: JournalConfig,
}

impl AppJournal {
    #[must_use]
    pub const fn new(config: JournalConfig) -> Self {
        Self { config }
    }

    /// Shell script that copies stdin to the clipboard and pastes it.
    #[must_use]
    pub fn clipboard_script(&self) -> String {
        match self.config.paste_command.as_deref() {
            Some(paste) if !paste.trim().is_empty() => format!("pbcopy && {paste}"),
            _ => "pbcopy".to_string(),
        }
    }
}

impl Journal for AppJournal {
    fn capture(&self, text: &str) {
        if !self.config.enabled {
            return;
        }
        spawn_detached("open", &["-a", &self.config.app]);
        spawn_with_input("sh", &["-c", &self.clipboard_script()], text);
    }
}
