//! Configuration settings for pomtrack.
//!
//! Settings are loaded from `~/.pomtrack/config.yaml`. Every field has a
//! default, so a missing file or a partial one is fine.

use serde::{Deserialize, Serialize};

use crate::config::Paths;
use crate::error::PomtrackError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Session timing settings.
    pub session: SessionConfig,
    /// Notification settings.
    pub notifications: NotificationConfig,
    /// Audio/app control settings.
    pub audio: AudioConfig,
    /// Journaling app settings.
    pub journal: JournalConfig,
    /// Commit history settings.
    pub activity: ActivityConfig,
}

/// Session timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    /// Length of one session in minutes.
    pub length_minutes: u32,
    /// A break longer than this earns a "good job".
    pub break_threshold_minutes: u32,
    /// How long after a session ends the "just finished" glyph shows.
    pub recent_window_minutes: u32,
    /// Minutes credited per completed session in the log summary.
    pub log_minutes_per_session: u32,
}

/// Notification backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationBackend {
    /// macOS `osascript`.
    #[default]
    Osascript,
    /// freedesktop `notify-send`.
    NotifySend,
}

/// Notification settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NotificationConfig {
    /// Enable desktop notifications.
    pub enabled: bool,
    /// Which notification program to use.
    pub backend: NotificationBackend,
    /// Title shown on notifications.
    pub title: String,
    /// Ask tmux to redraw its status line after each notification.
    pub tmux_refresh: bool,
}

/// Audio and distraction control.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AudioConfig {
    /// Run the suspend/resume commands at all.
    pub enabled: bool,
    /// Shell command run when a session starts.
    pub suspend_command: Option<String>,
    /// Shell command run when a session completes.
    pub resume_command: Option<String>,
}

/// Journaling app settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct JournalConfig {
    /// Hand the log report to the journal app.
    pub enabled: bool,
    /// Application name passed to `open -a`.
    pub app: String,
    /// Shell command that pastes the clipboard into the app.
    pub paste_command: Option<String>,
}

/// Commit history settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ActivityConfig {
    /// Commit author to search for. Defaults to `$USER`.
    pub author: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            length_minutes: 25,
            break_threshold_minutes: 5,
            recent_window_minutes: 5,
            log_minutes_per_session: 30,
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: NotificationBackend::default(),
            title: "pomtrack".to_string(),
            tmux_refresh: true,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            suspend_command: Some(r#"osascript -e 'quit app "Mail"'"#.to_string()),
            resume_command: Some(
                r#"osascript -e 'tell application "Music" to play'"#.to_string(),
            ),
        }
    }
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            app: "Day One".to_string(),
            paste_command: Some(
                r#"osascript -e 'tell application "System Events" to keystroke "v" using command down'"#
                    .to_string(),
            ),
        }
    }
}

impl ActivityConfig {
    /// The configured author, or the current user.
    #[must_use]
    pub fn author_or_user(&self) -> String {
        self.author
            .clone()
            .or_else(|| std::env::var("USER").ok())
            .unwrap_or_default()
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load(paths: &Paths) -> Result<Self, PomtrackError> {
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, PomtrackError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            PomtrackError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            PomtrackError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), PomtrackError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| PomtrackError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            PomtrackError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// A configuration with every external collaborator switched off.
    #[must_use]
    pub fn quiet() -> Self {
        let mut config = Self::default();
        config.notifications.enabled = false;
        config.notifications.tmux_refresh = false;
        config.audio.enabled = false;
        config.journal.enabled = false;
        config
    }
}
