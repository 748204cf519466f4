//! Audio and distraction control through configured shell commands.

use tracing::debug;

use super::process::spawn_shell;
use crate::config::AudioConfig;
use crate::core::AudioControl;

/// Runs the configured suspend/resume commands.
#[derive(Debug, Clone)]
pub struct ShellAudio {
    config: AudioConfig,
}

impl ShellAudio {
    #[must_use]
    pub const fn new(config: AudioConfig) -> Self {
        Self { config }
    }

    fn run(&self, command: Option<&str>, what: &str) {
        if !self.config.enabled {
            return;
        }
        match command {
            Some(cmd) if !cmd.trim().is_empty() => spawn_shell(cmd),
            _ => debug!(what, "no audio command configured"),
        }
    }
}

impl AudioControl for ShellAudio {
    fn suspend(&self) {
        self.run(self.config.suspend_command.as_deref(), "suspend");
    }

    fn resume(&self) {
        self.run(self.config.resume_command.as_deref(), "resume");
    }
}
