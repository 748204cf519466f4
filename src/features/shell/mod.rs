//! Shell and desktop integration.
//!
//! This module provides the real collaborators behind the tracker:
//! - Desktop notifications and tmux refresh
//! - Audio/app control through shell commands
//! - Git commit history
//! - Journaling app hand-off
//! - Shell completions generation

pub mod audio;
pub mod completions;
pub mod git;
pub mod journal;
pub mod notify;
pub mod process;

pub use audio::ShellAudio;
pub use completions::{completion_install_instructions, generate_completions, shell_from_str};
pub use git::GitLog;
pub use journal::AppJournal;
pub use notify::DesktopNotifier;
