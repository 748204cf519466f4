//! Capabilities the tracker requires of its external collaborators.
//!
//! All of these are fire-and-forget from the tracker's point of view:
//! implementations swallow their own failures and never return errors.

/// Desktop/terminal notification dispatch.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    /// Show `message`. Sticky notifications stay until dismissed.
    fn notify(&self, message: &str, sticky: bool);
}

/// Control over background audio and distracting apps.
#[cfg_attr(test, mockall::automock)]
pub trait AudioControl {
    /// Called when a session starts.
    fn suspend(&self);

    /// Called when a session completes.
    fn resume(&self);
}

/// Read access to the version-control history.
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl {
    /// Commits by `author` within the last `minutes`, as raw text.
    ///
    /// Returns an empty string when history is unavailable.
    fn commits_since(&self, minutes: u64, author: &str) -> String;
}

/// A journaling app that receives the session report.
#[cfg_attr(test, mockall::automock)]
pub trait Journal {
    /// Open the journal and hand it `text` via the clipboard.
    fn capture(&self, text: &str);
}

/// A notifier that drops every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Notifier for Silent {
    fn notify(&self, _message: &str, _sticky: bool) {}
}

impl AudioControl for Silent {
    fn suspend(&self) {}
    fn resume(&self) {}
}

impl VersionControl for Silent {
    fn commits_since(&self, _minutes: u64, _author: &str) -> String {
        String::new()
    }
}

impl Journal for Silent {
    fn capture(&self, _text: &str) {}
}
