//! Desktop notifications and tmux status refresh.

use super::process::spawn_detached;
use crate::config::{NotificationBackend, NotificationConfig};
use crate::core::Notifier;

/// Redraw the status line of every attached tmux client.
pub const TMUX_REFRESH: &str =
    "for c in $(tmux list-clients -F '#{client_tty}'); do tmux refresh-client -S -t \"$c\"; done";

/// One program run issued by a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: &'static str,
    pub args: Vec<String>,
}

impl Invocation {
    fn new(program: &'static str, args: Vec<String>) -> Self {
        Self { program, args }
    }
}

/// Notifier backed by `osascript` or `notify-send`.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    config: NotificationConfig,
}

impl DesktopNotifier {
    #[must_use]
    pub const fn new(config: NotificationConfig) -> Self {
        Self { config }
    }

    /// The programs a notification runs, in order.
    #[must_use]
    pub fn invocations(&self, message: &str, sticky: bool) -> Vec<Invocation> {
        let mut calls = Vec::new();

        if self.config.enabled {
            calls.push(match self.config.backend {
                NotificationBackend::Osascript => Invocation::new(
                    "osascript",
                    vec![
                        "-e".to_string(),
                        osascript_script(&self.config.title, message, sticky),
                    ],
                ),
                NotificationBackend::NotifySend => Invocation::new(
                    "notify-send",
                    notify_send_args(&self.config.title, message, sticky),
                ),
            });
        }

        if self.config.tmux_refresh {
            calls.push(Invocation::new(
                "sh",
                vec!["-c".to_string(), TMUX_REFRESH.to_string()],
            ));
        }

        calls
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, message: &str, sticky: bool) {
        for call in self.invocations(message, sticky) {
            let args: Vec<&str> = call.args.iter().map(String::as_str).collect();
            spawn_detached(call.program, &args);
        }
    }
}

/// AppleScript for a notification. Sticky ones use an alert that waits to be dismissed.
#[must_use]
pub fn osascript_script(title: &str, message: &str, sticky: bool) -> String {
    let title = escape_applescript(title);
    let message = escape_applescript(message);
    if sticky {
        format!(r#"display alert "{title}" message "{message}""#)
    } else {
        format!(r#"display notification "{message}" with title "{title}""#)
    }
}

/// Arguments for `notify-send`. Sticky ones are sent as critical.
#[must_use]
pub fn notify_send_args(title: &str, message: &str, sticky: bool) -> Vec<String> {
    let mut args = Vec::new();
    if sticky {
        args.push("--urgency=critical".to_string());
    }
    args.push(title.to_string());
    args.push(message.to_string());
    args
}

fn escape_applescript(s: &str) -> String {
    s.replace('\\', r"\\").replace('"', r#"\""#)
}
