//! Fire-and-forget process helpers.
//!
//! Collaborators never fail the caller. Spawn errors are logged and dropped.

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

/// Spawn `program` with `args` in the background, output discarded.
pub fn spawn_detached(program: &str, args: &[&str]) {
    let result = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    match result {
        Ok(child) => debug!(program, pid = child.id(), "spawned"),
        Err(e) => warn!(program, error = %e, "failed to spawn"),
    }
}

/// Run `command` through `sh -c` in the background.
pub fn spawn_shell(command: &str) {
    spawn_detached("sh", &["-c", command]);
}

/// Spawn `program` and feed `input` to its stdin without waiting for it.
pub fn spawn_with_input(program: &str, args: &[&str], input: &str) {
    let result = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    let mut child = match result {
        Ok(child) => child,
        Err(e) => {
            warn!(program, error = %e, "failed to spawn");
            return;
        }
    };

    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(input.as_bytes()) {
            warn!(program, error = %e, "failed to write stdin");
        }
    }
    debug!(program, pid = child.id(), "spawned with input");
}

/// Run `program` to completion and return its stdout, or `None` on failure.
#[must_use]
pub fn capture_output(program: &str, args: &[String]) -> Option<String> {
    let output = match Command::new(program).args(args).stdin(Stdio::null()).output() {
        Ok(output) => output,
        Err(e) => {
            warn!(program, error = %e, "failed to run");
            return None;
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!(program, stderr = %stderr.trim(), "command failed");
        return None;
    }

    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}
