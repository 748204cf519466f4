use chrono::Local;
use colored::Colorize;

use crate::features::focus::{counter_glyph, SessionState, SessionStatus};

/// Format a status snapshot as pretty output
pub fn format_status_pretty(status: &SessionStatus) -> String {
    let state = match status.state {
        SessionState::Idle => "Idle".white(),
        SessionState::Active => "Active".green(),
        SessionState::Expired => "Expired".yellow(),
    };

    let mut output = format!("{} {}\n", counter_glyph(status.count), state.bold());

    if let Some(started) = status.started {
        output.push_str(&format!(
            "  {}: {}\n",
            "Started".dimmed(),
            started.with_timezone(&Local).format("%H:%M")
        ));
    }

    if let Some(remaining) = status.remaining_minutes {
        let left = if remaining > 0.0 {
            format!("{}m of {}m", remaining.ceil(), status.length_minutes).cyan()
        } else {
            format!("overdue by {}m", remaining.abs().floor()).yellow()
        };
        output.push_str(&format!("  {}: {}\n", "Remaining".dimmed(), left));
    } else {
        output.push_str(&format!(
            "  {}: {}m\n",
            "Break".dimmed(),
            status.elapsed_minutes.floor()
        ));
    }

    output.push_str(&format!(
        "  {}: {}\n",
        "Last ended".dimmed(),
        status.last.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    ));
    output.push_str(&format!("  {}: {}", "Completed".dimmed(), status.count));

    output
}
