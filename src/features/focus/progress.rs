//! Short progress strings for status bars.
//!
//! While a session runs the display is the minutes left (`"17m"`). Right
//! after a session ends it is one of a few "just finished" glyphs, and
//! otherwise a circled numeral showing how many sessions are done.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// Tally glyphs indexed by completed-session count.
pub const COUNTER_GLYPHS: [&str; 11] = ["⦿", "➊", "➋", "➌", "➍", "➎", "➏", "➐", "➑", "➒", "➓"];

/// Shown for a few minutes after a session ends.
pub const RECENT_GLYPHS: [&str; 3] = ["⇈", "ᚚ", "⇶"];

/// What the status bar should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Progress {
    /// Minutes left in the running session (rounded up).
    Remaining(u32),
    /// A session ended moments ago.
    JustFinished(&'static str),
    /// On a break; glyph encodes the completed count.
    Tally(&'static str),
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remaining(minutes) => write!(f, "{minutes}m"),
            Self::JustFinished(glyph) | Self::Tally(glyph) => f.write_str(glyph),
        }
    }
}

/// Glyph for `count` completed sessions. Counts past ten show the last glyph.
#[must_use]
pub fn counter_glyph(count: u32) -> &'static str {
    let last = COUNTER_GLYPHS.len() - 1;
    let index = usize::try_from(count).map_or(last, |c| c.min(last));
    COUNTER_GLYPHS[index]
}

/// One of the "just finished" glyphs, chosen by `rng`.
pub fn recent_glyph<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    RECENT_GLYPHS.choose(rng).copied().unwrap_or(RECENT_GLYPHS[0])
}
