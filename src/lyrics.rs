//! Plain lyric sheet export: one `text [m:ss]` entry per line.

use crate::document::LyricLine;

/// Render lines as `"{text} [{m}:{ss}]"`, newline separated, in the given order.
///
/// ```
/// use karaoke_share::{lyrics::to_bracketed_lyrics, LyricLine};
///
/// let sheet = to_bracketed_lyrics(&[LyricLine::new("Hello", 3.2), LyricLine::new("World", 65.9)]);
/// assert_eq!(sheet, "Hello [0:03]\nWorld [1:05]");
/// ```
pub fn to_bracketed_lyrics(lines: &[LyricLine]) -> String {
    lines
        .iter()
        .map(|line| format!("{} [{}]", line.text, format_timestamp(line.time)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whole minutes and zero-padded whole seconds. Fractions are dropped.
pub fn format_timestamp(seconds: f64) -> String {
    // `as` saturates, so negative or NaN input shows as 0:00.
    let minutes = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{minutes}:{secs:02}")
}
