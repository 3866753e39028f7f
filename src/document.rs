//! The karaoke transcript: a video id plus time-aligned lyric lines.
//!
//! Times are carried as `f64` seconds to match what the player hands over,
//! but the share format only knows whole milliseconds. [`LyricLine::time_ms`]
//! is the single place where seconds become milliseconds.

use crate::error::{KaraokeError, Result};
use serde::{Deserialize, Serialize};

/// One line of lyrics and the moment (in seconds) it becomes current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricLine {
    pub text: String,
    pub time: f64,
}

impl LyricLine {
    pub fn new(text: impl Into<String>, time: f64) -> Self {
        Self {
            text: text.into(),
            time,
        }
    }

    /// Build a line from a whole-millisecond timestamp.
    pub fn from_millis(text: impl Into<String>, ms: u64) -> Self {
        Self::new(text, ms as f64 / 1000.0)
    }

    /// The line's time in whole milliseconds, rounded to nearest.
    ///
    /// Returns `None` for negative, NaN or infinite times and for times too
    /// large for `u64` milliseconds.
    ///
    /// ```
    /// use karaoke_share::LyricLine;
    ///
    /// assert_eq!(LyricLine::new("a", 1.234).time_ms(), Some(1234));
    /// assert_eq!(LyricLine::new("a", 0.0004).time_ms(), Some(0));
    /// assert_eq!(LyricLine::new("a", -1.0).time_ms(), None);
    /// ```
    #[must_use]
    pub fn time_ms(&self) -> Option<u64> {
        if !self.time.is_finite() || self.time < 0.0 {
            return None;
        }

        let ms = (self.time * 1000.0).round();
        // u64::MAX as f64 rounds up to 2^64, which itself does not fit.
        if ms >= u64::MAX as f64 {
            return None;
        }
        Some(ms as u64)
    }
}

/// A video id with its lyric transcript.
///
/// `lines` may be in any order; serialization always sorts by time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KaraokeDocument {
    pub video_id: String,
    #[serde(default)]
    pub lines: Vec<LyricLine>,
}

impl KaraokeDocument {
    pub fn new(video_id: impl Into<String>, lines: Vec<LyricLine>) -> Self {
        Self {
            video_id: video_id.into(),
            lines,
        }
    }

    /// Check every line's time without encoding anything.
    pub fn validate(&self) -> Result<()> {
        timeline(&self.lines).map(|_| ())
    }
}

/// A line's text paired with its validated millisecond timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedText<'a> {
    pub ms: u64,
    pub text: &'a str,
}

/// Validate and order `lines` for serialization.
///
/// The sort is stable on milliseconds, so lines that round to the same
/// millisecond keep their input order.
pub fn timeline(lines: &[LyricLine]) -> Result<Vec<TimedText<'_>>> {
    let mut timed = lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            line.time_ms()
                .map(|ms| TimedText {
                    ms,
                    text: &line.text,
                })
                .ok_or(KaraokeError::InvalidTime {
                    index,
                    time: line.time,
                })
        })
        .collect::<Result<Vec<_>>>()?;

    timed.sort_by_key(|line| line.ms);
    Ok(timed)
}
