//! Canonical text form of a karaoke document.
//!
//! Two framings share one decoder:
//!
//! - **Delimited**, the format the web player writes into its links:
//!   `videoId|d1~d2~d3|line1|line2|line3`, where `dN` are base-62 millisecond
//!   deltas. `|` and `~` inside lyric text are swapped for `¦` and `～` on the
//!   way in and restored on the way out, so texts that already contain those
//!   look-alikes do not survive unchanged.
//! - **Length-prefixed**, the default: `STX`, then `len:videoId`, `count:`,
//!   `count` deltas each followed by `~`, then `count` texts as `len:text`.
//!   Lengths are UTF-8 byte counts in base 62. Nothing is escaped.
//!
//! [`deserialize`] tells them apart by the leading STX (U+0002).

use crate::document::{timeline, KaraokeDocument, LyricLine, TimedText};
use crate::error::{Corruption, KaraokeError, Result};
use crate::varint::{decode_varint, encode_varint};
use log::trace;
use serde::{Deserialize, Serialize};

/// Separates the top-level fields and the lyric lines of the delimited form.
pub const FIELD_SEP: &str = "|";
/// Separates (delimited) or terminates (length-prefixed) timestamp deltas.
pub const DELTA_SEP: &str = "~";
/// First character of every length-prefixed document.
pub const FRAMED_MARKER: char = '\u{2}';

const FIELD_SEP_PLACEHOLDER: &str = "¦";
const DELTA_SEP_PLACEHOLDER: &str = "～";
const LENGTH_SEP: &str = ":";

/// How the canonical text is laid out.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Framing {
    /// Byte-length prefixed fields; any text round-trips.
    #[default]
    LengthPrefixed,
    /// The `|`/`~` format understood by the web player.
    Delimited,
}

/// Write `video_id` and `lines` in the given framing.
///
/// Lines are sorted by millisecond time first. Fails with
/// [`KaraokeError::InvalidTime`] for times that cannot be stored, and with
/// [`KaraokeError::InvalidVideoId`] when a delimited video id contains `|`.
pub fn serialize(video_id: &str, lines: &[LyricLine], framing: Framing) -> Result<String> {
    let timed = timeline(lines)?;
    let canonical = match framing {
        Framing::Delimited => serialize_delimited(video_id, &timed)?,
        Framing::LengthPrefixed => serialize_framed(video_id, &timed),
    };
    trace!("Serialized {} lines as {framing:?}: {canonical:?}", timed.len());
    Ok(canonical)
}

/// Parse canonical text in either framing.
pub fn deserialize(canonical: &str) -> Result<KaraokeDocument> {
    let document = match canonical.strip_prefix(FRAMED_MARKER) {
        Some(body) => deserialize_framed(body)?,
        None => deserialize_delimited(canonical)?,
    };
    Ok(document)
}

fn deltas(timed: &[TimedText<'_>]) -> Vec<u64> {
    timed
        .iter()
        .scan(0u64, |previous, line| {
            // `timed` is sorted, so this never underflows.
            let delta = line.ms - *previous;
            *previous = line.ms;
            Some(delta)
        })
        .collect()
}

fn absolute_times(deltas: &[u64]) -> std::result::Result<Vec<u64>, Corruption> {
    let mut total = 0u64;
    deltas
        .iter()
        .map(|&delta| {
            total = total.checked_add(delta).ok_or(Corruption::Overflow)?;
            Ok(total)
        })
        .collect()
}

fn zip_lines(times: Vec<u64>, texts: Vec<String>) -> std::result::Result<Vec<LyricLine>, Corruption> {
    if times.len() != texts.len() {
        return Err(Corruption::CountMismatch {
            timestamps: times.len(),
            lines: texts.len(),
        });
    }

    Ok(texts
        .into_iter()
        .zip(times)
        .map(|(text, ms)| LyricLine::from_millis(text, ms))
        .collect())
}

fn serialize_delimited(video_id: &str, timed: &[TimedText<'_>]) -> Result<String> {
    if video_id.contains(FIELD_SEP) || video_id.starts_with(FRAMED_MARKER) {
        return Err(KaraokeError::InvalidVideoId(video_id.to_string()));
    }

    let timestamps = deltas(timed)
        .into_iter()
        .map(encode_varint)
        .collect::<Vec<_>>()
        .join(DELTA_SEP);
    let lyrics = timed
        .iter()
        .map(|line| escape(line.text))
        .collect::<Vec<_>>()
        .join(FIELD_SEP);

    Ok(format!("{video_id}{FIELD_SEP}{timestamps}{FIELD_SEP}{lyrics}"))
}

fn escape(text: &str) -> String {
    text.replace(FIELD_SEP, FIELD_SEP_PLACEHOLDER)
        .replace(DELTA_SEP, DELTA_SEP_PLACEHOLDER)
}

fn unescape(text: &str) -> String {
    text.replace(FIELD_SEP_PLACEHOLDER, FIELD_SEP)
        .replace(DELTA_SEP_PLACEHOLDER, DELTA_SEP)
}

fn deserialize_delimited(canonical: &str) -> std::result::Result<KaraokeDocument, Corruption> {
    let (video_id, rest) = canonical
        .split_once(FIELD_SEP)
        .ok_or(Corruption::MissingSeparator)?;
    let (timestamps, lyrics) = rest
        .split_once(FIELD_SEP)
        .ok_or(Corruption::MissingSeparator)?;

    // An empty timestamp block is the encoding of "no lines".
    if timestamps.is_empty() {
        if !lyrics.is_empty() {
            return Err(Corruption::CountMismatch {
                timestamps: 0,
                lines: lyrics.split(FIELD_SEP).count(),
            });
        }
        return Ok(KaraokeDocument::new(video_id, Vec::new()));
    }

    let deltas = timestamps
        .split(DELTA_SEP)
        .map(decode_varint)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let texts = lyrics.split(FIELD_SEP).map(unescape).collect();
    let lines = zip_lines(absolute_times(&deltas)?, texts)?;

    Ok(KaraokeDocument::new(video_id, lines))
}

fn serialize_framed(video_id: &str, timed: &[TimedText<'_>]) -> String {
    let mut out = String::with_capacity(
        video_id.len() + timed.iter().map(|line| line.text.len() + 8).sum::<usize>() + 8,
    );

    out.push(FRAMED_MARKER);
    push_field(&mut out, video_id);
    out.push_str(&encode_varint(timed.len() as u64));
    out.push_str(LENGTH_SEP);
    for delta in deltas(timed) {
        out.push_str(&encode_varint(delta));
        out.push_str(DELTA_SEP);
    }
    for line in timed {
        push_field(&mut out, line.text);
    }
    out
}

fn push_field(out: &mut String, value: &str) {
    out.push_str(&encode_varint(value.len() as u64));
    out.push_str(LENGTH_SEP);
    out.push_str(value);
}

/// Cursor over the body of a length-prefixed document.
struct FrameReader<'a> {
    rest: &'a str,
}

impl<'a> FrameReader<'a> {
    fn number(&mut self, terminator: &str) -> std::result::Result<u64, Corruption> {
        let (digits, rest) = self
            .rest
            .split_once(terminator)
            .ok_or(Corruption::MissingSeparator)?;
        self.rest = rest;
        decode_varint(digits)
    }

    fn field(&mut self) -> std::result::Result<&'a str, Corruption> {
        let len = usize::try_from(self.number(LENGTH_SEP)?).map_err(|_| Corruption::Overflow)?;
        // `get` also fails when `len` lands inside a multi-byte character.
        let value = self.rest.get(..len).ok_or(Corruption::Truncated)?;
        self.rest = &self.rest[len..];
        Ok(value)
    }

    fn remaining(&self) -> usize {
        self.rest.len()
    }

    fn finish(self) -> std::result::Result<(), Corruption> {
        match self.rest.len() {
            0 => Ok(()),
            extra => Err(Corruption::TrailingBytes(extra)),
        }
    }
}

fn deserialize_framed(body: &str) -> std::result::Result<KaraokeDocument, Corruption> {
    let mut reader = FrameReader { rest: body };

    let video_id = reader.field()?.to_string();
    let count = reader.number(LENGTH_SEP)?;
    // Each line needs at least "0~" and "0:" so a larger count cannot be honest.
    if count > reader.remaining() as u64 {
        return Err(Corruption::Truncated);
    }

    let deltas = (0..count)
        .map(|_| reader.number(DELTA_SEP))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let texts = (0..count)
        .map(|_| reader.field().map(str::to_string))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    reader.finish()?;

    let lines = zip_lines(absolute_times(&deltas)?, texts)?;
    Ok(KaraokeDocument::new(video_id, lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_lines() -> Vec<LyricLine> {
        vec![
            LyricLine::new("Hello", 1.234),
            LyricLine::new("World", 0.0),
        ]
    }

    #[test]
    fn test_delimited_layout() {
        let canonical = serialize("abc123", &sample_lines(), Framing::Delimited).unwrap();
        // 0 ms, then +1234 ms ("Ju" in base 62).
        assert_eq!(canonical, "abc123|0~Ju|World|Hello");
    }

    #[test]
    fn test_delimited_escapes_reserved_characters() {
        let lines = vec![LyricLine::new("a|b~c", 0.5)];
        let canonical = serialize("vid", &lines, Framing::Delimited).unwrap();
        assert_eq!(canonical, "vid|84|a¦b～c");

        let doc = deserialize(&canonical).unwrap();
        assert_eq!(doc.lines[0].text, "a|b~c");
    }

    #[test]
    fn test_delimited_empty_document() {
        let canonical = serialize("abc123", &[], Framing::Delimited).unwrap();
        assert_eq!(canonical, "abc123||");

        let doc = deserialize(&canonical).unwrap();
        assert_eq!(doc, KaraokeDocument::new("abc123", Vec::new()));
    }

    #[test]
    fn test_delimited_single_empty_line_is_not_empty_document() {
        let lines = vec![LyricLine::new("", 0.0)];
        let canonical = serialize("v", &lines, Framing::Delimited).unwrap();
        assert_eq!(canonical, "v|0|");

        assert_eq!(deserialize(&canonical).unwrap().lines, lines);
    }

    #[test]
    fn test_delimited_rejects_pipe_in_video_id() {
        let err = serialize("a|b", &[], Framing::Delimited).unwrap_err();
        assert!(matches!(err, KaraokeError::InvalidVideoId(_)));

        let marker_id = format!("{FRAMED_MARKER}id");
        assert!(serialize(&marker_id, &[], Framing::Delimited).is_err());
    }

    #[test]
    fn test_delimited_count_mismatch_is_malformed() {
        for canonical in ["v|0~1|only one", "v|0|one|two", "v||stray"] {
            let err = deserialize(canonical).unwrap_err();
            assert!(
                matches!(err, KaraokeError::Malformed(Corruption::CountMismatch { .. })),
                "{canonical:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_delimited_missing_fields() {
        assert!(deserialize("no separators").unwrap_err().is_malformed());
        assert!(deserialize("only|one").unwrap_err().is_malformed());
        assert!(deserialize("v|0~!|a|b").unwrap_err().is_malformed());
        assert!(deserialize("v|0~|a|b").unwrap_err().is_malformed());
    }

    #[test]
    fn test_framed_layout() {
        let canonical = serialize("abc123", &sample_lines(), Framing::LengthPrefixed).unwrap();
        assert_eq!(canonical, "\u{2}6:abc1232:0~Ju~5:World5:Hello");
    }

    #[test]
    fn test_framed_keeps_any_text() {
        let lines = vec![
            LyricLine::new("pipes | and ~ tildes", 0.0),
            LyricLine::new("look-alikes ¦ ～ stay", 1.0),
            LyricLine::new("7:colon\u{2}stx", 2.0),
            LyricLine::new("", 3.0),
            LyricLine::new("日本語の歌詞", 4.0),
        ];
        let canonical = serialize("id|with~stuff", &lines, Framing::LengthPrefixed).unwrap();
        let doc = deserialize(&canonical).unwrap();

        assert_eq!(doc.video_id, "id|with~stuff");
        assert_eq!(doc.lines, lines);
    }

    #[test]
    fn test_framed_empty_document() {
        let canonical = serialize("", &[], Framing::LengthPrefixed).unwrap();
        assert_eq!(canonical, "\u{2}0:0:");
        assert_eq!(deserialize(&canonical).unwrap(), KaraokeDocument::default());
    }

    #[test]
    fn test_framed_rejects_damage() {
        let good = serialize("abc123", &sample_lines(), Framing::LengthPrefixed).unwrap();

        let truncated = &good[..good.len() - 2];
        assert!(deserialize(truncated).unwrap_err().is_malformed());

        let trailing = format!("{good}x");
        assert!(matches!(
            deserialize(&trailing),
            Err(KaraokeError::Malformed(Corruption::TrailingBytes(1)))
        ));

        // Count claims far more lines than the body could hold.
        assert!(deserialize("\u{2}1:vzz:0~").unwrap_err().is_malformed());
        // Length splits a multi-byte character.
        assert!(deserialize("\u{2}1:é0:").unwrap_err().is_malformed());
    }

    #[test]
    fn test_delta_overflow_is_malformed() {
        let max = encode_varint(u64::MAX);
        let canonical = format!("v|{max}~1|a|b");
        assert!(matches!(
            deserialize(&canonical),
            Err(KaraokeError::Malformed(Corruption::Overflow))
        ));
    }

    #[test]
    fn test_both_framings_agree() {
        let lines = vec![
            LyricLine::new("third", 9.75),
            LyricLine::new("first", 0.25),
            LyricLine::new("second", 3.5),
        ];

        let delimited = deserialize(&serialize("v", &lines, Framing::Delimited).unwrap()).unwrap();
        let framed = deserialize(&serialize("v", &lines, Framing::LengthPrefixed).unwrap()).unwrap();
        assert_eq!(delimited, framed);

        let texts: Vec<&str> = framed.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }
}
