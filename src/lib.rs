//! Karaoke share links: lyric transcripts packed into a single URL segment.
//!
//! A transcript (a video id plus `(text, time)` lines) is written as
//! canonical text, deflated, and base64-encoded with the URL-safe alphabet.
//! The resulting token needs no server-side storage: the link is the data.
//!
//! Core modules:
//! - [`document`] - Transcript types and time validation
//! - [`serializer`] - Canonical text, delimited and length-prefixed framings
//! - [`varint`] - Base-62 numbers for timestamp deltas
//! - [`compressor`] - zlib at maximum compression
//! - [`url_codec`] - URL-safe base64
//! - [`encoder`] - The encode/decode pipeline
//! - [`share`] - Share links, link parsing and size estimates
//!
//! ### Supporting Modules
//!
//! - [`lyrics`] - `text [m:ss]` lyric sheet export
//! - [`config`] - Origin and framing settings
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```
//! use karaoke_share::{decode, encode, share, LyricLine};
//!
//! let lines = vec![
//!     LyricLine::new("Hello", 1.234),
//!     LyricLine::new("World", 0.0),
//! ];
//!
//! let token = encode("abc123", &lines)?;
//! assert!(!token.contains(['+', '/', '=']));
//!
//! // Lines come back sorted by time.
//! let document = decode(&token)?;
//! assert_eq!(document.lines[0].text, "World");
//! assert_eq!(document.lines[1].time, 1.234);
//!
//! let url = share::build_share_link("https://example.com", "abc123", &lines)?;
//! let path = share::link_path(&url)?;
//! assert_eq!(share::extract_from_link(&path)?, Some(document));
//! # Ok::<(), karaoke_share::KaraokeError>(())
//! ```
//!
//! ## Time Precision
//!
//! Tokens store whole milliseconds. Times are rounded to the nearest
//! millisecond when encoded, so `decode(encode(x))` returns times that differ
//! from the input by at most half a millisecond.
//!
//! ## Error Handling
//!
//! Library functions return [`Result<T, KaraokeError>`](KaraokeError):
//!
//! - [`KaraokeError::Malformed`] for any token that cannot be read, whatever
//!   stage failed. Partial documents are never returned.
//! - [`KaraokeError::InvalidTime`] for negative, NaN or infinite times, caught
//!   before anything is encoded.
//! - [`KaraokeError::InvalidVideoId`] for video ids containing `|` when the
//!   delimited framing is used.
//! - [`KaraokeError::InvalidLink`] for share links that fail URL parsing.

pub mod cli;
pub mod completion;
pub mod compressor;
pub mod config;
pub mod document;
pub mod encoder;
pub mod error;
pub mod lyrics;
pub mod serializer;
pub mod share;
pub mod url_codec;
pub mod varint;

pub use document::{KaraokeDocument, LyricLine};
pub use encoder::{decode, encode, Encoder};
pub use error::{KaraokeError, Result};
pub use serializer::Framing;
