//! Error types for the karaoke encoder.
//!
//! Every failure while reading a token collapses into [`KaraokeError::Malformed`]:
//! callers get one "corrupted or malformed" error no matter which stage broke.
//! The stage-specific [`Corruption`] is kept as the error source so it still
//! shows up in debug logs.

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, KaraokeError>;

/// Errors surfaced by encoding and decoding.
#[derive(Debug, Error)]
pub enum KaraokeError {
    /// The token could not be turned back into a document.
    #[error("invalid karaoke link - corrupted or malformed data")]
    Malformed(#[source] Corruption),

    /// A lyric line carries a time that cannot be stored as milliseconds.
    #[error("line {index} has invalid time {time}: expected finite, non-negative seconds")]
    InvalidTime { index: usize, time: f64 },

    /// The video id collides with the delimiters of the chosen framing.
    #[error("video id {0:?} cannot be stored in the delimited format")]
    InvalidVideoId(String),

    /// A share link that is neither a URL nor a bare path.
    #[error("invalid share link: {0}")]
    InvalidLink(#[from] url::ParseError),

    /// The compressor failed while writing. `Vec` sinks never fail, so this is
    /// effectively unreachable.
    #[error("compression failed: {0}")]
    Io(#[from] std::io::Error),
}

/// What exactly was wrong with a malformed token.
#[derive(Debug, Error)]
pub enum Corruption {
    #[error("token is not URL-safe base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload does not inflate: {0}")]
    Inflate(flate2::DecompressError),

    #[error("compressed stream ends early")]
    UnexpectedEnd,

    #[error("inflated payload exceeds {0} bytes")]
    TooLarge(usize),

    #[error("{0} bytes of trailing data after the compressed stream")]
    TrailingData(usize),

    #[error("payload is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("empty number")]
    EmptyVarint,

    #[error("invalid digit {0:?}")]
    InvalidDigit(char),

    #[error("number does not fit in 64 bits")]
    Overflow,

    #[error("missing separator")]
    MissingSeparator,

    #[error("field is shorter than its declared length")]
    Truncated,

    #[error("{timestamps} timestamps but {lines} lyric lines")]
    CountMismatch { timestamps: usize, lines: usize },

    #[error("{0} unexpected bytes after the last field")]
    TrailingBytes(usize),
}

impl From<Corruption> for KaraokeError {
    fn from(cause: Corruption) -> Self {
        KaraokeError::Malformed(cause)
    }
}

impl KaraokeError {
    /// True when the error came from reading a token rather than writing one.
    pub fn is_malformed(&self) -> bool {
        matches!(self, KaraokeError::Malformed(_))
    }
}
