//! Token encoding and decoding.
//!
//! ```text
//! encode: lines -> canonical text -> UTF-8 -> zlib -> URL-safe base64
//! decode: URL-safe base64 -> inflate -> UTF-8 -> canonical text -> document
//! ```

use crate::compressor;
use crate::document::{KaraokeDocument, LyricLine};
use crate::error::{Corruption, Result};
use crate::serializer::{self, Framing};
use crate::url_codec;
use log::debug;

/// Turns lyric transcripts into tokens in a fixed [`Framing`].
///
/// Decoding needs no configuration; any framing is recognised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Encoder {
    framing: Framing,
}

impl Encoder {
    pub fn new(framing: Framing) -> Self {
        Self { framing }
    }

    pub fn framing(&self) -> Framing {
        self.framing
    }

    /// Encode `video_id` and `lines` into a URL-safe token.
    ///
    /// Lines are sorted by time first, so the token does not depend on the
    /// order of `lines`.
    pub fn encode(&self, video_id: &str, lines: &[LyricLine]) -> Result<String> {
        let canonical = serializer::serialize(video_id, lines, self.framing)?;
        let compressed = compressor::compress(canonical.as_bytes())?;
        let token = url_codec::to_url_safe(&compressed);

        debug!(
            "Encoded {} lines for video {video_id}: {} canonical bytes, {} token chars",
            lines.len(),
            canonical.len(),
            token.len()
        );
        Ok(token)
    }

    pub fn encode_document(&self, document: &KaraokeDocument) -> Result<String> {
        self.encode(&document.video_id, &document.lines)
    }
}

/// Encode with the default (length-prefixed) framing.
///
/// ```
/// use karaoke_share::{decode, encode, LyricLine};
///
/// let token = encode("abc123", &[LyricLine::new("Hello", 1.5)])?;
/// let document = decode(&token)?;
/// assert_eq!(document.video_id, "abc123");
/// assert_eq!(document.lines[0].time, 1.5);
/// # Ok::<(), karaoke_share::KaraokeError>(())
/// ```
pub fn encode(video_id: &str, lines: &[LyricLine]) -> Result<String> {
    Encoder::default().encode(video_id, lines)
}

/// Decode a token produced by [`encode`], an [`Encoder`] or the web player.
///
/// Any failure along the way is reported as
/// [`KaraokeError::Malformed`](crate::KaraokeError::Malformed).
pub fn decode(token: &str) -> Result<KaraokeDocument> {
    decode_stages(token).inspect_err(|e| {
        let cause = std::error::Error::source(e).map(ToString::to_string);
        debug!("Rejected token ({} chars): {}", token.len(), cause.unwrap_or_else(|| e.to_string()));
    })
}

fn decode_stages(token: &str) -> Result<KaraokeDocument> {
    let compressed = url_codec::from_url_safe(token)?;
    let inflated = compressor::decompress(&compressed)?;
    let canonical = String::from_utf8(inflated).map_err(Corruption::from)?;
    let document = serializer::deserialize(&canonical)?;

    debug!(
        "Decoded token for video {}: {} lines",
        document.video_id,
        document.lines.len()
    );
    Ok(document)
}
