//! Share links of the form `<origin>/karaoke/<token>`.
//!
//! The origin is always passed in; nothing here looks at process state.

use crate::document::{KaraokeDocument, LyricLine};
use crate::encoder::{decode, Encoder};
use crate::error::Result;
use log::debug;
use serde::Serialize;
use url::{ParseError, Url};

/// Path prefix that marks a karaoke link.
pub const SHARE_PATH_PREFIX: &str = "/karaoke/";

/// Size statistics for a would-be share link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeEstimate {
    pub token_length: usize,
    /// Bytes the token decodes to, `ceil(token_length * 3 / 4)`.
    pub approximate_byte_size: usize,
    pub full_url: String,
    pub full_url_length: usize,
}

/// Join an origin and a token into a share URL.
pub fn share_url(origin: &str, token: &str) -> String {
    format!("{}{SHARE_PATH_PREFIX}{token}", origin.trim_end_matches('/'))
}

/// Build a share link with the default encoder.
///
/// ```
/// use karaoke_share::{share::build_share_link, LyricLine};
///
/// let url = build_share_link("https://example.com", "abc123", &[LyricLine::new("Hi", 0.0)])?;
/// assert!(url.starts_with("https://example.com/karaoke/"));
/// # Ok::<(), karaoke_share::KaraokeError>(())
/// ```
pub fn build_share_link(origin: &str, video_id: &str, lines: &[LyricLine]) -> Result<String> {
    build_share_link_with(&Encoder::default(), origin, video_id, lines)
}

pub fn build_share_link_with(
    encoder: &Encoder,
    origin: &str,
    video_id: &str,
    lines: &[LyricLine],
) -> Result<String> {
    let token = encoder.encode(video_id, lines)?;
    Ok(share_url(origin, &token))
}

/// The token carried by a karaoke path, if any.
pub fn token_from_path(path: &str) -> Option<&str> {
    path.strip_prefix(SHARE_PATH_PREFIX)
        .filter(|token| !token.is_empty())
}

/// Decode the document carried by a navigation path.
///
/// Paths outside `/karaoke/` give `Ok(None)`; a karaoke path with a bad
/// token is an error.
pub fn extract_from_link(path: &str) -> Result<Option<KaraokeDocument>> {
    match token_from_path(path) {
        Some(token) => decode(token).map(Some),
        None => {
            debug!("Path {path:?} carries no karaoke data");
            Ok(None)
        }
    }
}

/// Reduce a share link to its path.
///
/// Links with a scheme go through the URL parser. Anything else is taken to
/// already be a path, so a URL inside its query string is left alone. Query
/// strings and fragments are dropped either way.
///
/// ```
/// use karaoke_share::share::link_path;
///
/// assert_eq!(link_path("https://example.com/karaoke/abc?x=1#top")?, "/karaoke/abc");
/// assert_eq!(link_path("/karaoke/abc?ref=https://b.io/x")?, "/karaoke/abc");
/// # Ok::<(), karaoke_share::KaraokeError>(())
/// ```
pub fn link_path(link: &str) -> Result<String> {
    match Url::parse(link) {
        Ok(url) => Ok(url.path().to_string()),
        Err(ParseError::RelativeUrlWithoutBase) => {
            let end = link.find(['?', '#']).unwrap_or(link.len());
            Ok(link[..end].to_string())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn estimate_encoded_size(origin: &str, video_id: &str, lines: &[LyricLine]) -> Result<SizeEstimate> {
    estimate_encoded_size_with(&Encoder::default(), origin, video_id, lines)
}

/// Encode once and report how big the token and link come out.
pub fn estimate_encoded_size_with(
    encoder: &Encoder,
    origin: &str,
    video_id: &str,
    lines: &[LyricLine],
) -> Result<SizeEstimate> {
    let token = encoder.encode(video_id, lines)?;
    let full_url = share_url(origin, &token);

    Ok(SizeEstimate {
        token_length: token.len(),
        approximate_byte_size: (token.len() * 3).div_ceil(4),
        full_url_length: full_url.len(),
        full_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KaraokeError;
    use crate::serializer::Framing;

    fn lines() -> Vec<LyricLine> {
        vec![
            LyricLine::new("first", 0.5),
            LyricLine::new("second", 2.0),
        ]
    }

    #[test]
    fn test_share_url_trims_origin_slash() {
        assert_eq!(share_url("https://a.io/", "tok"), "https://a.io/karaoke/tok");
        assert_eq!(share_url("https://a.io", "tok"), "https://a.io/karaoke/tok");
    }

    #[test]
    fn test_link_round_trip() {
        let url = build_share_link("https://a.io", "vid", &lines()).unwrap();
        let path = link_path(&url).unwrap();
        let doc = extract_from_link(&path).unwrap().expect("karaoke link");

        assert_eq!(doc.video_id, "vid");
        assert_eq!(doc.lines, lines());
    }

    #[test]
    fn test_non_karaoke_paths() {
        for path in ["/", "/other/path", "/karaoke", "/karaoke/", "karaoke/abc", "/x/karaoke/abc"] {
            assert!(token_from_path(path).is_none(), "{path:?}");
            assert_eq!(extract_from_link(path).unwrap(), None);
        }
    }

    #[test]
    fn test_bad_token_in_karaoke_path_is_error() {
        let err = extract_from_link("/karaoke/not-a-valid-token!!").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_link_path_variants() {
        assert_eq!(link_path("http://localhost:3000").unwrap(), "/");
        assert_eq!(link_path("http://localhost:3000/karaoke/t").unwrap(), "/karaoke/t");
        assert_eq!(link_path("/karaoke/t#frag").unwrap(), "/karaoke/t");
        assert_eq!(link_path("https://a.io/karaoke/t?ref=https://b.io/x").unwrap(), "/karaoke/t");
    }

    #[test]
    fn test_bare_path_with_url_in_query() {
        let url = build_share_link("https://a.io", "vid", &lines()).unwrap();
        let token = url.rsplit('/').next().unwrap();
        let link = format!("/karaoke/{token}?ref=https://b.io/elsewhere");

        let path = link_path(&link).unwrap();
        assert_eq!(path, format!("/karaoke/{token}"));
        let doc = extract_from_link(&path).unwrap().expect("karaoke link");
        assert_eq!(doc.video_id, "vid");
    }

    #[test]
    fn test_unparseable_link_is_error() {
        let err = link_path("https://[::1/karaoke/t").unwrap_err();
        assert!(matches!(err, KaraokeError::InvalidLink(_)));
    }

    #[test]
    fn test_estimate_is_consistent() {
        let encoder = Encoder::new(Framing::Delimited);
        let estimate = estimate_encoded_size_with(&encoder, "https://a.io", "vid", &lines()).unwrap();
        let token = encoder.encode("vid", &lines()).unwrap();

        assert_eq!(estimate.token_length, token.len());
        assert_eq!(estimate.approximate_byte_size, (token.len() * 3 + 3) / 4);
        assert_eq!(estimate.full_url, format!("https://a.io/karaoke/{token}"));
        assert_eq!(estimate.full_url_length, estimate.full_url.len());
    }

    #[test]
    fn test_estimate_rejects_invalid_lines() {
        let bad = vec![LyricLine::new("x", f64::NAN)];
        assert!(estimate_encoded_size("https://a.io", "vid", &bad).is_err());
    }
}
