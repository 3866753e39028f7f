//! URL-safe base64: `-` and `_` instead of `+` and `/`, no `=` padding.
//!
//! The output can be used as a single path segment without percent-encoding.

use crate::error::{Corruption, Result};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

/// Writes unpadded; reads padded or unpadded input.
const URL_SAFE_TOKEN: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub fn to_url_safe(bytes: &[u8]) -> String {
    URL_SAFE_TOKEN.encode(bytes)
}

pub fn from_url_safe(text: &str) -> Result<Vec<u8>> {
    URL_SAFE_TOKEN
        .decode(text)
        .map_err(|e| Corruption::Base64(e).into())
}
