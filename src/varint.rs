//! Base-62 digit strings for timestamp deltas and field lengths.
//!
//! Digits are `0-9`, then `A-Z`, then `a-z` (values 0 through 61), most
//! significant first. Zero is written as `"0"`, never as an empty string.

use crate::error::Corruption;

/// The 62 digit symbols, indexed by value.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

const RADIX: u64 = 62;

/// Render `value` in base 62.
///
/// ```
/// use karaoke_share::varint::encode_varint;
///
/// assert_eq!(encode_varint(0), "0");
/// assert_eq!(encode_varint(61), "z");
/// assert_eq!(encode_varint(62), "10");
/// ```
#[must_use]
pub fn encode_varint(value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::with_capacity(11);
    let mut rest = value;
    while rest > 0 {
        digits.push(ALPHABET[(rest % RADIX) as usize]);
        rest /= RADIX;
    }

    digits.iter().rev().map(|&b| char::from(b)).collect()
}

/// Parse a base-62 digit string produced by [`encode_varint`].
///
/// Rejects the empty string, symbols outside [`ALPHABET`] and values that
/// overflow `u64`.
pub fn decode_varint(digits: &str) -> Result<u64, Corruption> {
    if digits.is_empty() {
        return Err(Corruption::EmptyVarint);
    }

    digits.chars().try_fold(0u64, |acc, c| {
        let digit = digit_value(c).ok_or(Corruption::InvalidDigit(c))?;
        acc.checked_mul(RADIX)
            .and_then(|shifted| shifted.checked_add(digit))
            .ok_or(Corruption::Overflow)
    })
}

fn digit_value(c: char) -> Option<u64> {
    let value = match c {
        '0'..='9' => c as u32 - '0' as u32,
        'A'..='Z' => c as u32 - 'A' as u32 + 10,
        'a'..='z' => c as u32 - 'a' as u32 + 36,
        _ => return None,
    };
    Some(u64::from(value))
}
