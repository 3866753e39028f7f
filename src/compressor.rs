//! zlib-wrapped DEFLATE at maximum compression.
//!
//! The settings here are part of the link format: the web player inflates
//! what this writes and vice versa, so level and container must not change
//! once links are in circulation.

use crate::error::{Corruption, Result};
use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};
use log::trace;
use std::io::Write;

/// Upper bound on inflated payload size. Real transcripts are a few KiB.
pub const MAX_INFLATED_BYTES: usize = 4 * 1024 * 1024;

/// Deflate `bytes` at the highest level (32 KiB window, default strategy).
pub fn compress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(bytes.len() / 2 + 16), Compression::best());
    encoder.write_all(bytes)?;
    let compressed = encoder.finish()?;

    trace!("Compressed {} bytes to {}", bytes.len(), compressed.len());
    Ok(compressed)
}

/// Inflate a zlib stream produced by [`compress`] (or by `pako.deflate`).
///
/// Fails on corrupt or truncated streams, on output larger than
/// [`MAX_INFLATED_BYTES`] and on bytes left over after the stream ends.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut inflated = Vec::with_capacity(bytes.len().saturating_mul(4).clamp(64, MAX_INFLATED_BYTES));

    loop {
        let consumed = inflater.total_in() as usize;
        let status = inflater
            .decompress_vec(&bytes[consumed..], &mut inflated, FlushDecompress::None)
            .map_err(Corruption::Inflate)?;

        if inflated.len() > MAX_INFLATED_BYTES {
            return Err(Corruption::TooLarge(MAX_INFLATED_BYTES).into());
        }
        match status {
            Status::StreamEnd => break,
            // Room left in the buffer but no end of stream: input ran out.
            _ if inflated.len() < inflated.capacity() => {
                return Err(Corruption::UnexpectedEnd.into());
            }
            _ => grow(&mut inflated),
        }
    }

    let leftover = bytes.len() - inflater.total_in() as usize;
    if leftover > 0 {
        return Err(Corruption::TrailingData(leftover).into());
    }

    trace!("Inflated {} bytes to {}", bytes.len(), inflated.len());
    Ok(inflated)
}

/// Double a full buffer, but never past one byte over the cap, so an
/// oversized stream is caught without allocating beyond it.
fn grow(buf: &mut Vec<u8>) {
    let room = buf.capacity().min(MAX_INFLATED_BYTES + 1 - buf.len());
    buf.reserve_exact(room);
}
