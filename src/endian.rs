//! Byte order at the boundary between the wire format and RFC 8017.
//!
//! Wrapped-key blobs arrive as sequences of little-endian 32-bit words, least
//! significant word first. The RSA code expects octet strings in big-endian
//! order. Reversing the words and the bytes within each word amounts to
//! reversing the whole buffer.

use crate::numbers::DIGIT_BYTES;
use crate::{Error, Result};

fn check_lengths(src: &[u8], dst: &[u8]) -> Result<()> {
    if src.len() != dst.len() || src.len() % DIGIT_BYTES != 0 {
        return Err(Error::InvalidParam);
    }
    Ok(())
}

/// Little-endian word sequence to big-endian octet string.
pub fn wire_to_big_endian(src: &[u8], dst: &mut [u8]) -> Result<()> {
    check_lengths(src, dst)?;
    for (dst_word, src_word) in dst.chunks_exact_mut(DIGIT_BYTES).zip(src.chunks_exact(DIGIT_BYTES).rev()) {
        for (d, s) in dst_word.iter_mut().zip(src_word.iter().rev()) {
            *d = *s;
        }
    }
    Ok(())
}

/// Big-endian octet string to little-endian word sequence; inverse of [`wire_to_big_endian`].
pub fn big_endian_to_wire(src: &[u8], dst: &mut [u8]) -> Result<()> {
    // the conversion is an involution
    wire_to_big_endian(src, dst)
}
