//! Zeroization that can be checked.
//!
//! `zeroize` guarantees the writes are not optimized away; reading the buffer
//! back afterwards lets a fault (glitched write, aliasing bug) surface as an
//! error instead of silently leaving key material behind.

use zeroize::Zeroize;

use crate::{Error, Result};

/// Zeroize `buffer`, then verify every byte reads back as zero.
pub fn secure_zeroize(buffer: &mut [u8]) -> Result<()> {
    buffer.zeroize();
    if buffer.iter().all(|&byte| byte == 0) {
        Ok(())
    } else {
        Err(Error::ZeroizationFailed)
    }
}

/// Fold a cleanup result into the result of the operation it cleaned up after.
///
/// A real failure is never masked, a clean success is escalated if the
/// cleanup failed.
pub fn aggregate<T>(result: Result<T>, cleanup: Result<()>) -> Result<T> {
    match (result, cleanup) {
        (Err(error), _) => Err(error),
        (Ok(_), Err(error)) => Err(error),
        (Ok(value), Ok(())) => Ok(value),
    }
}
