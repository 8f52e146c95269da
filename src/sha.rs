//! Hash algorithm selected at run time.
//!
//! The OAEP and MGF1 code is generic over [`Digest`]; callers that only know
//! the algorithm as a value go through [`ShaType`], and `with_digest!` turns
//! the value back into a type.

use digest::Digest;

use crate::{Error, Result};

/// Largest digest output, in bytes.
pub const MAX_HASH_LEN: usize = 64;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ShaType {
    Sha256,
    Sha384,
    Sha512,
}

/// Run `$body` with `$H` bound to the `sha2` type of `$sha`.
macro_rules! with_digest {
    ($sha:expr, $H:ident => $body:expr) => {
        match $sha {
            $crate::sha::ShaType::Sha256 => { type $H = sha2::Sha256; $body }
            $crate::sha::ShaType::Sha384 => { type $H = sha2::Sha384; $body }
            $crate::sha::ShaType::Sha512 => { type $H = sha2::Sha512; $body }
        }
    };
}
pub(crate) use with_digest;

impl ShaType {
    pub const fn hash_len(self) -> usize {
        match self {
            ShaType::Sha256 => 32,
            ShaType::Sha384 => 48,
            ShaType::Sha512 => 64,
        }
    }

    /// Hash the concatenation of `chunks` into the front of `out`, returning the digest length.
    pub fn digest(self, chunks: &[&[u8]], out: &mut [u8]) -> Result<usize> {
        let len = self.hash_len();
        if out.len() < len {
            return Err(Error::InvalidParam);
        }
        with_digest!(self, H => {
            let mut hasher = H::new();
            for chunk in chunks {
                hasher.update(chunk);
            }
            out[..len].copy_from_slice(&hasher.finalize());
        });
        Ok(len)
    }
}
