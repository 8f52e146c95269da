//! AES key wrap, [RFC 3394][rfc3394].
//!
//! The unwrap engine only needs the unwrapping direction, behind the
//! [`AesKeyUnwrap`] trait so that a hardware implementation can stand in.
//! Wrapping is provided for provisioning and tests.
//!
//! [rfc3394]: https://tools.ietf.org/html/rfc3394

use aes::cipher::{
    consts::U16, generic_array::GenericArray, BlockDecrypt, BlockEncrypt, BlockSizeUser, KeyInit,
};
use aes::{Aes128, Aes256};
use zeroize::Zeroize;

use crate::{Error, Result};

/// RFC 3394 works on 64-bit semiblocks.
pub const SEMIBLOCK: usize = 8;

const DEFAULT_IV: [u8; SEMIBLOCK] = [0xA6; SEMIBLOCK];

/// Unwrap an AES-wrapped key.
pub trait AesKeyUnwrap {
    /// Unwrap `wrapped` under `kek` into `out`, which is one semiblock shorter.
    ///
    /// On integrity failure, `out` is zeroized and [`Error::AesUnwrap`] returned.
    fn unwrap_key(&self, kek: &[u8], wrapped: &[u8], out: &mut [u8]) -> Result<()>;
}

/// Software RFC 3394 with the default initial value, AES-128 or AES-256 key-encryption keys.
#[derive(Copy, Clone, Debug, Default)]
pub struct Rfc3394;

fn check_lengths(wrapped_len: usize, key_len: usize) -> Result<()> {
    if key_len < 2 * SEMIBLOCK || key_len % SEMIBLOCK != 0 || wrapped_len != key_len + SEMIBLOCK {
        return Err(Error::InvalidParam);
    }
    Ok(())
}

/// $t$ is XORed into the integrity register big-endian.
fn xor_counter(a: &mut [u8; SEMIBLOCK], t: u64) {
    *a = (u64::from_be_bytes(*a) ^ t).to_be_bytes();
}

fn iv_matches(a: &[u8; SEMIBLOCK]) -> bool {
    #[cfg(not(feature = "ct-maybe"))]
    return *a == DEFAULT_IV;

    #[cfg(feature = "ct-maybe")]
    return {
        use subtle::ConstantTimeEq;
        bool::from(a.ct_eq(&DEFAULT_IV))
    };
}

fn wrap_with<C>(cipher: &C, key: &[u8], out: &mut [u8])
where
    C: BlockEncrypt + BlockSizeUser<BlockSize = U16>,
{
    let n = key.len() / SEMIBLOCK;
    let mut a = DEFAULT_IV;
    let r = &mut out[SEMIBLOCK..];
    r.copy_from_slice(key);

    let mut b = [0u8; 2 * SEMIBLOCK];
    for j in 0..6u64 {
        for (i, ri) in r.chunks_exact_mut(SEMIBLOCK).enumerate() {
            b[..SEMIBLOCK].copy_from_slice(&a);
            b[SEMIBLOCK..].copy_from_slice(ri);
            cipher.encrypt_block(GenericArray::from_mut_slice(&mut b));

            a.copy_from_slice(&b[..SEMIBLOCK]);
            xor_counter(&mut a, (n as u64) * j + (i as u64) + 1);
            ri.copy_from_slice(&b[SEMIBLOCK..]);
        }
    }
    b.zeroize();
    out[..SEMIBLOCK].copy_from_slice(&a);
}

fn unwrap_with<C>(cipher: &C, wrapped: &[u8], out: &mut [u8]) -> Result<()>
where
    C: BlockDecrypt + BlockSizeUser<BlockSize = U16>,
{
    let n = out.len() / SEMIBLOCK;
    let mut a = [0u8; SEMIBLOCK];
    a.copy_from_slice(&wrapped[..SEMIBLOCK]);
    out.copy_from_slice(&wrapped[SEMIBLOCK..]);

    let mut b = [0u8; 2 * SEMIBLOCK];
    for j in (0..6u64).rev() {
        for i in (0..n).rev() {
            let ri = &mut out[i * SEMIBLOCK..][..SEMIBLOCK];
            xor_counter(&mut a, (n as u64) * j + (i as u64) + 1);
            b[..SEMIBLOCK].copy_from_slice(&a);
            b[SEMIBLOCK..].copy_from_slice(ri);
            cipher.decrypt_block(GenericArray::from_mut_slice(&mut b));

            a.copy_from_slice(&b[..SEMIBLOCK]);
            ri.copy_from_slice(&b[SEMIBLOCK..]);
        }
    }
    b.zeroize();

    let intact = iv_matches(&a);
    a.zeroize();
    if !intact {
        out.zeroize();
        return Err(Error::AesUnwrap);
    }
    Ok(())
}

impl Rfc3394 {
    /// Wrap `key` (at least two semiblocks) under `kek` into `out`, one semiblock longer.
    pub fn wrap_key(&self, kek: &[u8], key: &[u8], out: &mut [u8]) -> Result<()> {
        check_lengths(out.len(), key.len())?;
        match kek.len() {
            16 => wrap_with(&Aes128::new(GenericArray::from_slice(kek)), key, out),
            32 => wrap_with(&Aes256::new(GenericArray::from_slice(kek)), key, out),
            _ => return Err(Error::AesKeySizeNotSupported),
        }
        Ok(())
    }
}

impl AesKeyUnwrap for Rfc3394 {
    fn unwrap_key(&self, kek: &[u8], wrapped: &[u8], out: &mut [u8]) -> Result<()> {
        check_lengths(wrapped.len(), out.len())?;
        match kek.len() {
            16 => unwrap_with(&Aes128::new(GenericArray::from_slice(kek)), wrapped, out),
            32 => unwrap_with(&Aes256::new(GenericArray::from_slice(kek)), wrapped, out),
            _ => Err(Error::AesKeySizeNotSupported),
        }
    }
}
