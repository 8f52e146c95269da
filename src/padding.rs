//! Padding for RSA encipherment.
//!
//! Main reference is RFC 8017 (PKCS #1 v2.2), RSAES-OAEP.
//! This acronym means: RSA Encryption Scheme, with Optimal Asymmetric Encryption Padding.
//!
//! The RFC allows a choice of "mask generating function", which we restrict to
//! MGF1 over the same hash as the label hash. The label may be set, and defaults
//! to the empty string.
//!
//! Encoded messages live in caller-provided buffers of exactly the modulus size $k$;
//! decoding happens in place and returns a subslice.

use digest::{Digest, generic_array::typenum::Unsigned};
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::sha::{with_digest, ShaType};
use crate::{Error, Result};

/// Mask Generating Function 1, XORed into `data`
pub fn xor_mgf1<H: Digest>(hasher: &mut H, seed: &[u8], data: &mut [u8]) {
    hasher.reset();
    let mut c: u32 = 0;
    let h_len = H::OutputSize::to_usize();
    // "If either iterator returns None, next from the zipped iterator will return None"
    // So in the inner zipped loop, if the chunk is undersized, all is good
    for chunk in data.chunks_mut(h_len) {
        hasher.update(seed);
        hasher.update(c.to_be_bytes().as_ref());
        for (byte_to_mask, masking_byte) in chunk.iter_mut().zip(hasher.finalize_reset().iter()) {
            *byte_to_mask ^= *masking_byte;
        }
        c = c.wrapping_add(1);
    }
}

/// [MGF1][mgf1]: fill `mask` with $\text{MGF1}(\text{seed}, |\text{mask}|)$.
///
/// [mgf1]: https://tools.ietf.org/html/rfc8017#appendix-B.2.1
pub fn mgf1(sha: ShaType, seed: &[u8], mask: &mut [u8]) -> Result<()> {
    // 1.
    if mask.len() as u64 > (1u64 << 32) * sha.hash_len() as u64 {
        return Err(Error::InvalidParam);
    }
    mask.fill(0);
    with_digest!(sha, H => xor_mgf1(&mut H::new(), seed, mask));
    Ok(())
}

/// Compare the recovered label hash against the expected one.
fn hash_matches(recovered: &[u8], expected: &[u8]) -> bool {
    #[cfg(not(feature = "ct-maybe"))]
    return recovered == expected;

    #[cfg(feature = "ct-maybe")]
    return {
        use subtle::ConstantTimeEq;
        bool::from(recovered.ct_eq(expected))
    };
}

/// ## Optimal Asymmetric Encryption Padding
///
/// data block DB = lHash || PS || 01 || M,
/// where padding string PS is k - mLen - 2 hLen - 2 zeros
///
/// then encoded message EM = 00 || maskedSeed || maskedDB,
/// where first the random seed (of length hLen) masks the DB,
/// and then the masked DB masks the seed
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Oaep<'l> {
    sha: ShaType,
    label: &'l [u8],
}

impl Oaep<'static> {
    /// OAEP with the empty label.
    pub const fn new(sha: ShaType) -> Self {
        Self { sha, label: &[] }
    }
}

impl<'l> Oaep<'l> {
    pub const fn with_label(sha: ShaType, label: &'l [u8]) -> Self {
        Self { sha, label }
    }

    /// Longest message that fits a block of `k` bytes (zero if none does).
    pub const fn max_message_len(&self, k: usize) -> usize {
        k.saturating_sub(2 * self.sha.hash_len() + 2)
    }

    /// [EME-OAEP encoding][encoding] of `msg` into all of `em`.
    ///
    /// [encoding]: https://tools.ietf.org/html/rfc8017#section-7.1.1
    pub fn encode<R: CryptoRng + RngCore>(&self, msg: &[u8], rng: &mut R, em: &mut [u8]) -> Result<()> {
        with_digest!(self.sha, H => self.encode_with::<H, R>(msg, rng, em))
    }

    fn encode_with<H: Digest, R: CryptoRng + RngCore>(&self, msg: &[u8], rng: &mut R, em: &mut [u8]) -> Result<()> {
        let k = em.len();
        let h_len = H::OutputSize::to_usize();

        // 1.b.
        if k < 2 * h_len + 2 || msg.len() > k - 2 * h_len - 2 {
            return Err(Error::OaepInvalidMsgLen);
        }

        let (first, rest) = em.split_at_mut(1);
        first[0] = 0;
        let (seed, data_block) = rest.split_at_mut(h_len);

        // 2.a.
        let mut hasher = H::new();
        hasher.update(self.label);
        data_block[..h_len].copy_from_slice(&hasher.finalize_reset());

        // 2.b. + 2.c.
        let separator = data_block.len() - msg.len() - 1;
        data_block[h_len..separator].fill(0);
        data_block[separator] = 0x01;
        data_block[separator + 1..].copy_from_slice(msg);

        // 2.d.
        if rng.try_fill_bytes(seed).is_err() {
            em.zeroize();
            return Err(Error::Rng);
        }

        // 2.e. + 2.f.
        xor_mgf1(&mut hasher, seed, data_block);

        // 2.g. + 2.h.
        xor_mgf1(&mut hasher, data_block, seed);

        Ok(())
    }

    /// [EME-OAEP decoding][decoding] of `em`, in place; returns the message.
    ///
    /// The buffer is left unmasked, the caller scrubs it.
    ///
    /// [decoding]: https://tools.ietf.org/html/rfc8017#section-7.1.2
    pub fn decode<'e>(&self, em: &'e mut [u8]) -> Result<&'e [u8]> {
        with_digest!(self.sha, H => self.decode_with::<H>(em))
    }

    fn decode_with<'e, H: Digest>(&self, em: &'e mut [u8]) -> Result<&'e [u8]> {
        let k = em.len();
        let h_len = H::OutputSize::to_usize();

        // 1.c.
        if k < 2 * h_len + 2 {
            return Err(Error::OaepInvalidMsgLen);
        }

        // 3.b.
        let (first, rest) = em.split_at_mut(1);
        if first[0] != 0 {
            return Err(Error::OaepByteMismatch);
        }
        let (seed, data_block) = rest.split_at_mut(h_len);

        // 3.c. + 3.d.
        let mut hasher = H::new();
        xor_mgf1(&mut hasher, data_block, seed);

        // 3.e. + 3.f.
        xor_mgf1(&mut hasher, seed, data_block);
        let data_block: &'e [u8] = data_block;

        // 3.a. + 3.g.
        hasher.update(self.label);
        let (label_hash, remainder) = data_block.split_at(h_len);
        if !hash_matches(label_hash, &hasher.finalize()) {
            return Err(Error::OaepDataCmp);
        }

        let ps_len = remainder.iter()
            .position(|&byte| byte != 0)
            .ok_or(Error::OaepDbMismatch)?;
        if remainder[ps_len] != 0x01 {
            return Err(Error::OaepDbMismatch);
        }

        let msg = &remainder[ps_len + 1..];
        if msg.len() > k - 2 * h_len - 2 {
            return Err(Error::OaepInvalidMsgLen);
        }
        Ok(msg)
    }
}
