//! Key unwrap: RSA-OAEP protected ephemeral AES key, AES key wrap protected payload key.
//!
//! A wrapped blob is
//!
//! ```text
//! | RSA-OAEP(SHA-384) ciphertext of ephemeral key, k bytes | RFC 3394 block, 24 or 40 bytes |
//! ```
//!
//! where the RSA part is given as little-endian 32-bit words. The payload key
//! ends up in a free key-store slot, followed by the caller's metadata.

use crate::endian::wire_to_big_endian;
use crate::key::{PrivateKey, PublicKey};
use crate::keystore::{KeyStore, SlotAllocator, KEY_METADATA_SIZE};
use crate::keywrap::{AesKeyUnwrap, Rfc3394, SEMIBLOCK};
use crate::padding::Oaep;
use crate::sha::ShaType;
use crate::{scrub, Error, Result, MAX_MODULUS_BYTES};

/// Wrapped AES-256 key.
pub const WRAPPED_AES_256_SIZE: usize = 32 + SEMIBLOCK;
/// Wrapped AES-128 key.
pub const WRAPPED_AES_128_SIZE: usize = 16 + SEMIBLOCK;

/// Input to [`KeyUnwrapper::unwrap`].
#[derive(Copy, Clone, Debug)]
pub struct KeyWrapData<'a> {
    pub wrapped_key: &'a [u8],
    pub metadata: &'a [u8; KEY_METADATA_SIZE],
}

/// The unwrap engine.
///
/// Owns the scratch buffers for the ephemeral key and the wrapped payload
/// key; both are cleared before [`unwrap`](Self::unwrap) returns. The
/// ephemeral key buffer takes any message OAEP can carry, so that its length
/// is checked after decoding.
pub struct KeyUnwrapper<A: AesKeyUnwrap = Rfc3394> {
    aes: A,
    ephemeral_key: [u8; MAX_MODULUS_BYTES],
    wrapped_aes_key: [u8; WRAPPED_AES_256_SIZE],
}

impl Default for KeyUnwrapper<Rfc3394> {
    fn default() -> Self {
        Self::new(Rfc3394)
    }
}

impl<A: AesKeyUnwrap> KeyUnwrapper<A> {
    pub fn new(aes: A) -> Self {
        Self {
            aes,
            ephemeral_key: [0; MAX_MODULUS_BYTES],
            wrapped_aes_key: [0; WRAPPED_AES_256_SIZE],
        }
    }

    /// Both scratch buffers hold only zeros.
    pub fn scratch_is_clear(&self) -> bool {
        self.ephemeral_key.iter().chain(self.wrapped_aes_key.iter()).all(|&byte| byte == 0)
    }

    /// Unwrap a payload key into a free slot of `store`; returns the slot index.
    ///
    /// The slot is marked occupied only if every step succeeded.
    pub fn unwrap<const L: usize, const H: usize>(
        &mut self,
        key: &PrivateKey<L, H>,
        data: &KeyWrapData<'_>,
        store: &mut KeyStore<'_>,
        allocator: &mut SlotAllocator,
    ) -> Result<usize> {
        let result = self.unwrap_into_slot(key, data, store, allocator);
        if let Err(error) = result {
            warn!("key unwrap failed: {:?}", error);
        }

        let cleanup = scrub::aggregate(
            scrub::secure_zeroize(&mut self.ephemeral_key),
            scrub::secure_zeroize(&mut self.wrapped_aes_key),
        );
        scrub::aggregate(result, cleanup)
    }

    fn unwrap_into_slot<const L: usize, const H: usize>(
        &mut self,
        key: &PrivateKey<L, H>,
        data: &KeyWrapData<'_>,
        store: &mut KeyStore<'_>,
        allocator: &mut SlotAllocator,
    ) -> Result<usize> {
        let modulus_size = PublicKey::<L>::BYTES;
        let total = data.wrapped_key.len();

        // 1.
        if total == 0 || modulus_size > MAX_MODULUS_BYTES {
            return Err(Error::InvalidParam);
        }
        if total <= modulus_size {
            return Err(Error::KeyWrapSizeMismatch);
        }

        // 2.
        let (rsa_part, aes_part) = data.wrapped_key.split_at(modulus_size);
        let wrapped_len = aes_part.len();
        if wrapped_len != WRAPPED_AES_256_SIZE && wrapped_len != WRAPPED_AES_128_SIZE {
            return Err(Error::AesKeySizeNotSupported);
        }

        // 3.
        let slot = allocator.find_free(store)?;

        // 4. + 5.
        let mut ciphertext = [0u8; MAX_MODULUS_BYTES];
        wire_to_big_endian(rsa_part, &mut ciphertext[..modulus_size])?;
        let oaep = Oaep::new(ShaType::Sha384);
        let ephemeral_len = key.decrypt(&oaep, &ciphertext[..modulus_size], &mut self.ephemeral_key)?;
        if ephemeral_len != 16 && ephemeral_len != 32 {
            return Err(Error::AesKeySizeNotSupported);
        }

        // 6.
        self.wrapped_aes_key[..wrapped_len].copy_from_slice(aes_part);

        // 7.
        let key_len = wrapped_len - SEMIBLOCK;
        let key_space = store.key_space_mut(slot)?;
        let unwrapped = self.aes.unwrap_key(
            &self.ephemeral_key[..ephemeral_len],
            &self.wrapped_aes_key[..wrapped_len],
            &mut key_space[..key_len],
        );
        if let Err(error) = unwrapped {
            return scrub::aggregate(Err(error), scrub::secure_zeroize(key_space));
        }

        // 8.
        key_space[key_len..][..KEY_METADATA_SIZE].copy_from_slice(data.metadata);
        store.set_key_len(slot, key_len)?;

        // 9.
        allocator.mark_occupied(store, slot)?;
        info!("unwrapped {} byte key into slot {}", key_len, slot);
        Ok(slot)
    }
}
