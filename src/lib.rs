#![cfg_attr(not(test), no_std)]
//! RSA-OAEP key unwrapping into a key store, with background keypair generation.
//!
//! A wrapped key blob carries an ephemeral AES key, RSA-OAEP (SHA-384)
//! encrypted to one of our keypairs, followed by the payload key, AES key
//! wrapped (RFC 3394) under the ephemeral key. [`KeyUnwrapper`] recovers the
//! payload key into a free slot of a [`KeyStore`]. The keypairs come from a
//! [`KeyGenerator`], which a cooperative scheduler polls.
//!
//! Everything is `no_std` and allocation free, keys are const generic in
//! their size: see [`Rsa2k`], [`Rsa3k`], [`Rsa4k`].

#[macro_use]
extern crate delog;
generate_macros!();

mod arithmetic;
pub use arithmetic::Montgomery;
mod endian;
pub use endian::{big_endian_to_wire, wire_to_big_endian};
mod error;
pub use error::{status, Error, Result};
mod f4;
pub use f4::F4;
mod key;
pub use key::{PrivateKey, PublicKey, Rsa, Rsa2k, Rsa3k, Rsa4k};
mod keygen;
pub use keygen::{
    quantization, KeyGenState, KeyGenerator, KeyStatus, Scheduler, TaskId, KEYGEN_POLL_INTERVAL_MS,
    KEYGEN_TASK, POOL_SIZE,
};
mod keystore;
pub use keystore::{
    region_size, KeyStore, SlotAllocator, KEY_METADATA_SIZE, MAX_KEY_SIZE, MAX_KEY_SLOTS, STATUS_FULL,
    STATUS_FREE,
};
mod keywrap;
pub use keywrap::{AesKeyUnwrap, Rfc3394};
mod numbers;
pub use numbers::{Bits, Digit, Unsigned};
mod padding;
pub use padding::{mgf1, Oaep};
mod prime;
pub use prime::PrimeSearch;
mod primitive;
pub use primitive::{rsa_exp, rsa_exp_crt};
mod scrub;
pub use scrub::secure_zeroize;
mod sha;
pub use sha::{ShaType, MAX_HASH_LEN};
mod unwrap;
pub use unwrap::{KeyUnwrapper, KeyWrapData, WRAPPED_AES_128_SIZE, WRAPPED_AES_256_SIZE};

#[cfg(test)]
mod fixtures;

/// This library only implements RSA keys with public exponent `e = 65537`.
///
/// An example recommendation is RFC 4871:
/// https://www.ietf.org/rfc/rfc4871.txt
pub const E: u32 = 0x10001;

/// Modulus size in bytes of the keypairs the unwrap engine is built for.
pub const RSA_MODULUS_SIZE: usize = <Rsa3k as Rsa>::MODULUS_BYTES;

/// Largest supported modulus, in bytes; sizes the stack buffers.
pub const MAX_MODULUS_BYTES: usize = <Rsa4k as Rsa>::MODULUS_BYTES;
