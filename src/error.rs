/// Everything that can go wrong, as distinct status codes.
///
/// Nothing here carries data: callers only ever learn *which* check failed,
/// never anything about the secret involved.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Empty input, wrong buffer length, malformed key material.
    InvalidParam,
    /// Wrapped blob is not longer than the RSA modulus.
    KeyWrapSizeMismatch,
    /// Neither an AES-128 nor an AES-256 key (wrapped or ephemeral).
    AesKeySizeNotSupported,
    /// Every key-store slot is occupied.
    NoFreeKeySlot,
    /// Key-store capacity is zero, above the maximum, or larger than the region.
    KeyStoreSize,
    /// Message does not fit the OAEP block, or decoded to an impossible length.
    OaepInvalidMsgLen,
    /// Leading byte of the encoded message is not zero.
    OaepByteMismatch,
    /// Label hash in the data block does not match.
    OaepDataCmp,
    /// No 0x01 separator after the zero padding.
    OaepDbMismatch,
    /// Integer representative not smaller than the modulus.
    OutOfRange,
    /// Exponentiation engine failure, including a failed fault check.
    RsaOperation,
    /// Generated keypair did not survive the encrypt/decrypt round trip.
    PairwiseConsistency,
    /// Prime search ran out of candidates, or found primes too close together.
    KeyGeneration,
    /// AES key unwrap integrity check failed.
    AesUnwrap,
    /// Random number generator failure.
    Rng,
    /// A buffer could not be verified as cleared.
    ZeroizationFailed,
    /// No generated keypair is available.
    NoKeyAvailable,
    /// Periodic task could not be (de)registered.
    Scheduler,
}

impl Error {
    /// Plain integer status code, as reported across the firmware boundary.
    ///
    /// Zero is reserved for success.
    pub const fn code(self) -> u32 {
        match self {
            Error::InvalidParam => 0x01,
            Error::KeyWrapSizeMismatch => 0x02,
            Error::AesKeySizeNotSupported => 0x03,
            Error::NoFreeKeySlot => 0x04,
            Error::KeyStoreSize => 0x05,
            Error::OaepInvalidMsgLen => 0x10,
            Error::OaepByteMismatch => 0x11,
            Error::OaepDataCmp => 0x12,
            Error::OaepDbMismatch => 0x13,
            Error::OutOfRange => 0x20,
            Error::RsaOperation => 0x21,
            Error::PairwiseConsistency => 0x22,
            Error::KeyGeneration => 0x23,
            Error::AesUnwrap => 0x30,
            Error::Rng => 0x40,
            Error::ZeroizationFailed => 0x50,
            Error::NoKeyAvailable => 0x60,
            Error::Scheduler => 0x61,
        }
    }
}

/// [`Error`] or success.
pub type Result<T> = core::result::Result<T, Error>;

/// Status code of a result: 0 on success, [`Error::code`] otherwise.
pub fn status<T>(result: &Result<T>) -> u32 {
    match result {
        Ok(_) => 0,
        Err(error) => error.code(),
    }
}
