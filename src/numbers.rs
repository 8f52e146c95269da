use core::{cmp::Ordering, fmt};

use zeroize::Zeroize;

use crate::{Error, Result};

/// `u32`, the word size of the Cortex-M targets this runs on.
pub type Digit = u32;
pub(crate) type DoubleDigit = u64;
pub(crate) type SignedDoubleDigit = i64;

pub const DIGIT_BITS: usize = 32;
pub const DIGIT_BYTES: usize = 4;

/// Size of a fixed-width number in bits.
pub trait Bits {
    const BITS: usize;
}

/// Unsigned integer with `L` digits (L for length).
///
/// Internal representation is little-endian: `self.0[0]` is the least
/// significant digit. External representation (`from_be_bytes`,
/// `write_be_bytes`, `Debug`) is big-endian, as in RFC 8017.
///
/// There is no heap: a 4096 bit number is 128 digits on the stack.
#[derive(Clone, Eq, PartialEq, Zeroize)]
pub struct Unsigned<const L: usize>(pub(crate) [Digit; L]);

impl<const L: usize> Bits for Unsigned<L> {
    const BITS: usize = L * DIGIT_BITS;
}

impl<const L: usize> Default for Unsigned<L> {
    fn default() -> Self {
        Self([0; L])
    }
}

impl<const L: usize> From<Digit> for Unsigned<L> {
    /// Fails for L = 0, bound not expressable.
    fn from(digit: Digit) -> Self {
        let mut x = Self::zero();
        x.0[0] = digit;
        x
    }
}

// c'tors and such
impl<const L: usize> Unsigned<L> {
    pub const BYTES: usize = L * DIGIT_BYTES;

    pub const fn zero() -> Self {
        Self([0; L])
    }

    pub fn one() -> Self {
        Self::from(1)
    }

    /// Copy little-endian digits, the slice may be shorter than `L`.
    ///
    /// Digits beyond `L` must be zero.
    pub fn from_slice(digits: &[Digit]) -> Self {
        let mut x = Self::zero();
        let l = digits.len().min(L);
        x.0[..l].copy_from_slice(&digits[..l]);
        debug_assert!(digits[l..].iter().all(|&digit| digit == 0));
        x
    }

    /// Interpret big-endian bytes.
    ///
    /// More than `Self::BYTES` bytes are accepted if the excess leading bytes are zero.
    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self> {
        let mut x = Self::zero();
        for (i, &byte) in bytes.iter().rev().enumerate() {
            if i >= Self::BYTES {
                if byte != 0 {
                    return Err(Error::InvalidParam);
                }
                continue;
            }
            x.0[i / DIGIT_BYTES] |= (byte as Digit) << (8 * (i % DIGIT_BYTES));
        }
        Ok(x)
    }

    /// Write as big-endian bytes, left-padded with zeros to `out.len()`.
    pub fn write_be_bytes(&self, out: &mut [u8]) -> Result<()> {
        if self.bit_length() > 8 * out.len() {
            return Err(Error::InvalidParam);
        }
        for (i, byte) in out.iter_mut().rev().enumerate() {
            *byte = if i < Self::BYTES {
                (self.0[i / DIGIT_BYTES] >> (8 * (i % DIGIT_BYTES))) as u8
            } else {
                0
            };
        }
        Ok(())
    }
}

impl<const L: usize> Unsigned<L> {
    pub fn digits(&self) -> &[Digit] {
        &self.0
    }

    pub(crate) fn digits_mut(&mut self) -> &mut [Digit] {
        &mut self.0
    }

    /// 0 if zero, else index + 1 of last non-zero digit
    pub fn len(&self) -> usize {
        crate::arithmetic::significant_len(&self.0)
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&digit| digit == 0)
    }

    pub fn is_odd(&self) -> bool {
        L > 0 && self.0[0] & 1 == 1
    }

    pub fn bit_length(&self) -> usize {
        crate::arithmetic::bit_length(&self.0)
    }

    pub fn bit(&self, i: usize) -> bool {
        i < Self::BITS && (self.0[i / DIGIT_BITS] >> (i % DIGIT_BITS)) & 1 == 1
    }
}

// Since we store little-endian, comparison needs to start at the last
// digit, instead of at the first as the derived implementation would.
impl<const L: usize> Ord for Unsigned<L> {
    fn cmp(&self, other: &Self) -> Ordering {
        crate::arithmetic::cmp_digits(&self.0, &other.0)
    }
}

impl<const L: usize> PartialOrd for Unsigned<L> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const L: usize> fmt::Debug for Unsigned<L> {
    /// Big-endian hex, like GP/PARI's `hex()`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for digit in self.0.iter().rev() {
            write!(f, "{:08x}", digit)?;
        }
        Ok(())
    }
}
