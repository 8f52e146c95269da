//! All things $F4$

use crate::arithmetic::{add, divide, multiply};
use crate::numbers::{Digit, DoubleDigit, Unsigned};
use crate::{Error, Result};

/// The fourth Fermat prime, $2^{16} + 1$ (used as public exponent $e$).
///
/// This library only implements RSA keys with public exponent `e = 65537 = 0x10001 = u16::MAX + 2`.
///
/// An example recommendation to do so is RFC 4871: <https://www.ietf.org/rfc/rfc4871.txt>,
/// more generally, there seems no need to have too many knobs to turn.
pub struct F4 {}

impl F4 {
    pub const DIGIT: Digit = 0x1_0001;

    /// Inverse of a residue modulo $F4$, via Fermat: $r^{e - 2}$.
    fn inv_digit(r: Digit) -> Digit {
        let e = Self::DIGIT as DoubleDigit;
        let mut base = r as DoubleDigit % e;
        let mut exponent = Self::DIGIT - 2;
        let mut result: DoubleDigit = 1;
        while exponent > 0 {
            if exponent & 1 == 1 {
                result = result * base % e;
            }
            base = base * base % e;
            exponent >>= 1;
        }
        result as Digit
    }

    /// The inverse of $F4$ modulo other numbers is used in RSA,
    /// and deserves an optimized implementation.
    ///
    /// Arazi's identity: with $t = -f^{-1} \bmod e$, the number
    /// $d = (1 + f t) / e$ is an integer below $f$, and $d e = 1 + f t \equiv 1 \pmod f$.
    /// So the only division is by the single digit $e$, and $f$ may be even
    /// ($p - 1$, $\varphi(n)$).
    ///
    /// Fails if $f$ is a multiple of $e$ (no inverse).
    pub fn inv_mod<const S: usize>(f: &Unsigned<S>) -> Result<Unsigned<S>> {
        let f_mod_e = divide::rem_digit(f.digits(), Self::DIGIT);
        if f_mod_e == 0 {
            return Err(Error::InvalidParam);
        }
        let t = Self::DIGIT - Self::inv_digit(f_mod_e);

        let mut d = f.clone();
        let mut hi = multiply::mul_assign_digit(d.digits_mut(), t);
        hi += add::add_assign_digit(d.digits_mut(), 1);

        let remainder = divide::div_rem_assign_digit(d.digits_mut(), hi, Self::DIGIT);
        debug_assert_eq!(remainder, 0);
        if remainder != 0 {
            return Err(Error::RsaOperation);
        }
        Ok(d)
    }
}
