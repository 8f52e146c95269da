//! Montgomery representation of $[x]_{n} := x\text{ }(\text{mod }n)$,
//! as $[x \cdot R]_n$ with $R = 2^{wS}$.
//!
//! The "trick" is that reduction of excess summands after multiplication can
//! be calculated by a simple right shift instead of an actual modular division.
//! This needs to be balanced by the overhead of converting in and out, which
//! is negligible when calculating powers with large exponents.
//!
//! Multiplication is "coarsely integrated operand scanning" (CIOS) from
//! [Analyzing and comparing Montgomery multiplication algorithms (1996)][koc].
//!
//! [koc]: https://api.semanticscholar.org/CorpusID:1429463

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::numbers::{Digit, DoubleDigit, Unsigned, DIGIT_BITS};
use crate::{Error, Result};

use super::{add, conditional_assign, multiply::mac, shift, subtract};

/// Inverse of odd number modulo power of two: $e^{-1}\text{ mod }2^{w}$
///
/// This has $\mathcal{O}(\log n)$ loops in `DIGIT_BITS`: 5 iterations for u32.
///
/// Source: Fig. 1 from
/// [GCD-Free Algorithms for Computing Modular Inverses (2003)][joy-paillier]
///
/// Note that this source is highly confusing! What they mean to say
/// is to iterate $y \leftarrow y(2 - ey)$ in $\mathbb{Z}/2^{|f|}$,
/// where the output is an inverse of $e$ modulo $2^{2i}$.
///
/// Cf. [Crypto StackExchange][cse].
///
/// [joy-paillier]: https://api.semanticscholar.org/CorpusID:17736455
/// [cse]: https://crypto.stackexchange.com/a/47496
fn e_inverse_digit_joye_paillier(e: Digit) -> Digit {
    debug_assert_ne!(e & 1, 0);

    // log_2(32) = 5
    #[allow(non_snake_case)]
    let T = DIGIT_BITS.trailing_zeros();
    let mut y: Digit = 1;
    let two: Digit = 2;

    for _ in 1..=T {
        y = y.wrapping_mul(two.wrapping_sub(e.wrapping_mul(y)));
    }
    y
}

/// $Q_0 = -P_0^{-1}\text{(mod }2^{w}\text{)}$
fn digit_minus_inverse(p0: Digit) -> Digit {
    e_inverse_digit_joye_paillier(p0).wrapping_neg()
}

/// Montgomery arithmetic modulo an odd `n` of `S` digits.
///
/// All outputs are fully reduced (`< n`), so Montgomery representations
/// can be compared for equality directly.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Montgomery<const S: usize> {
    n: Unsigned<S>,
    /// $-n^{-1} \bmod 2^w$
    n0: Digit,
    /// $R \bmod n$, i.e. one
    r1: Unsigned<S>,
    /// $R^2 \bmod n$
    r2: Unsigned<S>,
    /// $R^3 \bmod n$
    r3: Unsigned<S>,
}

impl<const S: usize> Montgomery<S> {
    pub fn new(n: &Unsigned<S>) -> Result<Self> {
        if !n.is_odd() || *n == Unsigned::one() {
            return Err(Error::InvalidParam);
        }
        let n0 = digit_minus_inverse(n.0[0]);

        // R and R^2 modulo n by repeated doubling, starting at one.
        let mut x = Unsigned::<S>::one();
        let mut r1 = Unsigned::zero();
        for i in 0..2 * S * DIGIT_BITS {
            let carry = shift::shl_one_assign(&mut x.0);
            if carry != 0 || x >= *n {
                subtract::sub_assign_borrow(&mut x.0, &n.0);
            }
            if i + 1 == S * DIGIT_BITS {
                r1 = x.clone();
            }
        }

        let mut context = Self { n: n.clone(), n0, r1, r2: x, r3: Unsigned::zero() };
        let r3 = context.mul(&context.r2, &context.r2);
        context.r3 = r3;
        Ok(context)
    }

    pub fn modulus(&self) -> &Unsigned<S> {
        &self.n
    }

    /// One, in Montgomery representation.
    pub fn one(&self) -> &Unsigned<S> {
        &self.r1
    }

    /// Montgomery product $a b R^{-1} \bmod n$.
    ///
    /// Requires $ab < nR$, e.g. both below $R$ and one of them below $n$.
    pub fn mul(&self, a: &Unsigned<S>, b: &Unsigned<S>) -> Unsigned<S> {
        let n = &self.n.0;
        let mut t = [0 as Digit; S];
        let mut t_s: Digit = 0;

        for i in 0..S {
            // t += a * b_i
            let mut carry = 0;
            for j in 0..S {
                t[j] = mac(t[j], a.0[j], b.0[i], &mut carry);
            }
            let acc = t_s as DoubleDigit + carry as DoubleDigit;
            t_s = acc as Digit;
            let t_s1 = (acc >> DIGIT_BITS) as Digit;

            // t = (t + m * n) / w, where m makes the lowest digit vanish
            let m = t[0].wrapping_mul(self.n0);
            let mut carry = 0;
            mac(t[0], m, n[0], &mut carry);
            for j in 1..S {
                t[j - 1] = mac(t[j], m, n[j], &mut carry);
            }
            let acc = t_s as DoubleDigit + carry as DoubleDigit;
            t[S - 1] = acc as Digit;
            t_s = t_s1 + (acc >> DIGIT_BITS) as Digit;
        }

        // the result is below 2n: one conditional subtraction
        let mut reduced = t;
        let borrow = subtract::sub_assign_borrow(&mut reduced, n);
        conditional_assign(&mut t, &reduced, t_s != 0 || borrow == 0);
        Unsigned(t)
    }

    /// Modular addition of fully reduced values.
    pub fn add_assign(&self, y: &mut Unsigned<S>, z: &Unsigned<S>) {
        let carry = add::add_assign_carry(&mut y.0, &z.0);
        if carry != 0 || *y >= self.n {
            subtract::sub_assign_borrow(&mut y.0, &self.n.0);
        }
    }

    /// $x R \bmod n$ for any $x$ of up to $2S$ digits.
    ///
    /// Splitting $x = x_0 + x_1 R$ gives $x R = x_0 R^2 R^{-1} + x_1 R^3 R^{-1}$,
    /// so this doubles as reduction of a double-width number modulo $n$.
    pub fn to_montgomery(&self, x: &[Digit]) -> Unsigned<S> {
        debug_assert!(x.len() <= 2 * S);
        let (lo, hi) = x.split_at(x.len().min(S));
        let mut y = self.mul(&Unsigned::from_slice(lo), &self.r2);
        if !hi.is_empty() {
            let z = self.mul(&Unsigned::from_slice(hi), &self.r3);
            self.add_assign(&mut y, &z);
        }
        y
    }

    pub fn to_modular(&self, y: &Unsigned<S>) -> Unsigned<S> {
        self.mul(y, &Unsigned::one())
    }

    /// $x \bmod n$ for any $x$ of up to $2S$ digits.
    pub fn reduce(&self, x: &[Digit]) -> Unsigned<S> {
        self.to_modular(&self.to_montgomery(x))
    }

    /// Product of two fully reduced residues, outside Montgomery representation.
    pub fn mul_modular(&self, a: &Unsigned<S>, b: &Unsigned<S>) -> Unsigned<S> {
        self.mul(&self.mul(a, b), &self.r2)
    }

    /// Left-to-right square-and-multiply, in Montgomery representation.
    pub fn power(&self, base: &Unsigned<S>, exponent: &[Digit]) -> Unsigned<S> {
        #[cfg(not(feature = "ct-maybe"))]
        let exponent = &exponent[..super::significant_len(exponent)];

        let mut x = self.r1.clone();
        for digit in exponent.iter().rev() {
            for j in (0..DIGIT_BITS).rev() {
                x = self.mul(&x, &x);
                let bit = (digit >> j) & 1 == 1;

                #[cfg(not(feature = "ct-maybe"))] {
                    if bit {
                        x = self.mul(&x, base);
                    }
                }

                #[cfg(feature = "ct-maybe")] {
                    let y = self.mul(&x, base);
                    conditional_assign(&mut x.0, &y.0, bit);
                }
            }
        }
        x
    }

    /// $x^e \bmod n$, outside Montgomery representation.
    pub fn pow(&self, base: &[Digit], exponent: &[Digit]) -> Unsigned<S> {
        let mut base = self.to_montgomery(base);
        let power = self.power(&base, exponent);
        base.zeroize();
        self.to_modular(&power)
    }
}
