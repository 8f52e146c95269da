//! Multi-precision arithmetic on little-endian digit slices.
//!
//! Everything here works on `&[Digit]` / `&mut [Digit]`, the fixed-width
//! [`Unsigned`][crate::Unsigned] wrappers are a thin layer on top. Stable
//! const-generics cannot express `Unsigned<L + 1>` or `Unsigned<2 * L>`, so
//! the callers size their buffers and the slice functions report carries and
//! borrows instead.
//!
//! For modular arithmetic we use [Montgomery][montgomery] multiplication
//! throughout; the only "real" division is by a single digit.
//!
//! [montgomery]: https://api.semanticscholar.org/CorpusID:7629541

use core::cmp::Ordering;

use crate::numbers::{Digit, DIGIT_BITS};

pub(crate) mod add;
pub(crate) mod divide;
pub(crate) mod montgomery;
pub(crate) mod multiply;
pub(crate) mod shift;
pub(crate) mod subtract;

pub use montgomery::Montgomery;

/// 0 if zero, else index + 1 of last non-zero digit
pub(crate) fn significant_len(digits: &[Digit]) -> usize {
    digits.iter()
        .enumerate().rev()
        .find(|(_, &x)| x != 0)
        .map(|(i, _)| i + 1)
        .unwrap_or(0)
}

pub(crate) fn bit_length(digits: &[Digit]) -> usize {
    match significant_len(digits) {
        0 => 0,
        l => (l - 1) * DIGIT_BITS + (DIGIT_BITS - digits[l - 1].leading_zeros() as usize),
    }
}

/// This is *little endian* ordering, as opposed to the default
/// ordering on arrays and slices!
///
/// Slices of different lengths are compared as numbers.
pub(crate) fn cmp_digits(m: &[Digit], n: &[Digit]) -> Ordering {
    let l_m = significant_len(m);
    let l_n = significant_len(n);
    match l_m.cmp(&l_n) {
        Ordering::Equal => {}
        not_equal => return not_equal,
    }

    for i in (0..l_m).rev() {
        match m[i].cmp(&n[i]) {
            Ordering::Equal => (),
            not_equal => return not_equal
        }
    }
    Ordering::Equal
}

/// `dst = src` if `choice`, without branching on `choice` under `ct-maybe`.
#[inline]
pub(crate) fn conditional_assign(dst: &mut [Digit], src: &[Digit], choice: bool) {
    debug_assert_eq!(dst.len(), src.len());

    #[cfg(not(feature = "ct-maybe"))] {
        if choice {
            dst.copy_from_slice(src);
        }
    }

    #[cfg(feature = "ct-maybe")] {
        use subtle::ConditionallySelectable;
        let choice = subtle::Choice::from(choice as u8);
        for (d, s) in dst.iter_mut().zip(src) {
            d.conditional_assign(s, choice);
        }
    }
}
