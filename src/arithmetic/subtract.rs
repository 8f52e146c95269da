use crate::numbers::{Digit, SignedDoubleDigit, DIGIT_BITS};

/// Subtract with borrow:
#[inline]
pub fn sbb(a: Digit, b: Digit, acc: &mut SignedDoubleDigit) -> Digit {
    *acc += a as SignedDoubleDigit;
    *acc -= b as SignedDoubleDigit;
    let lo = *acc as Digit;
    *acc >>= DIGIT_BITS;
    lo
}

// A non-zero borrow (if a.len() == b.len()) is -1, which as unsigned is
// the same as "all bits set", i.e., 0xFFFF_FFFF for Digit = u32
pub(crate) fn sub_assign_borrow(a: &mut [Digit], b: &[Digit]) -> Digit {
    debug_assert!(a.len() >= b.len());
    let mut borrow = 0;

    let (a_lo, a_hi) = a.split_at_mut(b.len());

    for (a, b) in a_lo.iter_mut().zip(b) {
        *a = sbb(*a, *b, &mut borrow);
    }

    if borrow != 0 {
        for a in a_hi {
            *a = sbb(*a, 0, &mut borrow);
            if borrow == 0 {
                break;
            }
        }
    }

    borrow as Digit
}

/// a -= digit, returning the borrow.
#[inline]
pub(crate) fn sub_assign_digit(a: &mut [Digit], digit: Digit) -> Digit {
    sub_assign_borrow(a, &[digit])
}
