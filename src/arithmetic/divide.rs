use crate::numbers::{Digit, DoubleDigit, DIGIT_BITS};

/// Divide a two digit numerator by a one digit divisor, returns quotient and remainder:
///
/// Note: the caller must ensure that both the quotient and remainder will fit into a single digit.
/// This is _not_ true for an arbitrary numerator/denominator; `hi < divisor` suffices.
///
/// REMARK: This is Knuth's operation c0), "memorizing the multiplication table in reverse."
#[inline]
pub fn div_digits(hi: Digit, lo: Digit, divisor: Digit) -> (Digit, Digit) {
    debug_assert!(hi < divisor);

    let x = ((hi as DoubleDigit) << DIGIT_BITS) + lo as DoubleDigit;
    let divisor = divisor as DoubleDigit;

    let q = x / divisor;
    let r = x % divisor;

    (q as Digit, r as Digit)
}

/// Divides `hi * 2^{w * len} + number` in-place by `divisor`, returning the remainder.
///
/// Run down the digits, dividing each by the divisor, while carrying along the remainder.
/// Requires `hi < divisor`, so that the quotient fits in `number`.
pub(crate) fn div_rem_assign_digit(number: &mut [Digit], hi: Digit, divisor: Digit) -> Digit {
    let mut remainder = hi;

    for digit in number.iter_mut().rev() {
        let (quotient, r) = div_digits(remainder, *digit, divisor);
        *digit = quotient;
        remainder = r;
    }

    remainder
}

/// `number mod divisor`, leaving `number` untouched.
pub(crate) fn rem_digit(number: &[Digit], divisor: Digit) -> Digit {
    debug_assert_ne!(divisor, 0);
    let divisor = divisor as DoubleDigit;
    number.iter().rev().fold(0, |remainder, &digit| {
        ((remainder << DIGIT_BITS) | digit as DoubleDigit) % divisor
    }) as Digit
}
