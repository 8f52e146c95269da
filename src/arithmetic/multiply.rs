use crate::numbers::{Digit, DoubleDigit, DIGIT_BITS};

/// Multiply-accumulate: returns the low digit of `a + b*c + carry`,
/// leaves the high digit in `carry`.
///
/// Cannot overflow: (2^w - 1) + (2^w - 1)^2 + (2^w - 1) = 2^{2w} - 1.
#[inline]
pub fn mac(a: Digit, b: Digit, c: Digit, carry: &mut Digit) -> Digit {
    let acc = a as DoubleDigit + (b as DoubleDigit) * (c as DoubleDigit) + *carry as DoubleDigit;
    *carry = (acc >> DIGIT_BITS) as Digit;
    acc as Digit
}

/// Operand-scanning schoolbook multiplication: `product = a * b`.
///
/// `product` must have room for `a.len() + b.len()` digits (after dropping
/// leading zeros of the factors), anything above is zeroed.
pub(crate) fn mul_into(product: &mut [Digit], a: &[Digit], b: &[Digit]) {
    let a = &a[..super::significant_len(a)];
    let b = &b[..super::significant_len(b)];
    debug_assert!(product.len() >= a.len() + b.len());

    product.fill(0);
    for (i, &bi) in b.iter().enumerate() {
        let mut carry = 0;
        for (j, &aj) in a.iter().enumerate() {
            product[i + j] = mac(product[i + j], aj, bi, &mut carry);
        }
        product[i + a.len()] = carry;
    }
}

/// a *= digit, returning the digit that falls off the top.
pub(crate) fn mul_assign_digit(a: &mut [Digit], digit: Digit) -> Digit {
    let mut carry = 0;
    for x in a.iter_mut() {
        *x = mac(0, *x, digit, &mut carry);
    }
    carry
}
