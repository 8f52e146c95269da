use crate::numbers::{Digit, DIGIT_BITS};

/// Truncating right shift. Note that "right" means "lower number".
pub(crate) fn shr_assign(a: &mut [Digit], bits: usize) {
    let l = a.len();
    let n_digits = bits / DIGIT_BITS;

    if n_digits >= l {
        a.fill(0);
        return;
    }

    // shift by n_digits
    a.copy_within(n_digits.., 0);
    a[(l - n_digits)..].fill(0);

    let n_bits = bits % DIGIT_BITS;
    if n_bits > 0 {
        let mut borrow = 0;
        for elem in a.iter_mut().rev() {
            let new_borrow = *elem << (DIGIT_BITS - n_bits);
            *elem = (*elem >> n_bits) | borrow;
            borrow = new_borrow;
        }
    }
}

/// Doubling, returning the bit shifted out at the top.
pub(crate) fn shl_one_assign(a: &mut [Digit]) -> Digit {
    let mut carry = 0;
    for elem in a.iter_mut() {
        let new_carry = *elem >> (DIGIT_BITS - 1);
        *elem = (*elem << 1) | carry;
        carry = new_carry;
    }
    carry
}

/// Number of trailing zero bits, `None` for zero.
pub(crate) fn trailing_zeros(a: &[Digit]) -> Option<usize> {
    a.iter()
        .position(|&digit| digit != 0)
        .map(|i| i * DIGIT_BITS + a[i].trailing_zeros() as usize)
}
