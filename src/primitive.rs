//! The RSA primitive.
//!
//! Raw modular exponentiation on integer representatives, no padding.
//! The public operation uses $e = F4$, the private operation uses the
//! Chinese remainder theorem on the half-size primes.

use zeroize::Zeroize;

use crate::arithmetic::{add, multiply, subtract, Montgomery};
use crate::key::PrivateKey;
use crate::numbers::Unsigned;
use crate::{Error, Result, F4};

/// [RSAEP][rsaep]: $c = m^e \bmod n$
///
/// [rsaep]: https://tools.ietf.org/html/rfc8017#section-5.1.1
pub fn rsa_exp<const L: usize>(n: &Unsigned<L>, m: &Unsigned<L>) -> Result<Unsigned<L>> {
    // 1.
    if m >= n {
        return Err(Error::OutOfRange);
    }

    // 2.
    let context = Montgomery::new(n)?;
    Ok(context.pow(m.digits(), &[F4::DIGIT]))
}

/// [RSADP][rsadp], second representation: $m = c^d \bmod n$ via CRT.
///
/// With `fault_check`, the result is re-encrypted and compared against the
/// ciphertext, so a glitched exponentiation never releases a wrong (and
/// factor-revealing) result.
///
/// [rsadp]: https://tools.ietf.org/html/rfc8017#section-5.1.2
pub fn rsa_exp_crt<const L: usize, const H: usize>(
    key: &PrivateKey<L, H>,
    c: &Unsigned<L>,
    fault_check: bool,
) -> Result<Unsigned<L>> {
    debug_assert_eq!(L, 2 * H);

    // 1.
    if c >= key.public.modulus() {
        return Err(Error::OutOfRange);
    }

    // 2.b.i.
    let p = Montgomery::new(&key.p)?;
    let mut mp = p.pow(c.digits(), key.dp.digits());

    // 2.b.ii.
    let q = Montgomery::new(&key.q)?;
    let mut mq = q.pow(c.digits(), key.dq.digits());

    // 2.b.iv. h = (m_1 - m_2) qInv mod p
    let mut diff = mp.clone();
    let mut mq_mod_p = p.reduce(mq.digits());
    if subtract::sub_assign_borrow(diff.digits_mut(), mq_mod_p.digits()) != 0 {
        add::add_assign_carry(diff.digits_mut(), p.modulus().digits());
    }
    let mut h = p.mul_modular(&diff, &key.q_inv);

    // 2.b.v. m = m_2 + q h, which is below n
    let mut m = Unsigned::<L>::zero();
    multiply::mul_into(m.digits_mut(), h.digits(), key.q.digits());
    let carry = add::add_assign_carry(m.digits_mut(), mq.digits());
    debug_assert_eq!(carry, 0);

    mp.zeroize();
    mq.zeroize();
    mq_mod_p.zeroize();
    diff.zeroize();
    h.zeroize();

    if fault_check && rsa_exp(key.public.modulus(), &m)? != *c {
        m.zeroize();
        error!("CRT result failed the fault check");
        return Err(Error::RsaOperation);
    }

    Ok(m)
}
