//! RSA keys.
//!
//! Our private keys consist of the primes `p` and `q`, the CRT exponents
//! `dp = e^{-1} mod (p - 1)` and `dq = e^{-1} mod (q - 1)`, and
//! `q_inv = q^{-1} mod p`. The full private exponent `d` (modulo φ(n)) is
//! computed for completeness, decryption never touches it.
//! `e` is restricted to 65537.

use rand_core::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::arithmetic::{multiply, subtract, Montgomery};
use crate::keygen::{quantization, KeyGenerator};
use crate::numbers::{Bits, Unsigned, DIGIT_BITS};
use crate::padding::Oaep;
use crate::sha::ShaType;
use crate::{primitive, scrub, Error, Result, F4, MAX_MODULUS_BYTES};

/// Size of the random message used by the pairwise consistency test.
const PWCT_MESSAGE_LEN: usize = 32;

/// RSA public key.
///
/// Here, `n = pq` is the product of the private pair of primes.
/// `e` is fixed to be 65537 = 0x10001.
#[derive(Clone, Debug, Eq, PartialEq, Zeroize)]
pub struct PublicKey<const L: usize> {
    pub(crate) n: Unsigned<L>,
}

impl<const L: usize> Bits for PublicKey<L> {
    const BITS: usize = L * DIGIT_BITS;
}

impl<const L: usize> PublicKey<L> {
    /// Modulus size in bytes, `k` in RFC 8017.
    pub const BYTES: usize = Unsigned::<L>::BYTES;

    /// The modulus must be odd and of full bit length.
    pub fn new(n: Unsigned<L>) -> Result<Self> {
        if !n.is_odd() || n.bit_length() != Self::BITS {
            return Err(Error::InvalidParam);
        }
        Ok(Self { n })
    }

    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self> {
        Self::new(Unsigned::from_be_bytes(bytes)?)
    }

    pub fn modulus(&self) -> &Unsigned<L> {
        &self.n
    }

    /// [RSAEP][rsaep]
    ///
    /// [rsaep]: https://tools.ietf.org/html/rfc8017#section-5.1.1
    pub fn encryption_primitive(&self, m: &Unsigned<L>) -> Result<Unsigned<L>> {
        primitive::rsa_exp(&self.n, m)
    }

    /// [RSAES-OAEP-ENCRYPT][encrypt], `out` must be exactly `k` bytes.
    ///
    /// [encrypt]: https://tools.ietf.org/html/rfc8017#section-7.1.1
    pub fn encrypt<R: CryptoRng + RngCore>(
        &self,
        oaep: &Oaep<'_>,
        msg: &[u8],
        rng: &mut R,
        out: &mut [u8],
    ) -> Result<()> {
        if out.len() != Self::BYTES {
            return Err(Error::InvalidParam);
        }

        // 1. + 2.
        oaep.encode(msg, rng, out)?;

        // 3.a.
        let m = Zeroizing::new(Unsigned::<L>::from_be_bytes(out)?);

        // 3.b. + 3.c.
        self.encryption_primitive(&*m)?.write_be_bytes(out)
    }
}

/// RSA private key.
///
/// Fundamentally, this consists of two different primes `p` and `q`, which should
/// both have bit length `32 H`, such that `n` has bit length `32 L`.
///
/// It's quite sad, but we can't enforce the bound `L = 2 H` at compile time.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey<const L: usize, const H: usize> {
    pub(crate) p: Unsigned<H>,
    pub(crate) q: Unsigned<H>,
    pub(crate) dp: Unsigned<H>,
    pub(crate) dq: Unsigned<H>,
    pub(crate) q_inv: Unsigned<H>,
    pub(crate) d: Unsigned<L>,
    pub(crate) public: PublicKey<L>,
}

impl<const L: usize, const H: usize> Bits for PrivateKey<L, H> {
    const BITS: usize = L * DIGIT_BITS;
}

impl<const L: usize, const H: usize> PrivateKey<L, H> {
    /// Derive all key components from a pair of primes.
    ///
    /// Primality is the caller's responsibility; this checks what can be
    /// checked cheaply: both odd, distinct, $e$ invertible modulo $p - 1$ and
    /// $q - 1$, and $n$ of full bit length.
    pub fn from_primes(p: Unsigned<H>, q: Unsigned<H>) -> Result<Self> {
        if L != 2 * H || H == 0 {
            return Err(Error::InvalidParam);
        }
        if !p.is_odd() || !q.is_odd() || p == q {
            return Err(Error::InvalidParam);
        }

        let mut p_minus_one = Zeroizing::new(p.clone());
        subtract::sub_assign_digit(p_minus_one.digits_mut(), 1);
        let mut q_minus_one = Zeroizing::new(q.clone());
        subtract::sub_assign_digit(q_minus_one.digits_mut(), 1);

        // fails iff p = 1 (mod e), resp. q
        let dp = F4::inv_mod(&*p_minus_one)?;
        let dq = F4::inv_mod(&*q_minus_one)?;

        let mut n = Unsigned::<L>::zero();
        multiply::mul_into(n.digits_mut(), p.digits(), q.digits());
        let public = PublicKey::new(n)?;

        let mut phi = Zeroizing::new(Unsigned::<L>::zero());
        multiply::mul_into(phi.digits_mut(), p_minus_one.digits(), q_minus_one.digits());
        let d = F4::inv_mod(&*phi)?;

        // Fermat: q^{p - 2} = q^{-1} (mod p)
        let mut p_minus_two = p_minus_one.clone();
        subtract::sub_assign_digit(p_minus_two.digits_mut(), 1);
        let q_inv = Montgomery::new(&p)?.pow(q.digits(), p_minus_two.digits());

        Ok(Self { p, q, dp, dq, q_inv, d, public })
    }

    /// All components zero, a placeholder for an empty pool slot.
    pub(crate) const fn zeroed() -> Self {
        Self {
            p: Unsigned::zero(),
            q: Unsigned::zero(),
            dp: Unsigned::zero(),
            dq: Unsigned::zero(),
            q_inv: Unsigned::zero(),
            d: Unsigned::zero(),
            public: PublicKey { n: Unsigned::zero() },
        }
    }

    pub(crate) fn is_zeroed(&self) -> bool {
        self.p.is_zero()
            && self.q.is_zero()
            && self.dp.is_zero()
            && self.dq.is_zero()
            && self.q_inv.is_zero()
            && self.d.is_zero()
            && self.public.n.is_zero()
    }

    pub fn public_key(&self) -> &PublicKey<L> {
        &self.public
    }

    /// [RSADP][rsadp], via CRT and fault-checked against the public key.
    ///
    /// [rsadp]: https://tools.ietf.org/html/rfc8017#section-5.1.2
    pub fn decryption_primitive(&self, c: &Unsigned<L>) -> Result<Unsigned<L>> {
        primitive::rsa_exp_crt(self, c, true)
    }

    /// [RSAES-OAEP-DECRYPT][decrypt]: copy the message to the front of `out`, return its length.
    ///
    /// The decrypted (padded) block only ever lives on the stack, and is
    /// scrubbed before returning, whatever the outcome.
    ///
    /// [decrypt]: https://tools.ietf.org/html/rfc8017#section-7.1.2
    pub fn decrypt(&self, oaep: &Oaep<'_>, ciphertext: &[u8], out: &mut [u8]) -> Result<usize> {
        let k = PublicKey::<L>::BYTES;

        // 1.b.
        if ciphertext.len() != k || k > MAX_MODULUS_BYTES {
            return Err(Error::InvalidParam);
        }

        // 2.a.
        let c = Unsigned::<L>::from_be_bytes(ciphertext)?;

        // 2.b.
        let mut m = self.decryption_primitive(&c)?;

        // 2.c. + 3.
        let mut buffer = [0u8; MAX_MODULUS_BYTES];
        let em = &mut buffer[..k];
        let result = m.write_be_bytes(em).and_then(|()| decode_into(oaep, em, out));

        m.zeroize();
        let cleanup = scrub::secure_zeroize(&mut buffer);
        scrub::aggregate(result, cleanup)
    }

    /// Pairwise consistency test: a random message must survive the
    /// OAEP round trip through both halves of the keypair.
    pub fn pairwise_consistency<R: CryptoRng + RngCore>(&self, rng: &mut R) -> Result<()> {
        let k = PublicKey::<L>::BYTES;
        if k > MAX_MODULUS_BYTES {
            return Err(Error::InvalidParam);
        }
        let oaep = Oaep::new(ShaType::Sha384);

        let mut message = Zeroizing::new([0u8; PWCT_MESSAGE_LEN]);
        rng.try_fill_bytes(&mut message[..]).map_err(|_| Error::Rng)?;
        let mut recovered = Zeroizing::new([0u8; PWCT_MESSAGE_LEN]);
        let mut ciphertext = [0u8; MAX_MODULUS_BYTES];

        self.public
            .encrypt(&oaep, &message[..], rng, &mut ciphertext[..k])
            .and_then(|()| self.decrypt(&oaep, &ciphertext[..k], &mut recovered[..]))
            .map_err(|error| match error {
                Error::Rng => Error::Rng,
                _ => Error::PairwiseConsistency,
            })
            .and_then(|len| {
                if len == PWCT_MESSAGE_LEN && recovered[..] == message[..] {
                    Ok(())
                } else {
                    Err(Error::PairwiseConsistency)
                }
            })
    }
}

fn decode_into(oaep: &Oaep<'_>, em: &mut [u8], out: &mut [u8]) -> Result<usize> {
    let msg = oaep.decode(em)?;
    out.get_mut(..msg.len())
        .ok_or(Error::InvalidParam)?
        .copy_from_slice(msg);
    Ok(msg.len())
}

/// The RSA cryptosystem. Sealed trait to avoid experiments.
pub trait Rsa: sealed::Rsa {
    const BITS: usize;
    const MODULUS_BYTES: usize = Self::BITS / 8;
    /// Key generation work units per poll.
    const QUANTIZATION: u32 = quantization(Self::BITS);

    type PublicKey;
    type PrivateKey;
    type KeyGenerator;
}

/// cf. https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod sealed {
    pub trait Rsa {}
    impl Rsa for super::Rsa2k {}
    impl Rsa for super::Rsa3k {}
    impl Rsa for super::Rsa4k {}
}

/// The RSA cryptosystem with 2048 bit size keys.
///
/// Corresponds roughly to 112-bit security.
pub struct Rsa2k;
impl Rsa for Rsa2k {
    const BITS: usize = 2048;
    type PublicKey = PublicKey<64>;
    type PrivateKey = PrivateKey<64, 32>;
    type KeyGenerator = KeyGenerator<64, 32>;
}

/// The RSA cryptosystem with 3072 bit size keys.
///
/// Corresponds roughly to 128-bit security.
pub struct Rsa3k;
impl Rsa for Rsa3k {
    const BITS: usize = 3072;
    type PublicKey = PublicKey<96>;
    type PrivateKey = PrivateKey<96, 48>;
    type KeyGenerator = KeyGenerator<96, 48>;
}

/// The RSA cryptosystem with 4096 bit size keys.
pub struct Rsa4k;
impl Rsa for Rsa4k {
    const BITS: usize = 4096;
    type PublicKey = PublicKey<128>;
    type PrivateKey = PrivateKey<128, 64>;
    type KeyGenerator = KeyGenerator<128, 64>;
}
