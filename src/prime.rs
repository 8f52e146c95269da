//! Incremental prime search.
//!
//! Starting from a random odd candidate with the top two bits set, we walk
//! upwards in steps of two. Residues modulo a table of small primes are
//! updated along the way, so sieving a candidate costs a few hundred digit
//! operations. Survivors go through Miller-Rabin with random bases.
//!
//! The search is sliced into work units, either one batch of sieve steps or
//! one Miller-Rabin round, so that key generation can be spread over many
//! short scheduler polls.

use rand_core::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::arithmetic::{add, divide, shift, subtract, Montgomery};
use crate::numbers::{Digit, Unsigned, DIGIT_BITS};
use crate::{Error, Result, E};

const SIEVE_LEN: usize = 512;

/// The first odd primes, 3 up to 3673.
static SMALL_PRIMES: [u16; SIEVE_LEN] = small_primes();

const fn small_primes() -> [u16; SIEVE_LEN] {
    let mut primes = [0u16; SIEVE_LEN];
    let mut count = 0;
    let mut candidate: u32 = 3;
    while count < SIEVE_LEN {
        let mut is_prime = true;
        let mut i = 0;
        while i < count && (primes[i] as u32) * (primes[i] as u32) <= candidate {
            if candidate % primes[i] as u32 == 0 {
                is_prime = false;
                break;
            }
            i += 1;
        }
        if is_prime {
            primes[count] = candidate as u16;
            count += 1;
        }
        candidate += 2;
    }
    primes
}

/// Sieve steps per work unit.
const SIEVE_STEPS: usize = 64;

/// Miller-Rabin rounds for a prime of the given size: 5 for 1024 bits, 4 from 1536 bits on.
pub const fn miller_rabin_rounds(bits: usize) -> u32 {
    if bits >= 1536 {
        4
    } else {
        5
    }
}

/// Fill `digits` from the RNG, surfacing its failure.
pub(crate) fn random_digits<R: CryptoRng + RngCore>(rng: &mut R, digits: &mut [Digit]) -> Result<()> {
    let mut bytes = [0u8; 4];
    for digit in digits.iter_mut() {
        rng.try_fill_bytes(&mut bytes).map_err(|_| Error::Rng)?;
        *digit = Digit::from_le_bytes(bytes);
    }
    bytes.zeroize();
    Ok(())
}

/// Miller-Rabin state for the current candidate $n$, everything in Montgomery representation.
#[derive(Zeroize, ZeroizeOnDrop)]
struct MillerRabin<const H: usize> {
    context: Montgomery<H>,
    /// odd part of $n - 1$
    d: Unsigned<H>,
    /// $n - 1 = 2^s d$
    s: usize,
    minus_one: Unsigned<H>,
    rounds_left: u32,
}

impl<const H: usize> MillerRabin<H> {
    fn new(n: &Unsigned<H>, rounds: u32) -> Result<Self> {
        let context = Montgomery::new(n)?;

        let mut d = n.clone();
        subtract::sub_assign_digit(d.digits_mut(), 1);
        let s = shift::trailing_zeros(d.digits()).ok_or(Error::InvalidParam)?;
        shift::shr_assign(d.digits_mut(), s);

        let mut minus_one = n.clone();
        subtract::sub_assign_borrow(minus_one.digits_mut(), context.one().digits());

        Ok(Self { context, d, s, minus_one, rounds_left: rounds })
    }

    /// One round with a random base below $2^{32(H - 1)}$, false for a witness of compositeness.
    fn round<R: CryptoRng + RngCore>(&self, rng: &mut R) -> Result<bool> {
        let mut base = Unsigned::<H>::zero();
        random_digits(rng, &mut base.digits_mut()[..H - 1])?;
        if base < Unsigned::from(2) {
            base = Unsigned::from(2);
        }

        let one = self.context.one();
        let mut x = self.context.power(&self.context.to_montgomery(base.digits()), self.d.digits());
        if x == *one || x == self.minus_one {
            return Ok(true);
        }
        for _ in 1..self.s {
            x = self.context.mul(&x, &x);
            if x == self.minus_one {
                return Ok(true);
            }
            if x == *one {
                return Ok(false);
            }
        }
        Ok(false)
    }
}

/// Search for a prime of exactly $32 H$ bits.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrimeSearch<const H: usize> {
    candidate: Unsigned<H>,
    residues: [u16; SIEVE_LEN],
    /// candidate mod $e$
    e_residue: u32,
    increments: usize,
    rounds: u32,
    test: Option<MillerRabin<H>>,
}

impl<const H: usize> PrimeSearch<H> {
    pub const BITS: usize = H * DIGIT_BITS;

    /// Candidates beyond this many steps from the start abort the search.
    pub const MAX_INCREMENTS: usize = 5 * Self::BITS;

    /// Start at a random odd number with the top two bits set.
    ///
    /// With both primes so chosen, their product has full bit length.
    pub fn new<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self> {
        let mut start = Unsigned::<H>::zero();
        random_digits(rng, start.digits_mut())?;
        let search = Self::starting_at(&start);
        start.zeroize();
        search
    }

    /// Start at `start`, rounded up to odd.
    pub(crate) fn starting_at(start: &Unsigned<H>) -> Result<Self> {
        if H < 2 {
            return Err(Error::InvalidParam);
        }
        let mut candidate = start.clone();
        candidate.digits_mut()[0] |= 1;
        candidate.digits_mut()[H - 1] |= 0b11 << (DIGIT_BITS - 2);
        Ok(Self::at(candidate))
    }

    fn at(candidate: Unsigned<H>) -> Self {
        let mut residues = [0u16; SIEVE_LEN];
        for (residue, &prime) in residues.iter_mut().zip(SMALL_PRIMES.iter()) {
            *residue = divide::rem_digit(candidate.digits(), prime as Digit) as u16;
        }
        let e_residue = divide::rem_digit(candidate.digits(), E);

        Self {
            candidate,
            residues,
            e_residue,
            increments: 0,
            rounds: miller_rabin_rounds(Self::BITS),
            test: None,
        }
    }

    pub fn candidate(&self) -> &Unsigned<H> {
        &self.candidate
    }

    /// Steps taken so far.
    pub fn increments(&self) -> usize {
        self.increments
    }

    /// The candidate passed all Miller-Rabin rounds.
    pub fn is_done(&self) -> bool {
        matches!(&self.test, Some(test) if test.rounds_left == 0)
    }

    /// No small factor, and $e$ does not divide candidate - 1.
    fn survives_sieve(&self) -> bool {
        self.e_residue != 1 && self.residues.iter().all(|&residue| residue != 0)
    }

    fn advance(&mut self) -> Result<()> {
        self.increments += 1;
        if self.increments > Self::MAX_INCREMENTS {
            warn!("prime search exhausted");
            return Err(Error::KeyGeneration);
        }
        if add::add_assign_digit(self.candidate.digits_mut(), 2) != 0 {
            return Err(Error::KeyGeneration);
        }
        for (residue, &prime) in self.residues.iter_mut().zip(SMALL_PRIMES.iter()) {
            *residue = ((*residue as u32 + 2) % prime as u32) as u16;
        }
        self.e_residue = (self.e_residue + 2) % E;
        Ok(())
    }

    /// One unit of work; true once the candidate is a probable prime.
    pub fn work<R: CryptoRng + RngCore>(&mut self, rng: &mut R) -> Result<bool> {
        if self.is_done() {
            return Ok(true);
        }

        if let Some(test) = self.test.as_mut() {
            if test.round(rng)? {
                test.rounds_left -= 1;
                return Ok(test.rounds_left == 0);
            }
            self.test = None;
            self.advance()?;
            return Ok(false);
        }

        for _ in 0..SIEVE_STEPS {
            if self.survives_sieve() {
                self.test = Some(MillerRabin::new(&self.candidate, self.rounds)?);
                return Ok(false);
            }
            self.advance()?;
        }
        Ok(false)
    }
}
