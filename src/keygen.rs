//! Background RSA keypair generation.
//!
//! A prime search takes far too long to run in one go on a microcontroller,
//! so generation is a state machine that a cooperative scheduler polls
//! periodically, each poll doing a bounded amount of work:
//!
//! ```text
//! Default --free pool slot--> Init --> Gen --both primes--> Ready --PWCT--> Default
//!    |                          ^       |                     |
//!    | pool full                +-------+---- hard error -----+
//!    v
//! deregister the task
//! ```
//!
//! Keys land in a small pool. The decryption side claims one as "in use" and
//! destroys it once done, which frees the slot and re-arms generation.

use rand_core::{CryptoRng, RngCore};
use zeroize::{Zeroize, Zeroizing};

use crate::arithmetic::{cmp_digits, subtract};
use crate::key::PrivateKey;
use crate::numbers::{Unsigned, DIGIT_BITS};
use crate::prime::PrimeSearch;
use crate::{scrub, Error, Result};

/// Number of keypairs kept ready.
pub const POOL_SIZE: usize = 2;

pub const KEYGEN_POLL_INTERVAL_MS: u32 = 10;

/// Periodic task handle, as known to the [`Scheduler`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TaskId(pub u32);

pub const KEYGEN_TASK: TaskId = TaskId(0x5253_4B47);

/// The periodic task scheduler that drives [`KeyGenerator::poll`].
pub trait Scheduler {
    fn add_task(&mut self, task: TaskId, interval_ms: u32) -> Result<()>;
    fn remove_task(&mut self, task: TaskId) -> Result<()>;
}

/// Work units per poll, by modulus size; zero for unsupported sizes.
///
/// Larger keys take fewer units per poll, keeping the time spent in a
/// single poll roughly constant.
pub const fn quantization(bits: usize) -> u32 {
    match bits {
        2048 => 5,
        3072 => 2,
        4096 => 1,
        _ => 0,
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum KeyStatus {
    Free,
    Available,
}

/// Observable state of the generator.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum KeyGenState {
    Default,
    Init,
    Gen,
    Ready,
}

enum Stage<const H: usize> {
    Default,
    Init,
    Gen {
        p: Option<Zeroizing<Unsigned<H>>>,
        search: PrimeSearch<H>,
    },
    Ready {
        p: Zeroizing<Unsigned<H>>,
        q: Zeroizing<Unsigned<H>>,
    },
}

/// FIPS 186-5 A.1.3: $|p - q| > 2^{n/2 - 100}$.
fn check_distance<const H: usize>(p: &Unsigned<H>, q: &Unsigned<H>) -> Result<()> {
    let (larger, smaller) = match cmp_digits(p.digits(), q.digits()) {
        core::cmp::Ordering::Less => (q, p),
        _ => (p, q),
    };
    let mut distance = Zeroizing::new(larger.clone());
    subtract::sub_assign_borrow(distance.digits_mut(), smaller.digits());
    if distance.bit_length() <= (H * DIGIT_BITS).saturating_sub(100) {
        warn!("primes too close");
        return Err(Error::KeyGeneration);
    }
    Ok(())
}

/// Generator and pool of `32 L` bit keypairs.
pub struct KeyGenerator<const L: usize, const H: usize> {
    stage: Stage<H>,
    /// pool slot currently being filled
    target: Option<usize>,
    keys: [PrivateKey<L, H>; POOL_SIZE],
    status: [KeyStatus; POOL_SIZE],
    in_use: Option<usize>,
    registered: bool,
}

impl<const L: usize, const H: usize> KeyGenerator<L, H> {
    pub const QUANTIZATION: u32 = quantization(L * DIGIT_BITS);

    /// Only 2048, 3072 and 4096 bit keys are supported.
    pub fn new() -> Result<Self> {
        if Self::QUANTIZATION == 0 || L != 2 * H {
            return Err(Error::InvalidParam);
        }
        Ok(Self {
            stage: Stage::Default,
            target: None,
            keys: core::array::from_fn(|_| PrivateKey::zeroed()),
            status: [KeyStatus::Free; POOL_SIZE],
            in_use: None,
            registered: false,
        })
    }

    pub fn state(&self) -> KeyGenState {
        match self.stage {
            Stage::Default => KeyGenState::Default,
            Stage::Init => KeyGenState::Init,
            Stage::Gen { .. } => KeyGenState::Gen,
            Stage::Ready { .. } => KeyGenState::Ready,
        }
    }

    pub fn status(&self, index: usize) -> Result<KeyStatus> {
        self.status.get(index).copied().ok_or(Error::InvalidParam)
    }

    /// Whether the poll task is registered with the scheduler.
    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Register the poll task.
    pub fn start<S: Scheduler>(&mut self, scheduler: &mut S) -> Result<()> {
        if !self.registered {
            scheduler.add_task(KEYGEN_TASK, KEYGEN_POLL_INTERVAL_MS)?;
            self.registered = true;
            debug!("keygen task registered");
        }
        Ok(())
    }

    /// One scheduler tick.
    ///
    /// A failed attempt (RNG failure, exhausted prime search, close primes,
    /// failed pairwise consistency) is discarded and generation restarts
    /// from `Init`; the error is returned for the caller's records.
    pub fn poll<R, S>(&mut self, rng: &mut R, scheduler: &mut S) -> Result<()>
    where
        R: CryptoRng + RngCore,
        S: Scheduler,
    {
        let stage = core::mem::replace(&mut self.stage, Stage::Default);
        match self.step(stage, rng, scheduler) {
            Ok(next) => {
                self.stage = next;
                Ok(())
            }
            Err(Error::Scheduler) => Err(Error::Scheduler),
            Err(error) => {
                warn!("keygen attempt failed: {:?}, restarting", error);
                self.stage = match self.target {
                    Some(_) => Stage::Init,
                    None => Stage::Default,
                };
                Err(error)
            }
        }
    }

    fn step<R, S>(&mut self, stage: Stage<H>, rng: &mut R, scheduler: &mut S) -> Result<Stage<H>>
    where
        R: CryptoRng + RngCore,
        S: Scheduler,
    {
        match stage {
            Stage::Default => {
                match self.status.iter().position(|&status| status == KeyStatus::Free) {
                    Some(slot) => {
                        trace!("keygen: filling pool slot {}", slot);
                        self.target = Some(slot);
                        Ok(Stage::Init)
                    }
                    None => {
                        if self.registered {
                            scheduler.remove_task(KEYGEN_TASK)?;
                            self.registered = false;
                            debug!("key pool full, keygen task removed");
                        }
                        Ok(Stage::Default)
                    }
                }
            }

            Stage::Init => {
                let search = PrimeSearch::new(rng)?;
                Ok(Stage::Gen { p: None, search })
            }

            Stage::Gen { mut p, mut search } => {
                for _ in 0..Self::QUANTIZATION {
                    if !search.work(rng)? {
                        continue;
                    }
                    let prime = Zeroizing::new(search.candidate().clone());
                    match p.take() {
                        None => {
                            trace!("keygen: p found after {} steps", search.increments());
                            p = Some(prime);
                            search = PrimeSearch::new(rng)?;
                        }
                        Some(p) => {
                            trace!("keygen: q found after {} steps", search.increments());
                            check_distance(&*p, &*prime)?;
                            return Ok(Stage::Ready { p, q: prime });
                        }
                    }
                }
                Ok(Stage::Gen { p, search })
            }

            Stage::Ready { p, q } => {
                let slot = self.target.ok_or(Error::InvalidParam)?;
                let key = PrivateKey::from_primes((*p).clone(), (*q).clone())?;
                key.pairwise_consistency(rng)?;

                self.keys[slot] = key;
                self.status[slot] = KeyStatus::Available;
                self.target = None;
                info!("keypair available in pool slot {}", slot);
                Ok(Stage::Default)
            }
        }
    }

    /// Index of the key in use, claiming an available one if there is none.
    pub fn key_in_use_index(&mut self) -> Result<usize> {
        if let Some(index) = self.in_use {
            return Ok(index);
        }
        let index = self.status.iter()
            .position(|&status| status == KeyStatus::Available)
            .ok_or(Error::NoKeyAvailable)?;
        self.in_use = Some(index);
        debug!("pool slot {} in use", index);
        Ok(index)
    }

    pub fn key_in_use(&mut self) -> Result<&PrivateKey<L, H>> {
        let index = self.key_in_use_index()?;
        Ok(&self.keys[index])
    }

    /// Zeroize the key in use, free its slot, and re-register generation.
    pub fn destroy_key_in_use<S: Scheduler>(&mut self, scheduler: &mut S) -> Result<()> {
        let index = self.in_use.take().ok_or(Error::NoKeyAvailable)?;
        self.keys[index].zeroize();
        self.status[index] = KeyStatus::Free;
        let cleanup = if self.keys[index].is_zeroed() { Ok(()) } else { Err(Error::ZeroizationFailed) };
        info!("destroyed key in pool slot {}", index);
        scrub::aggregate(self.start(scheduler), cleanup)
    }
}
