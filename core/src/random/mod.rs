//! Seedable pseudorandom number generators.
//!
//! A `RandomState` has value semantics like every other type here: cloning
//! it is cheap, and the clone continues the same sequence independently of
//! the original. Generating a number advances the state, so every generator
//! method takes `&mut self`.
//!
//! These generators are not suitable for cryptography. See
//! [`Integer::secure_random_bits`] for that.

use gmp_mpfr_sys::{gmp, mpfr};
use log::debug;
use std::fmt;
use std::os::raw::c_ulong;

use crate::cell::StorageCell;
use crate::errors::{NumError, Result};
use crate::float::Float;
use crate::ieee::IeeeFloat;
use crate::integer::Integer;

/// Pseudorandom algorithm, fixed when a `RandomState` is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Algorithm {
    /// The backend's default algorithm.
    Default,
    /// Mersenne Twister.
    MersenneTwister,
    /// Linear congruential `X = (a * X + c) mod 2^m2exp`.
    LinearCongruential {
        /// Multiplier.
        a: Integer,
        /// Increment.
        c: u64,
        /// Base-2 logarithm of the modulus.
        m2exp: u32,
    },
    /// Linear congruential with parameters chosen by the backend for at
    /// least `size` bits of output per step.
    LinearCongruentialSize(u32),
}

/// Pseudorandom generator state with value semantics.
#[derive(Clone)]
pub struct RandomState {
    cell: StorageCell<gmp::randstate_t>,
    algorithm: Algorithm,
    last_seed: Option<Integer>,
}

impl RandomState {
    fn with_cell(cell: StorageCell<gmp::randstate_t>, algorithm: Algorithm) -> Self {
        debug!("created random state with {:?}", algorithm);
        Self {
            cell,
            algorithm,
            last_seed: None,
        }
    }

    /// Returns a generator using the backend's default algorithm.
    pub fn new() -> Self {
        let cell = unsafe { StorageCell::new(|raw| gmp::randinit_default(raw)) };
        Self::with_cell(cell, Algorithm::Default)
    }
    /// Returns a Mersenne Twister generator.
    pub fn mersenne_twister() -> Self {
        let cell = unsafe { StorageCell::new(|raw| gmp::randinit_mt(raw)) };
        Self::with_cell(cell, Algorithm::MersenneTwister)
    }
    /// Returns a linear congruential generator computing
    /// `X = (a * X + c) mod 2^m2exp`.
    ///
    /// # Panics
    ///
    /// Panics if `m2exp` is less than 2. A modulus of 2 never terminates in
    /// the backend.
    pub fn lc_2exp(a: &Integer, c: u64, m2exp: u32) -> Self {
        assert!(m2exp >= 2, "{}", NumError::InvalidExponent(m2exp.into()));
        let c_raw = c as c_ulong;
        let cell = unsafe {
            StorageCell::new(|raw| {
                a.with_raw(|a| gmp::randinit_lc_2exp(raw, a, c_raw, m2exp.into()))
            })
        };
        Self::with_cell(
            cell,
            Algorithm::LinearCongruential {
                a: a.clone(),
                c,
                m2exp,
            },
        )
    }
    /// Returns a linear congruential generator with backend-chosen
    /// parameters producing at least `size` bits per step.
    ///
    /// Fails with `InvalidRandomState` if the backend has no parameters for
    /// that size (currently anything above 128).
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn lc_2exp_size(size: u32) -> Result<Self> {
        assert!(size > 0, "{}", NumError::InvalidExponent(0));
        let mut supported = true;
        let cell = unsafe {
            StorageCell::new(|raw| {
                if gmp::randinit_lc_2exp_size(raw, size.into()) == 0 {
                    // The record must be initialized for the cell to drop it.
                    supported = false;
                    gmp::randinit_default(raw);
                }
            })
        };
        if supported {
            Ok(Self::with_cell(cell, Algorithm::LinearCongruentialSize(size)))
        } else {
            Err(NumError::InvalidRandomState)
        }
    }

    /// Returns the algorithm chosen at construction.
    pub fn algorithm(&self) -> &Algorithm {
        &self.algorithm
    }

    /// Returns `true` if both values currently share backend storage.
    #[inline]
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        self.cell.shares_storage_with(&other.cell)
    }

    /// Seeds the generator.
    pub fn seed(&mut self, seed: &Integer) {
        self.cell
            .write(|state| seed.with_raw(|s| unsafe { gmp::randseed(state, s) }));
        debug!("seeded {:?} random state with {}", self.algorithm, seed);
        self.last_seed = Some(seed.clone());
    }
    /// Seeds the generator from a `u64`.
    pub fn seed_u64(&mut self, seed: u64) {
        self.seed(&Integer::from(seed));
    }
    /// Returns the seed most recently passed to [`seed`](Self::seed), if any.
    ///
    /// The backend cannot report its seed, so this is tracked separately and
    /// does not reflect how far the generator has advanced since.
    pub fn last_seed(&self) -> Option<Integer> {
        self.last_seed.clone()
    }

    /// Returns a uniformly distributed integer in `0..bound`.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is not positive.
    pub fn random_below(&mut self, bound: &Integer) -> Integer {
        assert!(
            bound.is_positive(),
            "random bound must be positive, not {}",
            bound,
        );
        let cell = &mut self.cell;
        Integer::build(|r| {
            cell.write(|state| bound.with_raw(|n| unsafe { gmp::mpz_urandomm(r, state, n) }))
        })
    }
    /// Returns a uniformly distributed integer in `0..bound`.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is zero.
    pub fn random_below_u64(&mut self, bound: u64) -> u64 {
        assert!(bound > 0, "random bound must be positive, not 0");
        let n = self.random_below(&Integer::from(bound));
        n.to_u64().unwrap_or_default()
    }
    /// Returns a uniformly distributed integer in `0..2^bits`.
    ///
    /// # Panics
    ///
    /// Panics if `bits` is not in the range 1 to 64.
    pub fn random_bits(&mut self, bits: u32) -> u64 {
        assert!(
            (1..=64).contains(&bits),
            "random bit count must be in 1..=64, not {}",
            bits,
        );
        self.random_integer_bits(bits).to_u64().unwrap_or_default()
    }
    /// Returns a uniformly distributed integer in `0..2^bits`.
    pub fn random_integer_bits(&mut self, bits: u32) -> Integer {
        let cell = &mut self.cell;
        Integer::build(|r| {
            cell.write(|state| unsafe { gmp::mpz_urandomb(r, state, bits.into()) })
        })
    }
    /// Returns a uniformly distributed float in `[0, 1)` with `prec` random
    /// bits.
    pub fn random_float(&mut self, prec: u32) -> Float {
        let cell = &mut self.cell;
        Float::build(prec, |r| {
            cell.write(|state| unsafe { gmp::mpf_urandomb(r, state, prec.into()) })
        })
    }
    /// Returns a uniformly distributed float in `[0, 1)` with `prec` random
    /// bits.
    pub fn random_ieee(&mut self, prec: u32) -> IeeeFloat {
        let cell = &mut self.cell;
        IeeeFloat::build(prec, |r| cell.write(|state| unsafe { mpfr::urandomb(r, state) })).0
    }
}

impl Default for RandomState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RandomState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomState")
            .field("algorithm", &self.algorithm)
            .field("last_seed", &self.last_seed)
            .field("cell", &self.cell)
            .finish()
    }
}
