//! Number-theoretic functions.

use gmp_mpfr_sys::gmp;
use std::convert::TryFrom;
use std::os::raw::{c_int, c_ulong};

use super::Integer;
use crate::errors::{NumError, Result};

/// Outcome of a probabilistic primality test.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Primality {
    /// Definitely composite (or less than 2).
    Composite,
    /// Passed every round of the test.
    ProbablyPrime,
    /// Proven prime.
    Prime,
}

impl Integer {
    /// Returns the greatest common divisor, which is never negative.
    pub fn gcd(&self, other: &Self) -> Self {
        Self::build(|r| self.with_raw(|a| other.with_raw(|b| unsafe { gmp::mpz_gcd(r, a, b) })))
    }
    /// Returns the least common multiple, which is never negative.
    pub fn lcm(&self, other: &Self) -> Self {
        Self::build(|r| self.with_raw(|a| other.with_raw(|b| unsafe { gmp::mpz_lcm(r, a, b) })))
    }

    /// Returns `self` raised to `exp`, modulo `modulus`, in the range
    /// `0..|modulus|`.
    ///
    /// A negative exponent raises the modular inverse instead.
    pub fn powm(&self, exp: &Self, modulus: &Self) -> Result<Self> {
        if modulus.is_zero() {
            return Err(NumError::DivisionByZero);
        }
        if exp.is_negative() {
            return self.invert(modulus)?.powm(&exp.abs(), modulus);
        }
        Ok(Self::build(|r| {
            self.with_raw(|b| {
                exp.with_raw(|e| modulus.with_raw(|m| unsafe { gmp::mpz_powm(r, b, e, m) }))
            })
        }))
    }

    /// Returns the inverse of `self` modulo `modulus`, in the range
    /// `0..|modulus|`.
    pub fn invert(&self, modulus: &Self) -> Result<Self> {
        if modulus.is_zero() {
            return Err(NumError::DivisionByZero);
        }
        let mut ret = Self::new();
        let found = ret.with_raw_mut(|r| {
            self.with_raw(|a| modulus.with_raw(|m| unsafe { gmp::mpz_invert(r, a, m) }))
        });
        if found != 0 {
            Ok(ret)
        } else {
            Err(NumError::NotInvertible)
        }
    }

    /// Returns the integer square root, rounded down.
    pub fn sqrt(&self) -> Result<Self> {
        if self.is_negative() {
            return Err(NumError::NegativeSquareRoot);
        }
        Ok(Self::build(|r| self.with_raw(|a| unsafe { gmp::mpz_sqrt(r, a) })))
    }
    /// Returns `true` if the integer is the square of an integer.
    pub fn is_perfect_square(&self) -> bool {
        self.with_raw(|raw| unsafe { gmp::mpz_perfect_square_p(raw) != 0 })
    }

    /// Tests whether the integer is prime, running `reps` rounds of
    /// Miller-Rabin after trial division. Between 15 and 50 rounds is
    /// reasonable.
    pub fn is_probably_prime(&self, reps: u32) -> Primality {
        let reps = c_int::try_from(reps).unwrap_or(c_int::MAX);
        match self.with_raw(|raw| unsafe { gmp::mpz_probab_prime_p(raw, reps) }) {
            0 => Primality::Composite,
            1 => Primality::ProbablyPrime,
            _ => Primality::Prime,
        }
    }
    /// Returns the next integer greater than `self` that is probably prime.
    pub fn next_prime(&self) -> Self {
        Self::build(|r| self.with_raw(|a| unsafe { gmp::mpz_nextprime(r, a) }))
    }

    /// Returns `n!`.
    pub fn factorial(n: u32) -> Self {
        Self::build(|r| unsafe { gmp::mpz_fac_ui(r, c_ulong::from(n)) })
    }
    /// Returns the binomial coefficient `n` choose `k`, extended to negative
    /// `n` by `(-n choose k) = (-1)^k (n + k - 1 choose k)`.
    pub fn binomial(n: &Self, k: u32) -> Self {
        Self::build(|r| n.with_raw(|n| unsafe { gmp::mpz_bin_ui(r, n, c_ulong::from(k)) }))
    }
    /// Returns the `n`th Fibonacci number, with `fibonacci(0) == 0`.
    pub fn fibonacci(n: u32) -> Self {
        Self::build(|r| unsafe { gmp::mpz_fib_ui(r, c_ulong::from(n)) })
    }
}
