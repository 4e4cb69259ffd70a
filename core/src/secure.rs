//! Integers drawn from the operating system's secure random source.
//!
//! Nothing here touches [`RandomState`](crate::RandomState), and nothing
//! there touches the OS source.

use gmp_mpfr_sys::gmp;
use log::trace;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::errors::{NumError, Result};
use crate::integer::Integer;

impl Integer {
    /// Returns a cryptographically secure integer uniformly distributed in
    /// `0..2^bits`.
    pub fn secure_random_bits(bits: u32) -> Result<Self> {
        let len = (bits as usize + 7) / 8;
        let mut bytes = vec![0_u8; len];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| NumError::Entropy(e.to_string()))?;
        if bits % 8 != 0 {
            // Most significant byte comes first.
            bytes[0] &= (1_u8 << (bits % 8)) - 1;
        }
        trace!("drew {} secure random bytes", len);
        Ok(Self::build(|r| unsafe {
            gmp::mpz_import(r, len, 1, 1, 0, 0, bytes.as_ptr().cast());
        }))
    }

    /// Returns a cryptographically secure integer uniformly distributed in
    /// `0..bound`.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is not positive.
    pub fn secure_random_below(bound: &Self) -> Result<Self> {
        assert!(
            bound.is_positive(),
            "random bound must be positive, not {}",
            bound,
        );
        // Each draw succeeds with probability above one half.
        let bits = (bound - Integer::from(1)).bit_length() as u32;
        loop {
            let candidate = Self::secure_random_bits(bits)?;
            if candidate < *bound {
                return Ok(candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_random_bits_range() {
        for &bits in &[0, 1, 7, 8, 9, 63, 64, 65, 300] {
            let n = Integer::secure_random_bits(bits).unwrap();
            assert!(!n.is_negative());
            assert!(n.bit_length() <= u64::from(bits));
        }
    }

    #[test]
    fn test_secure_random_below_range() {
        let bound = Integer::from(1000);
        for _ in 0..200 {
            let n = Integer::secure_random_below(&bound).unwrap();
            assert!(!n.is_negative() && n < bound);
        }
        assert_eq!(
            Integer::from(0),
            Integer::secure_random_below(&Integer::from(1)).unwrap(),
        );
    }

    #[test]
    fn test_secure_random_is_not_constant() {
        let draws: Vec<Integer> = (0..8)
            .map(|_| Integer::secure_random_bits(128).unwrap())
            .collect();
        assert!(draws.iter().any(|n| *n != draws[0]));
    }

    #[test]
    #[should_panic(expected = "random bound must be positive")]
    fn test_secure_random_below_negative_panics() {
        let _ = Integer::secure_random_below(&Integer::from(-5));
    }
}
