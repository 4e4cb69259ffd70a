//! Conversions to and from the `num` crate's types and traits.

use gmp_mpfr_sys::gmp;
use num::bigint::Sign;
use num::{BigInt, FromPrimitive, Num, One, ToPrimitive, Zero};
use std::convert::TryFrom;
use std::os::raw::c_void;

use super::Integer;
use crate::errors::NumError;

impl Integer {
    /// Converts to a `num::BigInt`.
    pub fn to_bigint(&self) -> BigInt {
        let sign = match self.signum() {
            -1 => Sign::Minus,
            0 => return BigInt::zero(),
            _ => Sign::Plus,
        };
        let bytes = self.with_raw(|raw| unsafe {
            let len = (gmp::mpz_sizeinbase(raw, 2) + 7) / 8;
            let mut bytes = vec![0_u8; len];
            let mut count = 0_usize;
            gmp::mpz_export(
                bytes.as_mut_ptr() as *mut c_void,
                &mut count,
                -1,
                1,
                0,
                0,
                raw,
            );
            bytes.truncate(count);
            bytes
        });
        BigInt::from_bytes_le(sign, &bytes)
    }
}

impl From<&BigInt> for Integer {
    fn from(n: &BigInt) -> Self {
        let (sign, bytes) = n.to_bytes_le();
        Self::build(|raw| unsafe {
            gmp::mpz_import(raw, bytes.len(), -1, 1, 0, 0, bytes.as_ptr() as *const c_void);
            if sign == Sign::Minus {
                gmp::mpz_neg(raw, raw);
            }
        })
    }
}
impl From<BigInt> for Integer {
    fn from(n: BigInt) -> Self {
        Self::from(&n)
    }
}

impl Zero for Integer {
    #[inline]
    fn zero() -> Self {
        Self::new()
    }
    #[inline]
    fn is_zero(&self) -> bool {
        Integer::is_zero(self)
    }
}
impl One for Integer {
    #[inline]
    fn one() -> Self {
        Self::from(1)
    }
}

impl Num for Integer {
    type FromStrRadixErr = NumError;

    fn from_str_radix(s: &str, radix: u32) -> Result<Self, NumError> {
        let radix = i32::try_from(radix).map_err(|_| NumError::InvalidRadix(i32::MAX))?;
        if !(2..=62).contains(&radix) {
            return Err(NumError::InvalidRadix(radix));
        }
        Integer::from_str_radix(s, radix)
    }
}

impl ToPrimitive for Integer {
    #[inline]
    fn to_i64(&self) -> Option<i64> {
        Integer::to_i64(self)
    }
    #[inline]
    fn to_u64(&self) -> Option<u64> {
        Integer::to_u64(self)
    }
    #[inline]
    fn to_i128(&self) -> Option<i128> {
        Integer::to_i128(self)
    }
    #[inline]
    fn to_u128(&self) -> Option<u128> {
        Integer::to_u128(self)
    }
    #[inline]
    fn to_f64(&self) -> Option<f64> {
        Some(Integer::to_f64(self))
    }
}

impl FromPrimitive for Integer {
    #[inline]
    fn from_i64(n: i64) -> Option<Self> {
        Some(Self::from(n))
    }
    #[inline]
    fn from_u64(n: u64) -> Option<Self> {
        Some(Self::from(n))
    }
    #[inline]
    fn from_i128(n: i128) -> Option<Self> {
        Some(Self::from(n))
    }
    #[inline]
    fn from_u128(n: u128) -> Option<Self> {
        Some(Self::from(n))
    }
    #[inline]
    fn from_f64(n: f64) -> Option<Self> {
        Self::try_from(n).ok()
    }
}
