//! Arithmetic operators and the division families.
//!
//! Quotient/remainder pairs always satisfy `n == q * d + r` with `|r| < |d|`.
//! The families differ in the sign of the remainder:
//!
//! - truncated: `r` has the sign of the dividend (quotient rounds toward 0)
//! - floored: `r` has the sign of the divisor (quotient rounds toward -inf)
//! - ceiled: `r` has the opposite sign of the divisor (quotient rounds toward
//!   +inf)

use gmp_mpfr_sys::gmp;
use std::os::raw::c_ulong;
use std::ops::*;

use super::Integer;
use crate::errors::{NumError, Result};

type DivRemFn = fn(*mut gmp::mpz_t, *mut gmp::mpz_t, *const gmp::mpz_t, *const gmp::mpz_t);

impl Integer {
    fn add_ref(&self, other: &Self) -> Self {
        Self::build(|r| self.with_raw(|a| other.with_raw(|b| unsafe { gmp::mpz_add(r, a, b) })))
    }
    fn sub_ref(&self, other: &Self) -> Self {
        Self::build(|r| self.with_raw(|a| other.with_raw(|b| unsafe { gmp::mpz_sub(r, a, b) })))
    }
    fn mul_ref(&self, other: &Self) -> Self {
        Self::build(|r| self.with_raw(|a| other.with_raw(|b| unsafe { gmp::mpz_mul(r, a, b) })))
    }
    fn div_ref(&self, other: &Self) -> Self {
        match self.checked_div(other) {
            Ok(q) => q,
            Err(e) => panic!("{}", e),
        }
    }
    fn rem_ref(&self, other: &Self) -> Self {
        match self.checked_rem(other) {
            Ok(r) => r,
            Err(e) => panic!("{}", e),
        }
    }
    fn neg_ref(&self) -> Self {
        Self::build(|r| self.with_raw(|a| unsafe { gmp::mpz_neg(r, a) }))
    }

    /// Returns the absolute value.
    pub fn abs(&self) -> Self {
        Self::build(|r| self.with_raw(|a| unsafe { gmp::mpz_abs(r, a) }))
    }

    /// Negates the integer in place.
    pub fn negate(&mut self) {
        self.with_raw_mut(|r| unsafe { gmp::mpz_neg(r, r) });
    }

    /// Raises the integer to a power.
    pub fn pow(&self, exp: u32) -> Self {
        Self::build(|r| self.with_raw(|a| unsafe { gmp::mpz_pow_ui(r, a, c_ulong::from(exp)) }))
    }

    fn div_rem_by(&self, divisor: &Self, f: DivRemFn) -> Result<(Self, Self)> {
        if divisor.is_zero() {
            return Err(NumError::DivisionByZero);
        }
        let mut q = Self::new();
        let mut r = Self::new();
        q.with_raw_mut(|q| {
            r.with_raw_mut(|r| self.with_raw(|n| divisor.with_raw(|d| f(q, r, n, d))))
        });
        Ok((q, r))
    }

    /// Returns the quotient rounded toward zero and the remainder, which has
    /// the sign of `self`.
    pub fn div_rem_trunc(&self, divisor: &Self) -> Result<(Self, Self)> {
        self.div_rem_by(divisor, |q, r, n, d| unsafe { gmp::mpz_tdiv_qr(q, r, n, d) })
    }
    /// Returns the quotient rounded toward negative infinity and the
    /// remainder, which has the sign of `divisor`.
    pub fn div_rem_floor(&self, divisor: &Self) -> Result<(Self, Self)> {
        self.div_rem_by(divisor, |q, r, n, d| unsafe { gmp::mpz_fdiv_qr(q, r, n, d) })
    }
    /// Returns the quotient rounded toward positive infinity and the
    /// remainder, which has the opposite sign of `divisor`.
    pub fn div_rem_ceil(&self, divisor: &Self) -> Result<(Self, Self)> {
        self.div_rem_by(divisor, |q, r, n, d| unsafe { gmp::mpz_cdiv_qr(q, r, n, d) })
    }

    /// Floored integer division.
    #[inline]
    pub fn div_floor(&self, divisor: &Self) -> Result<Self> {
        Ok(self.div_rem_floor(divisor)?.0)
    }
    /// Floored integer modulo.
    #[inline]
    pub fn mod_floor(&self, divisor: &Self) -> Result<Self> {
        Ok(self.div_rem_floor(divisor)?.1)
    }
    /// Ceiled integer division.
    #[inline]
    pub fn div_ceil(&self, divisor: &Self) -> Result<Self> {
        Ok(self.div_rem_ceil(divisor)?.0)
    }
    /// Integer division that rounds toward zero, like the `/` operator but
    /// without panicking.
    #[inline]
    pub fn checked_div(&self, divisor: &Self) -> Result<Self> {
        Ok(self.div_rem_trunc(divisor)?.0)
    }
    /// Remainder of integer division that rounds toward zero, like the `%`
    /// operator but without panicking.
    #[inline]
    pub fn checked_rem(&self, divisor: &Self) -> Result<Self> {
        Ok(self.div_rem_trunc(divisor)?.1)
    }

    /// Returns the non-negative residue of `self` modulo `|modulus|`.
    pub fn modulo(&self, modulus: &Self) -> Result<Self> {
        if modulus.is_zero() {
            return Err(NumError::DivisionByZero);
        }
        Ok(Self::build(|r| {
            self.with_raw(|n| modulus.with_raw(|m| unsafe { gmp::mpz_mod(r, n, m) }))
        }))
    }
}

forward_binop!(impl Add for Integer, add => add_ref);
forward_binop!(impl Sub for Integer, sub => sub_ref);
forward_binop!(impl Mul for Integer, mul => mul_ref);
forward_binop!(impl Div for Integer, div => div_ref);
forward_binop!(impl Rem for Integer, rem => rem_ref);

forward_assign!(impl AddAssign for Integer, add_assign => add_ref);
forward_assign!(impl SubAssign for Integer, sub_assign => sub_ref);
forward_assign!(impl MulAssign for Integer, mul_assign => mul_ref);
forward_assign!(impl DivAssign for Integer, div_assign => div_ref);
forward_assign!(impl RemAssign for Integer, rem_assign => rem_ref);

forward_neg!(impl Neg for Integer => neg_ref);

forward_prim_ops!(Integer; i32, i64, u32, u64);

impl std::iter::Sum for Integer {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::new(), |acc, x| acc + x)
    }
}
impl std::iter::Product for Integer {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::from(1), |acc, x| acc * x)
    }
}
