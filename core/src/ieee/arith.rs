//! Correctly rounded arithmetic.
//!
//! Binary operations produce a result with the larger of the two operand
//! precisions. The `std::ops` operators round with [`config::rounding`] and
//! discard the ternary value.

use gmp_mpfr_sys::mpfr;
use std::cmp::Ordering;
use std::ops::*;
use std::os::raw::c_int;

use super::{IeeeFloat, Round};
use crate::config;
use crate::errors::{NumError, Result};

type BinaryFn = fn(*mut mpfr::mpfr_t, *const mpfr::mpfr_t, *const mpfr::mpfr_t, mpfr::rnd_t) -> c_int;
pub(super) type UnaryFn = fn(*mut mpfr::mpfr_t, *const mpfr::mpfr_t, mpfr::rnd_t) -> c_int;

impl IeeeFloat {
    fn binary_round(&self, other: &Self, rnd: Round, f: BinaryFn) -> (Self, Ordering) {
        let prec = self.precision().max(other.precision());
        Self::build(prec, |r| self.with_raw(|a| other.with_raw(|b| f(r, a, b, rnd.raw()))))
    }
    pub(super) fn unary_round(&self, rnd: Round, f: UnaryFn) -> (Self, Ordering) {
        Self::build(self.precision(), |r| self.with_raw(|a| f(r, a, rnd.raw())))
    }

    /// Adds, rounding in the direction `rnd`.
    pub fn add_round(&self, other: &Self, rnd: Round) -> (Self, Ordering) {
        self.binary_round(other, rnd, |r, a, b, rnd| unsafe { mpfr::add(r, a, b, rnd) })
    }
    /// Subtracts, rounding in the direction `rnd`.
    pub fn sub_round(&self, other: &Self, rnd: Round) -> (Self, Ordering) {
        self.binary_round(other, rnd, |r, a, b, rnd| unsafe { mpfr::sub(r, a, b, rnd) })
    }
    /// Multiplies, rounding in the direction `rnd`.
    pub fn mul_round(&self, other: &Self, rnd: Round) -> (Self, Ordering) {
        self.binary_round(other, rnd, |r, a, b, rnd| unsafe { mpfr::mul(r, a, b, rnd) })
    }
    /// Divides, producing an infinity (and raising the divide-by-zero flag)
    /// for a finite non-zero value divided by zero.
    pub fn div_round(&self, other: &Self, rnd: Round) -> (Self, Ordering) {
        self.binary_round(other, rnd, |r, a, b, rnd| unsafe { mpfr::div(r, a, b, rnd) })
    }
    /// Raises `self` to the power `exp`.
    pub fn pow_round(&self, exp: &Self, rnd: Round) -> (Self, Ordering) {
        self.binary_round(exp, rnd, |r, a, b, rnd| unsafe { mpfr::pow(r, a, b, rnd) })
    }
    /// Returns the arc-tangent of `self / x`, using the signs of both to pick
    /// the quadrant.
    pub fn atan2_round(&self, x: &Self, rnd: Round) -> (Self, Ordering) {
        self.binary_round(x, rnd, |r, y, x, rnd| unsafe { mpfr::atan2(r, y, x, rnd) })
    }

    /// Returns the square root. The square root of negative zero is negative
    /// zero.
    pub fn sqrt_round(&self, rnd: Round) -> Result<(Self, Ordering)> {
        if self.cmp_i32(0) == Some(Ordering::Less) {
            return Err(NumError::NegativeSquareRoot);
        }
        Ok(self.unary_round(rnd, |r, a, rnd| unsafe { mpfr::sqrt(r, a, rnd) }))
    }

    /// Negates, rounding only if the precision requires it (it never does
    /// for a value of the same precision).
    pub fn neg_round(&self, rnd: Round) -> (Self, Ordering) {
        self.unary_round(rnd, |r, a, rnd| unsafe { mpfr::neg(r, a, rnd) })
    }
    /// Returns the absolute value.
    pub fn abs_round(&self, rnd: Round) -> (Self, Ordering) {
        self.unary_round(rnd, |r, a, rnd| unsafe { mpfr::abs(r, a, rnd) })
    }
    /// Flips the sign in place.
    pub fn negate(&mut self) {
        self.with_raw_mut(|raw| unsafe { mpfr::neg(raw, raw, mpfr::rnd_t::RNDN) });
    }

    /// Rounds to an integer toward negative infinity, then rounds that to
    /// the precision with `rnd`.
    pub fn floor_round(&self, rnd: Round) -> (Self, Ordering) {
        self.unary_round(rnd, |r, a, rnd| unsafe { mpfr::rint_floor(r, a, rnd) })
    }
    /// Rounds to an integer toward positive infinity, then rounds that to
    /// the precision with `rnd`.
    pub fn ceil_round(&self, rnd: Round) -> (Self, Ordering) {
        self.unary_round(rnd, |r, a, rnd| unsafe { mpfr::rint_ceil(r, a, rnd) })
    }
    /// Rounds to an integer toward zero, then rounds that to the precision
    /// with `rnd`.
    pub fn trunc_round(&self, rnd: Round) -> (Self, Ordering) {
        self.unary_round(rnd, |r, a, rnd| unsafe { mpfr::rint_trunc(r, a, rnd) })
    }
    /// Rounds to the nearest integer with ties away from zero, then rounds
    /// that to the precision with `rnd`.
    pub fn round_round(&self, rnd: Round) -> (Self, Ordering) {
        self.unary_round(rnd, |r, a, rnd| unsafe { mpfr::rint_round(r, a, rnd) })
    }

    fn add_ref(&self, other: &Self) -> Self {
        self.add_round(other, config::rounding()).0
    }
    fn sub_ref(&self, other: &Self) -> Self {
        self.sub_round(other, config::rounding()).0
    }
    fn mul_ref(&self, other: &Self) -> Self {
        self.mul_round(other, config::rounding()).0
    }
    fn div_ref(&self, other: &Self) -> Self {
        self.div_round(other, config::rounding()).0
    }
    fn neg_ref(&self) -> Self {
        self.neg_round(Round::Nearest).0
    }
}

forward_binop!(impl Add for IeeeFloat, add => add_ref);
forward_binop!(impl Sub for IeeeFloat, sub => sub_ref);
forward_binop!(impl Mul for IeeeFloat, mul => mul_ref);
forward_binop!(impl Div for IeeeFloat, div => div_ref);

forward_assign!(impl AddAssign for IeeeFloat, add_assign => add_ref);
forward_assign!(impl SubAssign for IeeeFloat, sub_assign => sub_ref);
forward_assign!(impl MulAssign for IeeeFloat, mul_assign => mul_ref);
forward_assign!(impl DivAssign for IeeeFloat, div_assign => div_ref);

forward_neg!(impl Neg for IeeeFloat => neg_ref);
