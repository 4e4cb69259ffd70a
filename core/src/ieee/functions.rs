//! Transcendental functions and constants.
//!
//! Functions whose real domain is restricted return `Err(NumError::Domain)`
//! for arguments outside it instead of a NaN. A NaN argument is never a
//! domain error; it just produces NaN.

use gmp_mpfr_sys::mpfr;
use std::cmp::Ordering;
use std::os::raw::c_int;

use super::arith::UnaryFn;
use super::{IeeeFloat, Round};
use crate::errors::{NumError, Result};

macro_rules! unary_functions {
    ($($(#[$attr:meta])* fn $name:ident => $raw:ident;)+) => {
        impl IeeeFloat {
            $(
                $(#[$attr])*
                pub fn $name(&self, rnd: Round) -> (Self, Ordering) {
                    self.unary_round(rnd, |r, a, rnd| unsafe { mpfr::$raw(r, a, rnd) })
                }
            )+
        }
    };
}

unary_functions! {
    /// Returns `e^self`.
    fn exp => exp;
    /// Returns `2^self`.
    fn exp2 => exp2;
    /// Returns `10^self`.
    fn exp10 => exp10;
    /// Returns `e^self - 1`, accurately for small values.
    fn expm1 => expm1;
    /// Sine.
    fn sin => sin;
    /// Cosine.
    fn cos => cos;
    /// Tangent.
    fn tan => tan;
    /// Arc-tangent.
    fn atan => atan;
    /// Hyperbolic sine.
    fn sinh => sinh;
    /// Hyperbolic cosine.
    fn cosh => cosh;
    /// Hyperbolic tangent.
    fn tanh => tanh;
    /// Inverse hyperbolic sine.
    fn asinh => asinh;
}

impl IeeeFloat {
    fn checked_unary(&self, rnd: Round, in_domain: bool, name: &'static str, f: UnaryFn) -> Result<(Self, Ordering)> {
        if in_domain {
            Ok(self.unary_round(rnd, f))
        } else {
            Err(NumError::Domain(name))
        }
    }

    /// Returns `true` unless the value compares less than `bound`.
    fn not_below(&self, bound: i32) -> bool {
        self.cmp_i32(bound) != Some(Ordering::Less)
    }
    /// Returns `true` unless the value lies outside `[-1, 1]`.
    fn within_unit(&self) -> bool {
        self.not_below(-1) && self.cmp_i32(1) != Some(Ordering::Greater)
    }

    /// Natural logarithm. The logarithm of zero is negative infinity.
    pub fn ln(&self, rnd: Round) -> Result<(Self, Ordering)> {
        self.checked_unary(rnd, self.not_below(0), "ln", |r, a, rnd| unsafe { mpfr::log(r, a, rnd) })
    }
    /// Base-2 logarithm.
    pub fn log2(&self, rnd: Round) -> Result<(Self, Ordering)> {
        self.checked_unary(rnd, self.not_below(0), "log2", |r, a, rnd| unsafe { mpfr::log2(r, a, rnd) })
    }
    /// Base-10 logarithm.
    pub fn log10(&self, rnd: Round) -> Result<(Self, Ordering)> {
        self.checked_unary(rnd, self.not_below(0), "log10", |r, a, rnd| unsafe { mpfr::log10(r, a, rnd) })
    }
    /// Returns `ln(1 + self)`, accurately for small values.
    pub fn log1p(&self, rnd: Round) -> Result<(Self, Ordering)> {
        self.checked_unary(rnd, self.not_below(-1), "log1p", |r, a, rnd| unsafe { mpfr::log1p(r, a, rnd) })
    }
    /// Arc-sine, defined on `[-1, 1]`.
    pub fn asin(&self, rnd: Round) -> Result<(Self, Ordering)> {
        self.checked_unary(rnd, self.within_unit(), "asin", |r, a, rnd| unsafe { mpfr::asin(r, a, rnd) })
    }
    /// Arc-cosine, defined on `[-1, 1]`.
    pub fn acos(&self, rnd: Round) -> Result<(Self, Ordering)> {
        self.checked_unary(rnd, self.within_unit(), "acos", |r, a, rnd| unsafe { mpfr::acos(r, a, rnd) })
    }
    /// Inverse hyperbolic cosine, defined from 1 up.
    pub fn acosh(&self, rnd: Round) -> Result<(Self, Ordering)> {
        self.checked_unary(rnd, self.not_below(1), "acosh", |r, a, rnd| unsafe { mpfr::acosh(r, a, rnd) })
    }
    /// Inverse hyperbolic tangent. The values -1 and 1 give infinities.
    pub fn atanh(&self, rnd: Round) -> Result<(Self, Ordering)> {
        self.checked_unary(rnd, self.within_unit(), "atanh", |r, a, rnd| unsafe { mpfr::atanh(r, a, rnd) })
    }
}

fn constant(prec: u32, f: impl FnOnce(*mut mpfr::mpfr_t) -> c_int) -> (IeeeFloat, Ordering) {
    IeeeFloat::build(prec, f)
}

impl IeeeFloat {
    /// Returns π.
    pub fn pi(prec: u32, rnd: Round) -> (Self, Ordering) {
        constant(prec, |r| unsafe { mpfr::const_pi(r, rnd.raw()) })
    }
    /// Returns Euler's number.
    pub fn e(prec: u32, rnd: Round) -> (Self, Ordering) {
        constant(prec, |r| unsafe {
            mpfr::set_ui(r, 1, mpfr::rnd_t::RNDN);
            mpfr::exp(r, r, rnd.raw())
        })
    }
    /// Returns Catalan's constant.
    pub fn catalan(prec: u32, rnd: Round) -> (Self, Ordering) {
        constant(prec, |r| unsafe { mpfr::const_catalan(r, rnd.raw()) })
    }
    /// Returns the natural logarithm of 2.
    pub fn ln2(prec: u32, rnd: Round) -> (Self, Ordering) {
        constant(prec, |r| unsafe { mpfr::const_log2(r, rnd.raw()) })
    }
    /// Returns the Euler-Mascheroni constant.
    pub fn euler_gamma(prec: u32, rnd: Round) -> (Self, Ordering) {
        constant(prec, |r| unsafe { mpfr::const_euler(r, rnd.raw()) })
    }
}
