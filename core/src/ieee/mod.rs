//! Binary floating-point numbers following IEEE 754 semantics, with an
//! explicit rounding mode on every operation.
//!
//! Each rounded operation returns its result together with a ternary
//! [`Ordering`] comparing the rounded result to the exact one: `Less` when
//! the result was rounded down, `Equal` when it is exact, and `Greater` when
//! it was rounded up.
//!
//! NaN and the infinities are ordinary values. A fresh `IeeeFloat` is NaN.

use gmp_mpfr_sys::mpfr;
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::os::raw::{c_char, c_int};
use std::ptr;

use crate::backend::text;
use crate::cell::StorageCell;
use crate::config;
use crate::errors::{NumError, Result};
use crate::float::Float;
use crate::integer::Integer;
use crate::rational::Rational;

mod arith;
mod flags;
mod functions;
mod round;

pub use flags::ExceptionFlags;
pub use round::Round;

/// Converts a backend ternary value.
#[inline]
pub(crate) fn ternary(t: c_int) -> Ordering {
    t.cmp(&0)
}

#[inline]
fn raw_prec(prec: u32) -> mpfr::prec_t {
    mpfr::prec_t::try_from(prec).unwrap_or(mpfr::PREC_MAX)
}

/// Arbitrary-precision IEEE 754 style float with value semantics.
#[derive(Clone)]
pub struct IeeeFloat {
    cell: StorageCell<mpfr::mpfr_t>,
}

impl IeeeFloat {
    /// Returns NaN at the default precision (see
    /// [`config::ieee_precision`]).
    pub fn new() -> Self {
        Self::with_prec(config::ieee_precision())
    }
    /// Returns NaN with `prec` bits of precision.
    ///
    /// # Panics
    ///
    /// Panics if `prec` is outside `config::ieee_prec_min()..=config::ieee_prec_max()`.
    pub fn with_prec(prec: u32) -> Self {
        config::assert_ieee_prec(prec);
        Self {
            cell: unsafe { StorageCell::new(|raw| mpfr::init2(raw, raw_prec(prec))) },
        }
    }

    /// Creates a value of precision `prec` and lets `f` write into it,
    /// returning the ternary value that `f` reports.
    #[inline]
    pub(crate) fn build(prec: u32, f: impl FnOnce(*mut mpfr::mpfr_t) -> c_int) -> (Self, Ordering) {
        let mut ret = Self::with_prec(prec);
        let dir = ret.cell.write(f);
        (ret, ternary(dir))
    }
    #[inline]
    pub(crate) fn with_raw<R>(&self, f: impl FnOnce(*const mpfr::mpfr_t) -> R) -> R {
        self.cell.read(f)
    }
    #[inline]
    fn with_raw_mut<R>(&mut self, f: impl FnOnce(*mut mpfr::mpfr_t) -> R) -> R {
        self.cell.write(f)
    }

    /// Returns `true` if both values currently share backend storage.
    #[inline]
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        self.cell.shares_storage_with(&other.cell)
    }

    /// Returns NaN.
    pub fn nan(prec: u32) -> Self {
        Self::with_prec(prec)
    }
    /// Returns an infinity with the given sign.
    pub fn infinity(prec: u32, negative: bool) -> Self {
        let sign = if negative { -1 } else { 1 };
        Self::build(prec, |raw| unsafe {
            mpfr::set_inf(raw, sign);
            0
        })
        .0
    }
    /// Returns zero with the given sign.
    pub fn zero(prec: u32, negative: bool) -> Self {
        let sign = if negative { -1 } else { 1 };
        Self::build(prec, |raw| unsafe {
            mpfr::set_zero(raw, sign);
            0
        })
        .0
    }

    /// Converts an `f64`, including NaN and the infinities.
    pub fn from_f64(value: f64, prec: u32, rnd: Round) -> (Self, Ordering) {
        Self::build(prec, |raw| unsafe { mpfr::set_d(raw, value, rnd.raw()) })
    }
    /// Converts an `i64`, rounding if `prec` is below 64.
    pub fn from_i64(value: i64, prec: u32, rnd: Round) -> (Self, Ordering) {
        Self::from_integer(&Integer::from(value), prec, rnd)
    }
    /// Converts an integer, rounding to `prec` bits.
    pub fn from_integer(value: &Integer, prec: u32, rnd: Round) -> (Self, Ordering) {
        Self::build(prec, |raw| value.with_raw(|z| unsafe { mpfr::set_z(raw, z, rnd.raw()) }))
    }
    /// Converts a rational, rounding to `prec` bits.
    pub fn from_rational(value: &Rational, prec: u32, rnd: Round) -> (Self, Ordering) {
        Self::build(prec, |raw| value.with_raw(|q| unsafe { mpfr::set_q(raw, q, rnd.raw()) }))
    }
    /// Converts a `Float`, rounding to `prec` bits.
    pub fn from_float(value: &Float, prec: u32, rnd: Round) -> (Self, Ordering) {
        Self::build(prec, |raw| value.with_raw(|f| unsafe { mpfr::set_f(raw, f, rnd.raw()) }))
    }

    /// Parses a float such as `"-1.25e3"`, `"1.8@10"`, `"nan"`, or `"-inf"`.
    ///
    /// The exponent after `@` (or after `e` in radices up to 10) is always
    /// decimal. A radix of 0 detects `0x` and `0b` prefixes. A negative radix
    /// parses the same as its absolute value. Above radix 16, NaN and the
    /// infinities must be written `@nan@` and `@inf@`.
    ///
    /// # Panics
    ///
    /// Panics if `radix` is not 0, in the range 2 to 62, or in the range -36
    /// to -2, or if `prec` is out of range.
    pub fn from_str_radix(s: &str, radix: i32, prec: u32, rnd: Round) -> Result<(Self, Ordering)> {
        if radix != 0 {
            text::assert_output_radix(radix);
        }
        let s = s.trim();
        let special = s.strip_prefix('+').unwrap_or(s).to_ascii_lowercase();
        let (negative, word) = match special.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, special.as_str()),
        };
        // Above radix 16 the plain spellings are ordinary numerals.
        let plain = radix.abs() <= 16;
        match word {
            "@nan@" => return Ok((Self::nan(prec), Ordering::Equal)),
            "@inf@" => return Ok((Self::infinity(prec, negative), Ordering::Equal)),
            "nan" if plain => return Ok((Self::nan(prec), Ordering::Equal)),
            "inf" | "infinity" if plain => {
                return Ok((Self::infinity(prec, negative), Ordering::Equal))
            }
            _ => {}
        }
        let numeral = text::numeral(s)?;
        let mut ret = Self::with_prec(prec);
        let (dir, consumed) = ret.with_raw_mut(|raw| unsafe {
            let start = numeral.as_ptr();
            let mut end: *mut c_char = ptr::null_mut();
            let dir = mpfr::strtofr(raw, start, &mut end, radix.abs(), rnd.raw());
            (dir, (end as *const c_char).offset_from(start))
        });
        let len = numeral.as_bytes().len();
        if usize::try_from(consumed).ok() == Some(len) {
            Ok((ret, ternary(dir)))
        } else {
            Err(NumError::InvalidStringFormat)
        }
    }
    /// Replaces the value with one parsed from a string at the current
    /// precision, leaving it untouched on failure.
    pub fn assign_str(&mut self, s: &str, radix: i32, rnd: Round) -> Result<Ordering> {
        let (value, dir) = Self::from_str_radix(s, radix, self.precision(), rnd)?;
        *self = value;
        Ok(dir)
    }

    /// Returns the precision in bits.
    pub fn precision(&self) -> u32 {
        let prec = self.with_raw(|raw| unsafe { mpfr::get_prec(raw) });
        u32::try_from(prec).unwrap_or(u32::MAX)
    }
    /// Changes the precision in place, discarding the value: the result is
    /// NaN. Use [`round_to_precision`](Self::round_to_precision) to keep the
    /// value.
    ///
    /// # Panics
    ///
    /// Panics if `prec` is out of range.
    pub fn set_precision(&mut self, prec: u32) {
        config::assert_ieee_prec(prec);
        self.with_raw_mut(|raw| unsafe { mpfr::set_prec(raw, raw_prec(prec)) });
    }
    /// Changes the precision in place, rounding the value to fit.
    ///
    /// # Panics
    ///
    /// Panics if `prec` is out of range.
    pub fn round_to_precision(&mut self, prec: u32, rnd: Round) -> Ordering {
        config::assert_ieee_prec(prec);
        let old = self.precision();
        if prec < old {
            log::debug!("rounding float from {} to {} bits", old, prec);
        }
        ternary(self.with_raw_mut(|raw| unsafe { mpfr::prec_round(raw, raw_prec(prec), rnd.raw()) }))
    }

    /// Returns `true` if the value is NaN.
    #[inline]
    pub fn is_nan(&self) -> bool {
        self.with_raw(|raw| unsafe { mpfr::nan_p(raw) != 0 })
    }
    /// Returns `true` for either infinity.
    #[inline]
    pub fn is_infinite(&self) -> bool {
        self.with_raw(|raw| unsafe { mpfr::inf_p(raw) != 0 })
    }
    /// Returns `true` if the value is neither NaN nor infinite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.with_raw(|raw| unsafe { mpfr::number_p(raw) != 0 })
    }
    /// Returns `true` for both positive and negative zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.with_raw(|raw| unsafe { mpfr::zero_p(raw) != 0 })
    }
    /// Returns `true` if the value is a finite integer.
    #[inline]
    pub fn is_integer(&self) -> bool {
        self.with_raw(|raw| unsafe { mpfr::integer_p(raw) != 0 })
    }
    /// Returns `true` if the sign bit is set, including for negative zero.
    #[inline]
    pub fn is_sign_negative(&self) -> bool {
        self.with_raw(|raw| unsafe { mpfr::signbit(raw) != 0 })
    }

    /// Compares with a small integer, returning `None` for NaN.
    pub(crate) fn cmp_i32(&self, value: i32) -> Option<Ordering> {
        if self.is_nan() {
            return None;
        }
        Some(self.with_raw(|raw| unsafe { mpfr::cmp_si(raw, value.into()) }).cmp(&0))
    }

    /// Converts to `f64`, rounding in the direction `rnd`.
    pub fn to_f64(&self, rnd: Round) -> f64 {
        self.with_raw(|raw| unsafe { mpfr::get_d(raw, rnd.raw()) })
    }
    /// Rounds to an integer, or returns `None` for NaN and the infinities.
    pub fn to_integer(&self, rnd: Round) -> Option<Integer> {
        if !self.is_finite() {
            return None;
        }
        Some(Integer::build(|z| self.with_raw(|raw| unsafe {
            mpfr::get_z(z, raw, rnd.raw());
        })))
    }
    /// Converts to a rational exactly, failing for NaN and the infinities.
    pub fn to_rational(&self) -> Result<Rational> {
        Rational::try_from(self)
    }

    /// Formats the value in `radix` with up to `digits` significant digits,
    /// rounding to nearest, or with enough digits to read back the same value
    /// if `digits` is 0.
    ///
    /// The exponent after the marker (`e` for radices up to 10, `@` above) is
    /// decimal. Special values are written `NaN` and `inf`, or `@NaN@` and
    /// `@inf@` above radix 16.
    ///
    /// # Panics
    ///
    /// Panics if `radix` is not in the range 2 to 62 or -36 to -2.
    pub fn to_string_radix(&self, radix: i32, digits: usize) -> String {
        text::assert_output_radix(radix);
        if !self.is_finite() {
            let word = if self.is_nan() { "NaN" } else { "inf" };
            let sign = if self.is_infinite() && self.is_sign_negative() { "-" } else { "" };
            return if radix.abs() <= 16 {
                format!("{}{}", sign, word)
            } else {
                format!("{}@{}@", sign, word)
            };
        }
        let len = match digits {
            0 => text::digits_for_prec(self.precision(), radix),
            n => n,
        };
        let (raw_digits, exp) = self.with_raw(|raw| unsafe {
            // Room for a sign and the NUL, and at least enough for the
            // backend's own special-value spellings.
            let mut buf = vec![0_u8; (len + 2).max(7)];
            let mut exp: mpfr::exp_t = 0;
            mpfr::get_str(
                buf.as_mut_ptr() as *mut c_char,
                &mut exp,
                radix.abs(),
                len,
                raw,
                mpfr::rnd_t::RNDN,
            );
            (text::from_c_buf(buf), exp)
        });
        let raw_digits = if radix < 0 { raw_digits.to_uppercase() } else { raw_digits };
        let s = text::format_float_digits(&raw_digits, i64::from(exp), radix, |e| e.to_string());
        if s == "0" && self.is_sign_negative() {
            "-0".to_owned()
        } else {
            s
        }
    }
}

macro_rules! impl_fits {
    ($($method:ident => $t:ty),+ $(,)?) => {
        impl IeeeFloat {
            $(
                #[doc = concat!("Returns `true` if the value is an integer that fits in `", stringify!($t), "`.")]
                pub fn $method(&self) -> bool {
                    self.is_integer()
                        && self
                            .to_integer(Round::Zero)
                            .and_then(|x| x.to_i128())
                            .map_or(false, |x| <$t>::try_from(x).is_ok())
                }
            )+
        }
    };
}
impl_fits!(
    fits_i8 => i8, fits_i16 => i16, fits_i32 => i32, fits_i64 => i64,
    fits_u8 => u8, fits_u16 => u16, fits_u32 => u32, fits_u64 => u64,
);

impl Default for IeeeFloat {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl std::str::FromStr for IeeeFloat {
    type Err = NumError;

    /// Parses a decimal float at the default precision, rounding with the
    /// default rounding mode.
    fn from_str(s: &str) -> Result<Self> {
        Ok(Self::from_str_radix(s, 10, config::ieee_precision(), config::rounding())?.0)
    }
}

impl PartialEq for IeeeFloat {
    fn eq(&self, other: &Self) -> bool {
        self.with_raw(|a| other.with_raw(|b| unsafe { mpfr::equal_p(a, b) != 0 }))
    }
}
impl PartialOrd for IeeeFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.with_raw(|a| {
            other.with_raw(|b| unsafe {
                if mpfr::unordered_p(a, b) != 0 {
                    None
                } else {
                    Some(mpfr::cmp(a, b).cmp(&0))
                }
            })
        })
    }
}

impl Hash for IeeeFloat {
    /// Hashes the exact value, so that equal values hash alike whatever
    /// their precision. Both zeros hash alike.
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_nan() {
            0_u8.hash(state);
        } else if self.is_infinite() {
            (if self.is_sign_negative() { 1_u8 } else { 2_u8 }).hash(state);
        } else if let Ok(q) = self.to_rational() {
            3_u8.hash(state);
            q.hash(state);
        }
    }
}

impl fmt::Display for IeeeFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_string_radix(10, 0))
    }
}
impl fmt::Debug for IeeeFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests;
