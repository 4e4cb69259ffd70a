//! Binary floating-point numbers with a caller-chosen precision.
//!
//! Unlike [`IeeeFloat`](crate::IeeeFloat), a `Float` has no special values
//! and no rounding mode: results are truncated, and the stored precision is
//! rounded up to a whole number of limbs. A fresh `Float` is zero.

use gmp_mpfr_sys::gmp;
use log::debug;
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::*;
use std::os::raw::{c_char, c_ulong};
use std::str::FromStr;

use crate::backend::text;
use crate::cell::StorageCell;
use crate::config;
use crate::errors::{NumError, Result};
use crate::integer::Integer;
use crate::rational::Rational;

/// Arbitrary-precision binary float with value semantics.
#[derive(Clone)]
pub struct Float {
    cell: StorageCell<gmp::mpf_t>,
}

impl Float {
    /// Returns zero at the default precision (see
    /// [`config::float_precision`]).
    pub fn new() -> Self {
        Self::with_prec(config::float_precision())
    }
    /// Returns zero with at least `prec` bits of precision.
    ///
    /// # Panics
    ///
    /// Panics if `prec` is outside `config::float_prec_min()..=config::float_prec_max()`.
    pub fn with_prec(prec: u32) -> Self {
        config::assert_float_prec(prec);
        Self {
            cell: unsafe { StorageCell::new(|raw| gmp::mpf_init2(raw, prec.into())) },
        }
    }

    #[inline]
    pub(crate) fn build(prec: u32, f: impl FnOnce(*mut gmp::mpf_t)) -> Self {
        let mut ret = Self::with_prec(prec);
        ret.cell.write(f);
        ret
    }
    #[inline]
    pub(crate) fn with_raw<R>(&self, f: impl FnOnce(*const gmp::mpf_t) -> R) -> R {
        self.cell.read(f)
    }
    #[inline]
    fn with_raw_mut<R>(&mut self, f: impl FnOnce(*mut gmp::mpf_t) -> R) -> R {
        self.cell.write(f)
    }

    /// Returns `true` if both values currently share backend storage.
    #[inline]
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        self.cell.shares_storage_with(&other.cell)
    }

    /// Converts an `i64` exactly when `prec` is at least 64.
    pub fn from_i64(value: i64, prec: u32) -> Self {
        Self::from_integer(&Integer::from(value), prec)
    }
    /// Converts a `u64` exactly when `prec` is at least 64.
    pub fn from_u64(value: u64, prec: u32) -> Self {
        Self::from_integer(&Integer::from(value), prec)
    }
    /// Converts a finite `f64`, which is exact when `prec` is at least 53.
    pub fn from_f64(value: f64, prec: u32) -> Result<Self> {
        if !value.is_finite() {
            return Err(NumError::NonFiniteValue);
        }
        Ok(Self::build(prec, |raw| unsafe { gmp::mpf_set_d(raw, value) }))
    }
    /// Converts an integer, truncating to `prec` bits.
    pub fn from_integer(value: &Integer, prec: u32) -> Self {
        Self::build(prec, |raw| value.with_raw(|z| unsafe { gmp::mpf_set_z(raw, z) }))
    }
    /// Converts a rational, truncating to `prec` bits.
    pub fn from_rational(value: &Rational, prec: u32) -> Self {
        Self::build(prec, |raw| value.with_raw(|q| unsafe { gmp::mpf_set_q(raw, q) }))
    }

    /// Parses a float such as `"-1.25e3"` (or `"1.8@a"` in radices above
    /// 10, where `@` marks an exponent written in the same radix).
    ///
    /// The numeral is converted exactly and then truncated to `prec`, so
    /// parsing the output of [`to_string_radix`](Self::to_string_radix)
    /// with `digits == 0` gives back the same value.
    ///
    /// A negative radix is accepted for symmetry with output and parses the
    /// same as its absolute value.
    ///
    /// # Panics
    ///
    /// Panics if `radix` is not in the range 2 to 62 or -36 to -2, or if
    /// `prec` is out of range.
    pub fn from_str_radix(s: &str, radix: i32, prec: u32) -> Result<Self> {
        text::assert_output_radix(radix);
        let numeral = text::numeral(s)?;
        let body = numeral.to_str().map_err(|_| NumError::InvalidStringFormat)?;
        if let Some(value) = parse_exact(body, radix.unsigned_abs())? {
            return Ok(Self::from_rational(&value, prec));
        }
        let mut ret = Self::with_prec(prec);
        let status = ret.with_raw_mut(|raw| unsafe {
            gmp::mpf_set_str(raw, numeral.as_ptr(), radix.abs())
        });
        if status == 0 {
            Ok(ret)
        } else {
            Err(NumError::InvalidStringFormat)
        }
    }
    /// Replaces the value with one parsed from a string at the current
    /// precision, leaving it untouched on failure.
    pub fn assign_str(&mut self, s: &str, radix: i32) -> Result<()> {
        *self = Self::from_str_radix(s, radix, self.precision())?;
        Ok(())
    }

    /// Returns the precision in bits. This may be larger than the precision
    /// that was requested.
    pub fn precision(&self) -> u32 {
        let prec = self.with_raw(|raw| unsafe { gmp::mpf_get_prec(raw) });
        u32::try_from(prec).unwrap_or(u32::MAX)
    }
    /// Changes the precision in place. Shrinking the precision truncates the
    /// value.
    ///
    /// # Panics
    ///
    /// Panics if `prec` is out of range.
    pub fn set_precision(&mut self, prec: u32) {
        config::assert_float_prec(prec);
        let old = self.precision();
        if prec < old {
            debug!("truncating float from {} to {} bits", old, prec);
        }
        self.with_raw_mut(|raw| unsafe { gmp::mpf_set_prec(raw, prec.into()) });
    }

    fn binary_op(
        &self,
        other: &Self,
        f: fn(*mut gmp::mpf_t, *const gmp::mpf_t, *const gmp::mpf_t),
    ) -> Self {
        let prec = self.precision().max(other.precision());
        Self::build(prec, |r| self.with_raw(|a| other.with_raw(|b| f(r, a, b))))
    }
    fn unary_op(&self, f: fn(*mut gmp::mpf_t, *const gmp::mpf_t)) -> Self {
        Self::build(self.precision(), |r| self.with_raw(|a| f(r, a)))
    }

    fn add_ref(&self, other: &Self) -> Self {
        self.binary_op(other, |r, a, b| unsafe { gmp::mpf_add(r, a, b) })
    }
    fn sub_ref(&self, other: &Self) -> Self {
        self.binary_op(other, |r, a, b| unsafe { gmp::mpf_sub(r, a, b) })
    }
    fn mul_ref(&self, other: &Self) -> Self {
        self.binary_op(other, |r, a, b| unsafe { gmp::mpf_mul(r, a, b) })
    }
    fn div_ref(&self, other: &Self) -> Self {
        match self.checked_div(other) {
            Ok(q) => q,
            Err(e) => panic!("{}", e),
        }
    }
    fn neg_ref(&self) -> Self {
        self.unary_op(|r, a| unsafe { gmp::mpf_neg(r, a) })
    }

    /// Division that returns an error instead of panicking on a zero divisor.
    pub fn checked_div(&self, divisor: &Self) -> Result<Self> {
        if divisor.is_zero() {
            return Err(NumError::DivisionByZero);
        }
        Ok(self.binary_op(divisor, |r, a, b| unsafe { gmp::mpf_div(r, a, b) }))
    }
    /// Returns the square root, truncated.
    pub fn sqrt(&self) -> Result<Self> {
        if self.is_negative() {
            return Err(NumError::NegativeSquareRoot);
        }
        Ok(self.unary_op(|r, a| unsafe { gmp::mpf_sqrt(r, a) }))
    }
    /// Raises to an integer power, truncated.
    pub fn pow(&self, exp: u32) -> Self {
        Self::build(self.precision(), |r| {
            self.with_raw(|a| unsafe { gmp::mpf_pow_ui(r, a, c_ulong::from(exp)) })
        })
    }
    /// Returns the absolute value.
    pub fn abs(&self) -> Self {
        self.unary_op(|r, a| unsafe { gmp::mpf_abs(r, a) })
    }
    /// Negates the value in place.
    pub fn negate(&mut self) {
        self.with_raw_mut(|raw| unsafe { gmp::mpf_neg(raw, raw) });
    }

    /// Returns `self * 2^exp`.
    ///
    /// # Panics
    ///
    /// Panics if `|exp|` does not fit in the backend's bit count type.
    pub fn scale_pow2(&self, exp: i64) -> Self {
        let bits = match c_ulong::try_from(exp.unsigned_abs()) {
            Ok(bits) => bits,
            Err(_) => panic!("{}", NumError::InvalidExponent(exp)),
        };
        Self::build(self.precision(), |r| {
            self.with_raw(|a| unsafe {
                if exp < 0 {
                    gmp::mpf_div_2exp(r, a, bits)
                } else {
                    gmp::mpf_mul_2exp(r, a, bits)
                }
            })
        })
    }

    /// Rounds toward negative infinity.
    pub fn floor(&self) -> Self {
        self.unary_op(|r, a| unsafe { gmp::mpf_floor(r, a) })
    }
    /// Rounds toward positive infinity.
    pub fn ceil(&self) -> Self {
        self.unary_op(|r, a| unsafe { gmp::mpf_ceil(r, a) })
    }
    /// Rounds toward zero.
    pub fn trunc(&self) -> Self {
        self.unary_op(|r, a| unsafe { gmp::mpf_trunc(r, a) })
    }

    /// Returns the relative difference `|self - other| / |self|`.
    pub fn reldiff(&self, other: &Self) -> Result<Self> {
        if self.is_zero() {
            return Err(NumError::DivisionByZero);
        }
        Ok(self.binary_op(other, |r, a, b| unsafe { gmp::mpf_reldiff(r, a, b) }))
    }

    /// Returns `true` if the values are equal to within a relative difference
    /// of `2^-bits`. Zero is only approximately equal to zero.
    pub fn is_equal(&self, other: &Self, bits: u32) -> bool {
        match self.reldiff(other) {
            Ok(diff) => {
                let tolerance = Self::from_u64(1, diff.precision()).scale_pow2(-i64::from(bits));
                diff.abs() <= tolerance
            }
            Err(_) => other.is_zero(),
        }
    }

    /// Returns the sign relative to zero.
    #[inline]
    pub fn sign(&self) -> Ordering {
        self.with_raw(|raw| unsafe { gmp::mpf_sgn(raw) }).cmp(&0)
    }
    /// Returns -1, 0 or 1.
    #[inline]
    pub fn signum(&self) -> i32 {
        self.sign() as i32
    }
    /// Returns `true` if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.sign() == Ordering::Equal
    }
    /// Returns `true` if the value is below zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.sign() == Ordering::Less
    }
    /// Returns `true` if the value has no fractional part.
    pub fn is_integer(&self) -> bool {
        self.with_raw(|raw| unsafe { gmp::mpf_integer_p(raw) != 0 })
    }

    /// Converts to `f64`, truncating.
    pub fn to_f64(&self) -> f64 {
        self.with_raw(|raw| unsafe { gmp::mpf_get_d(raw) })
    }
    /// Converts to an integer, truncating toward zero.
    pub fn to_integer(&self) -> Integer {
        Integer::build(|z| self.with_raw(|raw| unsafe { gmp::mpz_set_f(z, raw) }))
    }
    /// Converts to a rational exactly.
    pub fn to_rational(&self) -> Rational {
        Rational::from_float(self)
    }

    /// Formats the value in `radix`, with up to `digits` significant digits.
    /// If `digits` is 0, writes as many as it takes to parse the same value
    /// back at the same precision.
    ///
    /// Values with a modest exponent are written positionally. Others use an
    /// exponent marker (`e` for radices up to 10, `@` above), followed by
    /// the exponent written in the same radix.
    ///
    /// # Panics
    ///
    /// Panics if `radix` is not in the range 2 to 62 or -36 to -2.
    pub fn to_string_radix(&self, radix: i32, digits: usize) -> String {
        text::assert_output_radix(radix);
        if digits == 0 {
            return self.to_string_round_trip(radix);
        }
        let (raw_digits, exp) = self.with_raw(|raw| unsafe {
            let mut buf = vec![0_u8; digits + 2];
            let mut exp: gmp::exp_t = 0;
            gmp::mpf_get_str(buf.as_mut_ptr() as *mut c_char, &mut exp, radix, digits, raw);
            (text::from_c_buf(buf), exp)
        });
        format_digits(&raw_digits, i64::from(exp), radix)
    }

    /// Writes enough digits to cover every stored limb, which may be one more
    /// than the precision reports. The last digit is rounded away from zero
    /// and parsing truncates, so the value survives a round trip.
    fn to_string_round_trip(&self, radix: i32) -> String {
        let limbs = self.with_raw(|raw| unsafe { (*raw).size.unsigned_abs() });
        if limbs == 0 {
            return "0".to_owned();
        }
        let bits = limbs.saturating_mul(gmp::NUMB_BITS.unsigned_abs());
        let len = text::digits_for_prec(bits, radix) as i64;
        let base = radix.unsigned_abs();
        let magnitude = self.to_rational().abs();

        // Find `exp` with `base^(exp - 1) <= magnitude < base^exp`.
        let numer_bits = magnitude.numer().bit_length() as f64;
        let denom_bits = magnitude.denom().bit_length() as f64;
        let mut exp = ((numer_bits - denom_bits) / f64::from(base).log2()) as i64;
        while magnitude >= radix_pow(base, exp) {
            exp += 1;
        }
        while magnitude < radix_pow(base, exp - 1) {
            exp -= 1;
        }

        let mantissa = (magnitude * radix_pow(base, len - exp)).ceil();
        let mut raw_digits = mantissa.to_string_radix(radix);
        if raw_digits.len() as i64 > len {
            // Rounding carried into a new leading digit.
            exp += 1;
        }
        if self.is_negative() {
            raw_digits.insert(0, '-');
        }
        format_digits(&raw_digits, exp, radix)
    }
}

/// Largest power of the radix that parsing will evaluate exactly. Beyond it
/// the backend's own approximate conversion is used.
const MAX_EXACT_SCALE: u64 = 1 << 17;

/// Returns `base^exp` exactly.
fn radix_pow(base: u32, exp: i64) -> Rational {
    let power = u32::try_from(exp.unsigned_abs()).unwrap_or(u32::MAX);
    let power = Rational::from(Integer::from(base).pow(power));
    if exp < 0 {
        Rational::from(1) / power
    } else {
        power
    }
}

/// Parses a float numeral to its exact value, or returns `None` if the
/// exponent is too large to expand.
fn parse_exact(numeral: &str, base: u32) -> Result<Option<Rational>> {
    let (negative, body) = match numeral.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, numeral),
    };
    let marker = |c: char| c == '@' || (base <= 10 && (c == 'e' || c == 'E'));
    let (mantissa, exp) = match body.find(marker) {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };
    let (int_part, frac_part) = match mantissa.find('.') {
        Some(i) => (&mantissa[..i], &mantissa[i + 1..]),
        None => (mantissa, ""),
    };
    let digits = format!("{}{}", int_part, frac_part);
    let valid = |s: &str| {
        !s.is_empty() && s.chars().all(|c| text::digit_value(c, base).is_some())
    };
    if !valid(&digits) {
        return Err(NumError::InvalidStringFormat);
    }

    let exp = match exp {
        None => 0,
        Some(e) => {
            let (exp_negative, magnitude) = match e.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, e.strip_prefix('+').unwrap_or(e)),
            };
            if !valid(magnitude) {
                return Err(NumError::InvalidStringFormat);
            }
            let magnitude = Integer::from_str_radix(magnitude, base as i32)?;
            match magnitude.to_i64() {
                Some(m) if exp_negative => -m,
                Some(m) => m,
                None => return Ok(None),
            }
        }
    };
    let scale = match exp.checked_sub(frac_part.len() as i64) {
        Some(scale) if scale.unsigned_abs() <= MAX_EXACT_SCALE => scale,
        _ => return Ok(None),
    };

    let mut value = Rational::from(Integer::from_str_radix(&digits, base as i32)?);
    value *= radix_pow(base, scale);
    if negative {
        value.negate();
    }
    Ok(Some(value))
}

/// Lays out `0.DIGITS * radix^exp`, writing the exponent in the same radix.
fn format_digits(raw_digits: &str, exp: i64, radix: i32) -> String {
    text::format_float_digits(raw_digits, exp, radix, |e| {
        let s = text::int_to_radix(e, radix.unsigned_abs());
        if radix < 0 {
            s.to_uppercase()
        } else {
            s
        }
    })
}

macro_rules! impl_fits {
    ($($method:ident => $t:ty),+ $(,)?) => {
        impl Float {
            $(
                #[doc = concat!("Returns `true` if the value is an integer that fits in `", stringify!($t), "`.")]
                pub fn $method(&self) -> bool {
                    self.is_integer()
                        && self.to_integer().to_i128().map_or(false, |x| <$t>::try_from(x).is_ok())
                }
            )+
        }
    };
}
impl_fits!(
    fits_i8 => i8, fits_i16 => i16, fits_i32 => i32, fits_i64 => i64,
    fits_u8 => u8, fits_u16 => u16, fits_u32 => u32, fits_u64 => u64,
);

forward_binop!(impl Add for Float, add => add_ref);
forward_binop!(impl Sub for Float, sub => sub_ref);
forward_binop!(impl Mul for Float, mul => mul_ref);
forward_binop!(impl Div for Float, div => div_ref);

forward_assign!(impl AddAssign for Float, add_assign => add_ref);
forward_assign!(impl SubAssign for Float, sub_assign => sub_ref);
forward_assign!(impl MulAssign for Float, mul_assign => mul_ref);
forward_assign!(impl DivAssign for Float, div_assign => div_ref);

forward_neg!(impl Neg for Float => neg_ref);

forward_prim_ops!(Float; i32, i64, u32, u64);

impl Default for Float {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! impl_from_primitive {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Float {
                /// Converts at the default precision.
                #[inline]
                fn from(x: $t) -> Self {
                    Self::from_integer(&Integer::from(x), config::float_precision())
                }
            }
        )+
    };
}
impl_from_primitive!(i32, i64, u32, u64);

impl From<&Integer> for Float {
    /// Converts at the default precision.
    fn from(value: &Integer) -> Self {
        Self::from_integer(value, config::float_precision())
    }
}
impl From<&Rational> for Float {
    /// Converts at the default precision.
    fn from(value: &Rational) -> Self {
        Self::from_rational(value, config::float_precision())
    }
}

impl FromStr for Float {
    type Err = NumError;

    /// Parses a decimal float at the default precision.
    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_radix(s, 10, config::float_precision())
    }
}

impl PartialEq for Float {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Float {}
impl PartialOrd for Float {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Float {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.shares_storage_with(other) {
            return Ordering::Equal;
        }
        self.with_raw(|a| other.with_raw(|b| unsafe { gmp::mpf_cmp(a, b) }))
            .cmp(&0)
    }
}

impl Hash for Float {
    /// Hashes the exact value, so that equal values hash alike whatever
    /// their precision.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_rational().hash(state);
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_string_radix(10, 0))
    }
}
impl fmt::Debug for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests;
