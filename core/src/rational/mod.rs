//! Exact rational numbers.
//!
//! Every `Rational` is kept in canonical form: the denominator is positive
//! and shares no factor with the numerator. Every constructor and mutator
//! canonicalizes before returning, so equality, ordering, and hashing can
//! all work on the stored representation directly.

use gmp_mpfr_sys::{gmp, mpfr};
use num::{One, Zero};
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::*;
use std::os::raw::{c_char, c_ulong};
use std::str::FromStr;

use crate::backend::text;
use crate::cell::StorageCell;
use crate::errors::{NumError, Result};
use crate::float::Float;
use crate::ieee::IeeeFloat;
use crate::integer::{self, Integer};

type DivFn = fn(*mut gmp::mpz_t, *const gmp::mpz_t, *const gmp::mpz_t);

/// Exact fraction with value semantics, always in lowest terms.
///
/// Cloning a `Rational` is O(1); the copies share storage until one is
/// mutated.
#[derive(Clone)]
pub struct Rational {
    cell: StorageCell<gmp::mpq_t>,
}

impl Rational {
    /// Returns `num / den` in lowest terms.
    ///
    /// ```
    /// # use cownum_core::Rational;
    /// assert_eq!("1/2", Rational::new(2, 4).unwrap().to_string());
    /// assert_eq!("-1/3", Rational::new(3, -9).unwrap().to_string());
    /// ```
    pub fn new(num: impl Into<Integer>, den: impl Into<Integer>) -> Result<Self> {
        let (num, den) = (num.into(), den.into());
        if den.is_zero() {
            return Err(NumError::DivisionByZero);
        }
        Ok(Self::build(|q| unsafe {
            num.with_raw(|n| gmp::mpz_set(&mut (*q).num, n));
            den.with_raw(|d| gmp::mpz_set(&mut (*q).den, d));
            gmp::mpq_canonicalize(q);
        }))
    }

    fn zero_value() -> Self {
        Self {
            cell: unsafe { StorageCell::new(|raw| gmp::mpq_init(raw)) },
        }
    }
    /// Creates a zero and lets `f` write the actual value into its (unshared)
    /// storage. `f` must leave the record in canonical form.
    #[inline]
    pub(crate) fn build(f: impl FnOnce(*mut gmp::mpq_t)) -> Self {
        let mut ret = Self::zero_value();
        ret.cell.write(f);
        ret
    }
    #[inline]
    pub(crate) fn with_raw<R>(&self, f: impl FnOnce(*const gmp::mpq_t) -> R) -> R {
        self.cell.read(f)
    }
    #[inline]
    fn with_raw_mut<R>(&mut self, f: impl FnOnce(*mut gmp::mpq_t) -> R) -> R {
        self.cell.write(f)
    }

    /// Returns `true` if both values currently share backend storage.
    #[inline]
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        self.cell.shares_storage_with(&other.cell)
    }

    /// Converts a `Float` exactly.
    pub fn from_float(f: &Float) -> Self {
        Self::build(|q| f.with_raw(|raw| unsafe { gmp::mpq_set_f(q, raw) }))
    }

    /// Parses `"n/d"` or `"n"` in the given radix.
    ///
    /// A radix of 0 detects the radix of each part separately from its
    /// prefix, as in [`Integer::from_str_radix`].
    ///
    /// # Panics
    ///
    /// Panics if `radix` is not 0 or in the range 2 to 62.
    pub fn from_str_radix(s: &str, radix: i32) -> Result<Self> {
        text::assert_parse_radix(radix);
        if s.trim().contains(char::is_whitespace) {
            return Err(NumError::InvalidStringFormat);
        }
        match s.split_once('/') {
            Some((num, den)) => Self::new(
                Integer::from_str_radix(num, radix)?,
                Integer::from_str_radix(den, radix)?,
            ),
            None => Ok(Self::from(Integer::from_str_radix(s, radix)?)),
        }
    }
    /// Replaces the value with one parsed from a string, leaving it untouched
    /// on failure.
    pub fn assign_str(&mut self, s: &str, radix: i32) -> Result<()> {
        *self = Self::from_str_radix(s, radix)?;
        Ok(())
    }

    /// Formats the rational as `"n/d"`, or as `"n"` if it is an integer.
    ///
    /// # Panics
    ///
    /// Panics if `radix` is not in the range 2 to 62 or -36 to -2.
    pub fn to_string_radix(&self, radix: i32) -> String {
        text::assert_output_radix(radix);
        self.with_raw(|q| unsafe {
            let base = radix.abs();
            // Sign, slash, and NUL.
            let len = gmp::mpz_sizeinbase(&(*q).num, base) + gmp::mpz_sizeinbase(&(*q).den, base) + 3;
            let mut buf = vec![0_u8; len];
            gmp::mpq_get_str(buf.as_mut_ptr() as *mut c_char, radix, q);
            text::from_c_buf(buf)
        })
    }

    /// Returns the numerator, which carries the sign.
    pub fn numer(&self) -> Integer {
        Integer::build(|r| self.with_raw(|q| unsafe { gmp::mpz_set(r, &(*q).num) }))
    }
    /// Returns the denominator, which is always positive.
    pub fn denom(&self) -> Integer {
        Integer::build(|r| self.with_raw(|q| unsafe { gmp::mpz_set(r, &(*q).den) }))
    }

    /// Replaces the numerator and reduces to lowest terms.
    pub fn set_numerator(&mut self, num: &Integer) {
        self.with_raw_mut(|q| unsafe {
            num.with_raw(|n| gmp::mpz_set(&mut (*q).num, n));
            gmp::mpq_canonicalize(q);
        });
    }
    /// Replaces the denominator and reduces to lowest terms. A zero
    /// denominator is rejected and leaves the value untouched.
    pub fn set_denominator(&mut self, den: &Integer) -> Result<()> {
        if den.is_zero() {
            return Err(NumError::DivisionByZero);
        }
        self.with_raw_mut(|q| unsafe {
            den.with_raw(|d| gmp::mpz_set(&mut (*q).den, d));
            gmp::mpq_canonicalize(q);
        });
        Ok(())
    }

    fn add_ref(&self, other: &Self) -> Self {
        Self::build(|r| self.with_raw(|a| other.with_raw(|b| unsafe { gmp::mpq_add(r, a, b) })))
    }
    fn sub_ref(&self, other: &Self) -> Self {
        Self::build(|r| self.with_raw(|a| other.with_raw(|b| unsafe { gmp::mpq_sub(r, a, b) })))
    }
    fn mul_ref(&self, other: &Self) -> Self {
        Self::build(|r| self.with_raw(|a| other.with_raw(|b| unsafe { gmp::mpq_mul(r, a, b) })))
    }
    fn div_ref(&self, other: &Self) -> Self {
        match self.checked_div(other) {
            Ok(q) => q,
            Err(e) => panic!("{}", e),
        }
    }
    fn neg_ref(&self) -> Self {
        Self::build(|r| self.with_raw(|a| unsafe { gmp::mpq_neg(r, a) }))
    }

    /// Division that returns an error instead of panicking on a zero divisor.
    pub fn checked_div(&self, divisor: &Self) -> Result<Self> {
        if divisor.is_zero() {
            return Err(NumError::DivisionByZero);
        }
        Ok(Self::build(|r| {
            self.with_raw(|a| divisor.with_raw(|b| unsafe { gmp::mpq_div(r, a, b) }))
        }))
    }
    /// Returns `1 / self`.
    pub fn recip(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(NumError::DivisionByZero);
        }
        Ok(Self::build(|r| self.with_raw(|a| unsafe { gmp::mpq_inv(r, a) })))
    }
    /// Returns the absolute value.
    pub fn abs(&self) -> Self {
        Self::build(|r| self.with_raw(|a| unsafe { gmp::mpq_abs(r, a) }))
    }
    /// Negates the value in place.
    pub fn negate(&mut self) {
        self.with_raw_mut(|q| unsafe { gmp::mpq_neg(q, q) });
    }

    /// Raises the value to an integer power. Zero to a negative power is a
    /// division by zero.
    pub fn pow(&self, exp: i32) -> Result<Self> {
        let base = if exp < 0 { self.recip()? } else { self.clone() };
        let (num, den) = (base.numer().pow(exp.unsigned_abs()), base.denom().pow(exp.unsigned_abs()));
        // Powers of coprime values are coprime, and the denominator stays
        // positive, so this is already canonical.
        Ok(Self::build(|q| unsafe {
            num.with_raw(|n| gmp::mpz_set(&mut (*q).num, n));
            den.with_raw(|d| gmp::mpz_set(&mut (*q).den, d));
        }))
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
        Self::build(|r| {
            self.with_raw(|a| unsafe {
                if exp < 0 {
                    gmp::mpq_div_2exp(r, a, bits)
                } else {
                    gmp::mpq_mul_2exp(r, a, bits)
                }
            })
        })
    }

    fn div_num_den(&self, f: DivFn) -> Integer {
        Integer::build(|r| self.with_raw(|q| unsafe { f(r, &(*q).num, &(*q).den) }))
    }
    /// Rounds toward negative infinity.
    pub fn floor(&self) -> Integer {
        self.div_num_den(|r, n, d| unsafe { gmp::mpz_fdiv_q(r, n, d) })
    }
    /// Rounds toward positive infinity.
    pub fn ceil(&self) -> Integer {
        self.div_num_den(|r, n, d| unsafe { gmp::mpz_cdiv_q(r, n, d) })
    }
    /// Rounds toward zero.
    pub fn trunc(&self) -> Integer {
        self.div_num_den(|r, n, d| unsafe { gmp::mpz_tdiv_q(r, n, d) })
    }
    /// Rounds to the nearest integer, with ties away from zero.
    pub fn round(&self) -> Integer {
        let half = Self::build(|q| unsafe { gmp::mpq_set_si(q, 1, 2) });
        let mut ret = (self.abs() + half).floor();
        if self.is_negative() {
            ret.negate();
        }
        ret
    }

    /// Converts to the nearest `f64` toward zero.
    pub fn to_f64(&self) -> f64 {
        self.with_raw(|q| unsafe { gmp::mpq_get_d(q) })
    }

    /// Returns the sign of the value relative to zero.
    #[inline]
    pub fn sign(&self) -> Ordering {
        self.with_raw(|q| unsafe { (*q).num.size.cmp(&0) })
    }
    /// Returns -1, 0, or 1 according to the sign of the value.
    #[inline]
    pub fn signum(&self) -> i32 {
        self.sign() as i32
    }
    /// Returns `true` if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.sign() == Ordering::Equal
    }
    /// Returns `true` if the value is less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.sign() == Ordering::Less
    }
    /// Returns `true` if the denominator is one.
    pub fn is_integer(&self) -> bool {
        self.with_raw(|q| unsafe { gmp::mpz_cmp_ui(&(*q).den, 1) == 0 })
    }
}

forward_binop!(impl Add for Rational, add => add_ref);
forward_binop!(impl Sub for Rational, sub => sub_ref);
forward_binop!(impl Mul for Rational, mul => mul_ref);
forward_binop!(impl Div for Rational, div => div_ref);

forward_assign!(impl AddAssign for Rational, add_assign => add_ref);
forward_assign!(impl SubAssign for Rational, sub_assign => sub_ref);
forward_assign!(impl MulAssign for Rational, mul_assign => mul_ref);
forward_assign!(impl DivAssign for Rational, div_assign => div_ref);

forward_neg!(impl Neg for Rational => neg_ref);

forward_prim_ops!(Rational; i32, i64, u32, u64);

impl Default for Rational {
    #[inline]
    fn default() -> Self {
        Self::zero_value()
    }
}

impl From<Integer> for Rational {
    fn from(n: Integer) -> Self {
        Self::from(&n)
    }
}
impl From<&Integer> for Rational {
    fn from(n: &Integer) -> Self {
        Self::build(|q| n.with_raw(|raw| unsafe { gmp::mpq_set_z(q, raw) }))
    }
}
macro_rules! impl_from_primitive {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Rational {
                #[inline]
                fn from(x: $t) -> Self {
                    Self::from(Integer::from(x))
                }
            }
        )+
    };
}
impl_from_primitive!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl TryFrom<f64> for Rational {
    type Error = NumError;

    /// Converts a finite `f64` exactly.
    fn try_from(f: f64) -> Result<Self> {
        if !f.is_finite() {
            return Err(NumError::NonFiniteValue);
        }
        Ok(Self::build(|q| unsafe { gmp::mpq_set_d(q, f) }))
    }
}
impl TryFrom<&IeeeFloat> for Rational {
    type Error = NumError;

    /// Converts a finite float exactly.
    fn try_from(f: &IeeeFloat) -> Result<Self> {
        if !f.is_finite() {
            return Err(NumError::NonFiniteValue);
        }
        Ok(Self::build(|q| f.with_raw(|raw| unsafe { mpfr::get_q(q, raw) })))
    }
}

impl FromStr for Rational {
    type Err = NumError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_radix(s, 10)
    }
}

impl PartialEq for Rational {
    fn eq(&self, other: &Self) -> bool {
        self.shares_storage_with(other)
            || self.with_raw(|a| other.with_raw(|b| unsafe { gmp::mpq_equal(a, b) != 0 }))
    }
}
impl Eq for Rational {}
impl PartialOrd for Rational {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.shares_storage_with(other) {
            return Ordering::Equal;
        }
        self.with_raw(|a| other.with_raw(|b| unsafe { gmp::mpq_cmp(a, b) }))
            .cmp(&0)
    }
}

impl Hash for Rational {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.with_raw(|q| unsafe {
            integer::hash_raw(&(*q).num, state);
            integer::hash_raw(&(*q).den, state);
        });
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_string_radix(10))
    }
}
impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Zero for Rational {
    #[inline]
    fn zero() -> Self {
        Self::default()
    }
    #[inline]
    fn is_zero(&self) -> bool {
        Rational::is_zero(self)
    }
}
impl One for Rational {
    #[inline]
    fn one() -> Self {
        Self::from(1)
    }
}

impl std::iter::Sum for Rational {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, x| acc + x)
    }
}
