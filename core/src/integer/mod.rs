//! Arbitrary-precision signed integers.

use gmp_mpfr_sys::gmp;
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::os::raw::{c_char, c_void};
use std::str::FromStr;

use crate::backend::text;
use crate::cell::StorageCell;
use crate::errors::{NumError, Result};

mod arith;
mod bits;
mod convert;
mod number_theory;

pub use number_theory::Primality;

/// Arbitrary-precision signed integer with value semantics.
///
/// Cloning an `Integer` is O(1): both copies share the same backend storage
/// until one of them is mutated.
#[derive(Clone)]
pub struct Integer {
    cell: StorageCell<gmp::mpz_t>,
}

impl Integer {
    /// Returns zero.
    #[inline]
    pub fn new() -> Self {
        Self {
            cell: unsafe { StorageCell::new(|raw| gmp::mpz_init(raw)) },
        }
    }

    /// Creates a zero and lets `f` write the actual value into its (unshared)
    /// storage.
    #[inline]
    pub(crate) fn build(f: impl FnOnce(*mut gmp::mpz_t)) -> Self {
        let mut ret = Self::new();
        ret.cell.write(f);
        ret
    }
    /// Calls `f` with read-only access to the backend record.
    #[inline]
    pub(crate) fn with_raw<R>(&self, f: impl FnOnce(*const gmp::mpz_t) -> R) -> R {
        self.cell.read(f)
    }
    /// Calls `f` with exclusive access to the backend record, splitting shared
    /// storage first.
    #[inline]
    pub(crate) fn with_raw_mut<R>(&mut self, f: impl FnOnce(*mut gmp::mpz_t) -> R) -> R {
        self.cell.write(f)
    }

    /// Returns `true` if both values currently share backend storage.
    #[inline]
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        self.cell.shares_storage_with(&other.cell)
    }

    /// Builds an integer from a sign and a magnitude.
    ///
    /// Taking the magnitude as an unsigned value means that the most negative
    /// value of every primitive type converts without overflow.
    fn from_sign_magnitude(negative: bool, magnitude: u128) -> Self {
        let words = [magnitude as u64, (magnitude >> 64) as u64];
        Self::build(|raw| unsafe {
            gmp::mpz_import(raw, 2, -1, 8, 0, 0, words.as_ptr() as *const c_void);
            if negative {
                gmp::mpz_neg(raw, raw);
            }
        })
    }

    /// Returns the absolute value as a `u128`, or `None` if it does not fit.
    fn magnitude_u128(&self) -> Option<u128> {
        self.with_raw(|raw| unsafe {
            if gmp::mpz_sizeinbase(raw, 2) > 128 {
                return None;
            }
            let mut words = [0_u64; 2];
            let mut count = 0_usize;
            gmp::mpz_export(
                words.as_mut_ptr() as *mut c_void,
                &mut count,
                -1,
                8,
                0,
                0,
                raw,
            );
            Some(u128::from(words[0]) | (u128::from(words[1]) << 64))
        })
    }

    /// Parses an integer in the given radix.
    ///
    /// A radix of 0 detects the radix from a `0x`, `0b`, or `0` prefix, and
    /// otherwise assumes decimal. For radices up to 36 letters are
    /// case-insensitive; above that, uppercase letters come before lowercase.
    ///
    /// # Panics
    ///
    /// Panics if `radix` is not 0 or in the range 2 to 62.
    pub fn from_str_radix(s: &str, radix: i32) -> Result<Self> {
        text::assert_parse_radix(radix);
        let numeral = text::numeral(s)?;
        let mut ret = Self::new();
        let status =
            ret.with_raw_mut(|raw| unsafe { gmp::mpz_set_str(raw, numeral.as_ptr(), radix) });
        if status == 0 {
            Ok(ret)
        } else {
            Err(NumError::InvalidStringFormat)
        }
    }

    /// Replaces the value with one parsed from a string, leaving it untouched
    /// if the string is malformed.
    pub fn assign_str(&mut self, s: &str, radix: i32) -> Result<()> {
        *self = Self::from_str_radix(s, radix)?;
        Ok(())
    }

    /// Formats the integer in the given radix.
    ///
    /// Negative radices from -36 to -2 use uppercase letters.
    ///
    /// # Panics
    ///
    /// Panics if `radix` is not in the range 2 to 62 or -36 to -2.
    pub fn to_string_radix(&self, radix: i32) -> String {
        text::assert_output_radix(radix);
        self.with_raw(|raw| unsafe {
            // Room for a sign and the trailing NUL.
            let len = gmp::mpz_sizeinbase(raw, radix.abs()) + 2;
            let mut buf = vec![0_u8; len];
            gmp::mpz_get_str(buf.as_mut_ptr() as *mut c_char, radix, raw);
            text::from_c_buf(buf)
        })
    }

    /// Returns the sign of the integer relative to zero.
    #[inline]
    pub fn sign(&self) -> Ordering {
        self.with_raw(|raw| unsafe { (*raw).size.cmp(&0) })
    }
    /// Returns -1, 0, or 1 according to the sign of the integer.
    #[inline]
    pub fn signum(&self) -> i32 {
        self.sign() as i32
    }
    /// Returns `true` if the integer is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.sign() == Ordering::Equal
    }
    /// Returns `true` if the integer is less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.sign() == Ordering::Less
    }
    /// Returns `true` if the integer is greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.sign() == Ordering::Greater
    }

    /// Converts to `i128`, or returns `None` if out of range.
    pub fn to_i128(&self) -> Option<i128> {
        let magnitude = self.magnitude_u128()?;
        if !self.is_negative() {
            i128::try_from(magnitude).ok()
        } else if magnitude <= i128::MAX as u128 {
            Some(-(magnitude as i128))
        } else if magnitude == 1 << 127 {
            Some(i128::MIN)
        } else {
            None
        }
    }
    /// Converts to `u128`, or returns `None` if out of range.
    pub fn to_u128(&self) -> Option<u128> {
        if self.is_negative() {
            None
        } else {
            self.magnitude_u128()
        }
    }
    /// Converts to `i64`, or returns `None` if out of range.
    pub fn to_i64(&self) -> Option<i64> {
        self.to_i128().and_then(|x| i64::try_from(x).ok())
    }
    /// Converts to `u64`, or returns `None` if out of range.
    pub fn to_u64(&self) -> Option<u64> {
        self.to_u128().and_then(|x| u64::try_from(x).ok())
    }
    /// Converts to the nearest `f64` toward zero.
    pub fn to_f64(&self) -> f64 {
        self.with_raw(|raw| unsafe { gmp::mpz_get_d(raw) })
    }
}

impl Default for Integer {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Integer {
                #[inline]
                fn from(x: $t) -> Self {
                    Self::from_sign_magnitude(x < 0, x.unsigned_abs() as u128)
                }
            }
        )+
    };
}
macro_rules! impl_from_unsigned {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Integer {
                #[inline]
                fn from(x: $t) -> Self {
                    Self::from_sign_magnitude(false, x as u128)
                }
            }
        )+
    };
}
impl_from_signed!(i8, i16, i32, i64, i128, isize);
impl_from_unsigned!(u8, u16, u32, u64, u128, usize);

impl From<bool> for Integer {
    #[inline]
    fn from(b: bool) -> Self {
        Self::from(b as u8)
    }
}

impl TryFrom<f64> for Integer {
    type Error = NumError;

    /// Converts a finite `f64` to an integer, truncating toward zero.
    fn try_from(f: f64) -> Result<Self> {
        if !f.is_finite() {
            return Err(NumError::NonFiniteValue);
        }
        Ok(Self::build(|raw| unsafe { gmp::mpz_set_d(raw, f) }))
    }
}

impl FromStr for Integer {
    type Err = NumError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_radix(s, 10)
    }
}

impl PartialEq for Integer {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Integer {}
impl PartialOrd for Integer {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Integer {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        if self.shares_storage_with(other) {
            return Ordering::Equal;
        }
        self.with_raw(|a| other.with_raw(|b| unsafe { gmp::mpz_cmp(a, b) }))
            .cmp(&0)
    }
}

/// Hashes an integer record using only its sign and magnitude limbs.
///
/// # Safety
///
/// `raw` must point to an initialized record.
pub(crate) unsafe fn hash_raw<H: Hasher>(raw: *const gmp::mpz_t, state: &mut H) {
    let size = (*raw).size;
    size.signum().hash(state);
    let limbs = std::slice::from_raw_parts(
        (*raw).d.as_ptr() as *const gmp::limb_t,
        size.unsigned_abs() as usize,
    );
    limbs.hash(state);
}

impl Hash for Integer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.with_raw(|raw| unsafe { hash_raw(raw, state) });
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_radix(self, f, 10, "")
    }
}
impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
impl fmt::LowerHex for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_radix(self, f, 16, "0x")
    }
}
impl fmt::UpperHex for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_radix(self, f, -16, "0x")
    }
}
impl fmt::Octal for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_radix(self, f, 8, "0o")
    }
}
impl fmt::Binary for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_radix(self, f, 2, "0b")
    }
}

fn fmt_radix(n: &Integer, f: &mut fmt::Formatter<'_>, radix: i32, prefix: &str) -> fmt::Result {
    let s = n.to_string_radix(radix);
    let digits = s.strip_prefix('-').unwrap_or(&s);
    f.pad_integral(!n.is_negative(), prefix, digits)
}
