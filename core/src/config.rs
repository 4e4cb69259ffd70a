//! Process-wide numeric defaults.
//!
//! These only apply where a precision or rounding mode is not given
//! explicitly. Values already constructed are never affected by changes here.

use gmp_mpfr_sys::mpfr;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::convert::TryFrom;

use crate::errors::NumError;
use crate::ieee::Round;

/// Initial default precision of `Float`, in bits.
pub const DEFAULT_FLOAT_PRECISION: u32 = 64;
/// Initial default precision of `IeeeFloat`, in bits (same as `f64`).
pub const DEFAULT_IEEE_PRECISION: u32 = 53;
/// Initial default rounding mode used by `IeeeFloat` operators.
pub const DEFAULT_ROUNDING: Round = Round::Nearest;

lazy_static! {
    static ref CONFIG: RwLock<Config> = RwLock::new(Config::default());
}

/// Snapshot of the numeric defaults.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    /// Precision of `Float` values created without an explicit precision.
    pub float_precision: u32,
    /// Precision of `IeeeFloat` values created without an explicit
    /// precision.
    pub ieee_precision: u32,
    /// Rounding mode used by the `IeeeFloat` arithmetic operators.
    pub rounding: Round,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            float_precision: DEFAULT_FLOAT_PRECISION,
            ieee_precision: DEFAULT_IEEE_PRECISION,
            rounding: DEFAULT_ROUNDING,
        }
    }
}

/// Returns a snapshot of the current defaults.
pub fn get() -> Config {
    *CONFIG.read()
}
/// Restores the initial defaults.
pub fn reset() {
    *CONFIG.write() = Config::default();
}

/// Returns the default `Float` precision.
pub fn float_precision() -> u32 {
    CONFIG.read().float_precision
}
/// Sets the default `Float` precision.
///
/// # Panics
///
/// Panics if `prec` is outside `float_prec_min()..=float_prec_max()`.
pub fn set_float_precision(prec: u32) {
    assert_float_prec(prec);
    CONFIG.write().float_precision = prec;
}

/// Returns the default `IeeeFloat` precision.
pub fn ieee_precision() -> u32 {
    CONFIG.read().ieee_precision
}
/// Sets the default `IeeeFloat` precision.
///
/// # Panics
///
/// Panics if `prec` is outside `ieee_prec_min()..=ieee_prec_max()`.
pub fn set_ieee_precision(prec: u32) {
    assert_ieee_prec(prec);
    CONFIG.write().ieee_precision = prec;
}

/// Returns the rounding mode used by `IeeeFloat` operators.
pub fn rounding() -> Round {
    CONFIG.read().rounding
}
/// Sets the rounding mode used by `IeeeFloat` operators.
pub fn set_rounding(round: Round) {
    CONFIG.write().rounding = round;
}

/// Minimum `Float` precision.
pub const fn float_prec_min() -> u32 {
    1
}
/// Maximum `Float` precision.
///
/// The backend stores precision as a limb count in a C `int`, so this keeps
/// well clear of overflow on every limb size.
pub const fn float_prec_max() -> u32 {
    i32::MAX as u32 / 2
}

/// Minimum `IeeeFloat` precision, as reported by the backend.
pub fn ieee_prec_min() -> u32 {
    u32::try_from(mpfr::PREC_MIN).unwrap_or(1)
}
/// Maximum `IeeeFloat` precision, as reported by the backend (capped to
/// `u32`).
pub fn ieee_prec_max() -> u32 {
    u32::try_from(mpfr::PREC_MAX).unwrap_or(u32::MAX)
}

/// Panics unless `prec` is a valid `Float` precision.
#[inline]
pub(crate) fn assert_float_prec(prec: u32) {
    assert!(
        (float_prec_min()..=float_prec_max()).contains(&prec),
        "{}",
        NumError::InvalidPrecision(prec),
    );
}
/// Panics unless `prec` is a valid `IeeeFloat` precision.
#[inline]
pub(crate) fn assert_ieee_prec(prec: u32) {
    assert!(
        (ieee_prec_min()..=ieee_prec_max()).contains(&prec),
        "{}",
        NumError::InvalidPrecision(prec),
    );
}
