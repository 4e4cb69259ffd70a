//! Error type shared by every numeric value.

use thiserror::Error;

/// Result type returned by fallible numeric routines.
pub type Result<T> = std::result::Result<T, NumError>;

/// Error encountered while constructing or operating on a numeric value.
///
/// Only failures that depend on runtime data are ever returned. Violations of
/// parameter contracts (bad radix, precision out of range, invalid random
/// generator parameters) panic with the `Display` text of the matching
/// variant instead.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum NumError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("invalid numeral string")]
    InvalidStringFormat,
    #[error("precision {0} is outside the supported range")]
    InvalidPrecision(u32),
    #[error("radix {0} is not supported here")]
    InvalidRadix(i32),
    #[error("exponent {0} is not supported here")]
    InvalidExponent(i64),
    #[error("square root of a negative number")]
    NegativeSquareRoot,
    #[error("unable to construct random state")]
    InvalidRandomState,
    #[error("argument outside the domain of {0}")]
    Domain(&'static str),
    #[error("value is NaN or infinite")]
    NonFiniteValue,
    #[error("no modular inverse exists")]
    NotInvertible,
    #[error("secure random source failed: {0}")]
    Entropy(String),
}
