//! Arbitrary-precision integers, rationals and floating-point numbers with
//! value semantics, backed by GMP and MPFR.
//!
//! Every value type owns its backend record through a reference-counted
//! copy-on-write cell. Cloning is cheap, and mutating one value never
//! changes another.

#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]
#![deny(clippy::correctness)]

#[macro_use]
mod macros;
mod backend;
mod cell;
pub mod config;
mod errors;
mod float;
mod ieee;
mod integer;
mod random;
mod rational;
mod secure;

pub use errors::{NumError, Result};
pub use float::Float;
pub use ieee::{ExceptionFlags, IeeeFloat, Round};
pub use integer::{Integer, Primality};
pub use random::{Algorithm, RandomState};
pub use rational::Rational;

pub mod prelude {
    //! Everything needed for typical numeric code.

    pub use crate::config;
    pub use crate::{
        ExceptionFlags, Float, IeeeFloat, Integer, NumError, Primality, RandomState, Rational,
        Round,
    };
    pub use num::{One, Zero};
}
