use gmp_mpfr_sys::mpfr;
use log::warn;
use std::sync::Once;

static FAITHFUL_WARNING: Once = Once::new();

/// Rounding mode for `IeeeFloat` operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Round {
    /// Round to nearest, with ties to even.
    Nearest,
    /// Round toward zero.
    Zero,
    /// Round toward positive infinity.
    Up,
    /// Round toward negative infinity.
    Down,
    /// Round away from zero.
    AwayFromZero,
    /// Faithful rounding: the result is one of the two nearest representable
    /// values, with no guarantee which.
    ///
    /// This mode is experimental in the backend. The ternary value returned
    /// alongside a faithfully rounded result is unreliable and should not be
    /// used.
    Faithful,
}

impl Default for Round {
    fn default() -> Self {
        Round::Nearest
    }
}

impl Round {
    pub(crate) fn raw(self) -> mpfr::rnd_t {
        match self {
            Round::Nearest => mpfr::rnd_t::RNDN,
            Round::Zero => mpfr::rnd_t::RNDZ,
            Round::Up => mpfr::rnd_t::RNDU,
            Round::Down => mpfr::rnd_t::RNDD,
            Round::AwayFromZero => mpfr::rnd_t::RNDA,
            Round::Faithful => {
                FAITHFUL_WARNING.call_once(|| {
                    warn!("faithful rounding is experimental; ternary values will be unreliable");
                });
                mpfr::rnd_t::RNDF
            }
        }
    }
}
