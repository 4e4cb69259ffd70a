use gmp_mpfr_sys::mpfr;
use itertools::Itertools;
use std::fmt;

/// Sticky exception flags raised by `IeeeFloat` operations.
///
/// The flags accumulate across operations until cleared, and are separate
/// from the `Err` results of domain-checked functions: a flag records that
/// something happened while a result was still produced. The backend keeps
/// one set of flags per thread.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ExceptionFlags {
    /// A non-zero result was too small for the exponent range.
    pub underflow: bool,
    /// A result was too large for the exponent range.
    pub overflow: bool,
    /// A NaN was produced.
    pub nan: bool,
    /// A result was rounded.
    pub inexact: bool,
    /// An operation with a non-numeric result (such as comparing NaN)
    /// happened.
    pub range_error: bool,
    /// An exact infinity was produced from finite operands.
    pub divide_by_zero: bool,
}

impl ExceptionFlags {
    /// Returns the flags currently raised on this thread.
    pub fn current() -> Self {
        unsafe {
            Self {
                underflow: mpfr::underflow_p() != 0,
                overflow: mpfr::overflow_p() != 0,
                nan: mpfr::nanflag_p() != 0,
                inexact: mpfr::inexflag_p() != 0,
                range_error: mpfr::erangeflag_p() != 0,
                divide_by_zero: mpfr::divby0_p() != 0,
            }
        }
    }

    /// Clears every flag on this thread.
    pub fn clear() {
        unsafe { mpfr::clear_flags() };
    }

    /// Runs `f` with cleared flags and returns its result along with the
    /// flags it raised.
    ///
    /// Flags raised before the call are discarded.
    pub fn capture<R>(f: impl FnOnce() -> R) -> (R, Self) {
        Self::clear();
        let ret = f();
        (ret, Self::current())
    }

    /// Returns `true` if no flag is raised.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for ExceptionFlags {
    /// Lists the raised flags, such as `inexact, overflow`, or `none`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let names = [
            (self.underflow, "underflow"),
            (self.overflow, "overflow"),
            (self.nan, "nan"),
            (self.inexact, "inexact"),
            (self.range_error, "range error"),
            (self.divide_by_zero, "divide by zero"),
        ];
        let raised = names.iter().filter(|(set, _)| *set).map(|(_, name)| name);
        write!(f, "{}", raised.format(", "))
    }
}
