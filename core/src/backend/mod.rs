//! Opaque records owned by the GMP and MPFR backend.
//!
//! Every value type in this crate stores exactly one of these records inside
//! a [`StorageCell`](crate::cell::StorageCell). Nothing outside this crate
//! ever sees a pointer to one.

use gmp_mpfr_sys::gmp;
use gmp_mpfr_sys::mpfr;

pub(crate) mod text;

/// Backend record that must be explicitly initialized and cleared.
///
/// # Safety
///
/// Implementors must guarantee that `init_copy()` leaves `dst` fully
/// initialized and independent of `src`, and that `clear()` releases
/// everything `init_copy()` (or the record's other constructors) allocated.
/// Reading an initialized record through a `*const Self` must never mutate
/// it, so that several readers may share one record.
pub unsafe trait Handle: Sized {
    /// Initializes `dst` as a deep copy of `src`.
    ///
    /// # Safety
    ///
    /// `src` must be initialized and `dst` must point to writable,
    /// uninitialized memory.
    unsafe fn init_copy(dst: *mut Self, src: *const Self);

    /// Releases the memory owned by an initialized record.
    ///
    /// # Safety
    ///
    /// `this` must be initialized, and must not be used again afterwards.
    unsafe fn clear(this: *mut Self);
}

unsafe impl Handle for gmp::mpz_t {
    #[inline]
    unsafe fn init_copy(dst: *mut Self, src: *const Self) {
        gmp::mpz_init_set(dst, src);
    }
    #[inline]
    unsafe fn clear(this: *mut Self) {
        gmp::mpz_clear(this);
    }
}

unsafe impl Handle for gmp::mpq_t {
    #[inline]
    unsafe fn init_copy(dst: *mut Self, src: *const Self) {
        gmp::mpq_init(dst);
        gmp::mpq_set(dst, src);
    }
    #[inline]
    unsafe fn clear(this: *mut Self) {
        gmp::mpq_clear(this);
    }
}

unsafe impl Handle for gmp::mpf_t {
    #[inline]
    unsafe fn init_copy(dst: *mut Self, src: *const Self) {
        // The copy keeps the precision of the original, so `mpf_set` is exact.
        gmp::mpf_init2(dst, gmp::mpf_get_prec(src));
        gmp::mpf_set(dst, src);
    }
    #[inline]
    unsafe fn clear(this: *mut Self) {
        gmp::mpf_clear(this);
    }
}

unsafe impl Handle for mpfr::mpfr_t {
    #[inline]
    unsafe fn init_copy(dst: *mut Self, src: *const Self) {
        mpfr::init2(dst, mpfr::get_prec(src));
        mpfr::set(dst, src, mpfr::rnd_t::RNDN);
    }
    #[inline]
    unsafe fn clear(this: *mut Self) {
        mpfr::clear(this);
    }
}

unsafe impl Handle for gmp::randstate_t {
    #[inline]
    unsafe fn init_copy(dst: *mut Self, src: *const Self) {
        gmp::randinit_set(dst, src);
    }
    #[inline]
    unsafe fn clear(this: *mut Self) {
        gmp::randclear(this);
    }
}
