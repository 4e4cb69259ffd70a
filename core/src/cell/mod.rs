//! Reference-counted, copy-on-write storage for backend records.
//!
//! Cloning a value only clones the `Arc`. The first mutation through a shared
//! cell splits off a private deep copy, so no other holder ever observes the
//! write.

use log::trace;
use std::fmt;
use std::mem::MaybeUninit;
use std::sync::Arc;

use crate::backend::Handle;

/// Single owner of an initialized backend record, which is cleared exactly
/// once when this is dropped.
pub(crate) struct Owned<H: Handle> {
    raw: H,
}
impl<H: Handle> Owned<H> {
    /// Creates a record by running `init` on uninitialized memory.
    ///
    /// # Safety
    ///
    /// `init` must fully initialize the record it is given.
    #[inline]
    unsafe fn new(init: impl FnOnce(*mut H)) -> Self {
        let mut raw = MaybeUninit::<H>::uninit();
        init(raw.as_mut_ptr());
        Self {
            raw: raw.assume_init(),
        }
    }
}
impl<H: Handle> Clone for Owned<H> {
    #[inline]
    fn clone(&self) -> Self {
        unsafe { Self::new(|dst| H::init_copy(dst, &self.raw)) }
    }
}
impl<H: Handle> Drop for Owned<H> {
    #[inline]
    fn drop(&mut self) {
        unsafe { H::clear(&mut self.raw) };
    }
}

// Backend records are plain heap structures with no thread affinity. Shared
// access only ever reads them; writes require `&mut StorageCell` and a
// reference count of one.
unsafe impl<H: Handle> Send for Owned<H> {}
unsafe impl<H: Handle> Sync for Owned<H> {}

/// Shared, copy-on-write owner of one backend record.
///
/// Pointers to the record are only ever passed to closures, and are valid
/// only for the duration of that call.
pub struct StorageCell<H: Handle>(Arc<Owned<H>>);

impl<H: Handle> StorageCell<H> {
    /// Allocates a new cell and initializes its record using `init`.
    ///
    /// # Safety
    ///
    /// `init` must fully initialize the record it is given.
    #[inline]
    pub(crate) unsafe fn new(init: impl FnOnce(*mut H)) -> Self {
        Self(Arc::new(Owned::new(init)))
    }

    /// Calls `f` with read-only access to the record.
    #[inline]
    pub(crate) fn read<R>(&self, f: impl FnOnce(*const H) -> R) -> R {
        f(&self.0.raw as *const H)
    }

    /// Calls `f` with exclusive write access to the record, first splitting
    /// off a private copy if the record is shared.
    #[inline]
    pub(crate) fn write<R>(&mut self, f: impl FnOnce(*mut H) -> R) -> R {
        self.clone_if_shared();
        match Arc::get_mut(&mut self.0) {
            Some(owned) => f(&mut owned.raw as *mut H),
            None => unreachable!("storage cell shared after split"),
        }
    }

    /// Ensures that this cell is the only reference to its record, deep
    /// copying the record if it is shared. Returns `true` if a copy was made.
    #[inline]
    pub fn clone_if_shared(&mut self) -> bool {
        if Arc::get_mut(&mut self.0).is_some() {
            return false;
        }
        trace!(
            "splitting storage cell shared by {} values",
            Arc::strong_count(&self.0),
        );
        self.0 = Arc::new(Owned::clone(&self.0));
        true
    }

    /// Returns `true` if any other value references the same record.
    #[inline]
    pub fn is_shared(&self) -> bool {
        self.ref_count() > 1
    }
    /// Returns the number of values referencing the record.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }
    /// Returns `true` if both cells reference the same record.
    #[inline]
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<H: Handle> Clone for StorageCell<H> {
    /// Returns a new reference to the same record, without copying it.
    #[inline]
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<H: Handle> fmt::Debug for StorageCell<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageCell")
            .field("ptr", &Arc::as_ptr(&self.0))
            .field("ref_count", &self.ref_count())
            .finish()
    }
}
