//! The native C heap, called without any bookkeeping.
//!
//! Every tracked operation ends up here, and so does the report buffer,
//! which must stay invisible to the tracker.

use libc::c_void;

/// Zero-sized handle to `malloc`/`calloc`/`realloc`/`free`.
///
/// Nothing in this type records anything; it exists so every raw heap
/// call in the crate goes through one place.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawHeap;

impl RawHeap {
    /// `malloc(size)`. Returns null on failure.
    #[inline]
    pub fn malloc(size: usize) -> *mut u8 {
        // SAFETY: malloc accepts any size and reports failure with null.
        unsafe { libc::malloc(size) as *mut u8 }
    }

    /// `calloc(count, size)`. Returns null on failure, including when
    /// `count * size` overflows.
    #[inline]
    pub fn calloc(count: usize, size: usize) -> *mut u8 {
        // SAFETY: calloc accepts any arguments and reports failure with null.
        unsafe { libc::calloc(count, size) as *mut u8 }
    }

    /// `realloc(ptr, size)`. On failure returns null and leaves `ptr` valid.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a live block returned by this heap.
    #[inline]
    pub unsafe fn realloc(ptr: *mut u8, size: usize) -> *mut u8 {
        libc::realloc(ptr as *mut c_void, size) as *mut u8
    }

    /// `free(ptr)`. Freeing null is a no-op.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a live block returned by this heap, and must
    /// not be used afterwards.
    #[inline]
    pub unsafe fn free(ptr: *mut u8) {
        libc::free(ptr as *mut c_void);
    }
}
