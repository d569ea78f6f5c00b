//! Call-site capturing macros.
//!
//! Each macro records `file!()` and `line!()` at the point of use. The
//! short forms route to [`global()`](crate::global); passing a tracker as
//! the first argument routes to that tracker instead.
//!
//! `free!` and `realloc!` expand to unsafe calls and must be used inside
//! an `unsafe` block.

/// The [`CallSite`](crate::CallSite) of the macro invocation.
#[macro_export]
macro_rules! here {
    () => {
        $crate::CallSite::new(file!(), line!())
    };
}

/// Tracked `malloc`.
///
/// ```rust
/// let tracker = memd::Tracker::with_defaults();
/// let ptr = memd::malloc!(tracker, 100);
/// unsafe { memd::free!(tracker, ptr) };
/// ```
#[macro_export]
macro_rules! malloc {
    ($tracker:expr, $size:expr) => {
        $tracker.allocate($size, $crate::here!())
    };
    ($size:expr) => {
        $crate::global().allocate($size, $crate::here!())
    };
}

/// Tracked `calloc`.
#[macro_export]
macro_rules! calloc {
    ($tracker:expr, $count:expr, $size:expr) => {
        $tracker.zero_allocate($count, $size, $crate::here!())
    };
    ($count:expr, $size:expr) => {
        $crate::global().zero_allocate($count, $size, $crate::here!())
    };
}

/// Tracked `realloc`. Unsafe; see [`Tracker::resize`](crate::Tracker::resize).
#[macro_export]
macro_rules! realloc {
    ($tracker:expr, $ptr:expr, $size:expr) => {
        $tracker.resize($ptr, $size, $crate::here!())
    };
    ($ptr:expr, $size:expr) => {
        $crate::global().resize($ptr, $size, $crate::here!())
    };
}

/// Tracked `free`. Unsafe; see [`Tracker::release`](crate::Tracker::release).
#[macro_export]
macro_rules! free {
    ($tracker:expr, $ptr:expr) => {
        $tracker.release($ptr, $crate::here!())
    };
    ($ptr:expr) => {
        $crate::global().release($ptr, $crate::here!())
    };
}
