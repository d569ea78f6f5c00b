//! Thread-local suppression state.
//!
//! One flag per thread, shared by every tracker used on that thread.
//! Pausing on one thread never affects tracking on another.

use std::cell::Cell;

thread_local! {
    static PAUSED: Cell<bool> = const { Cell::new(false) };
}

/// Set the current thread's flag. Returns the previous value.
///
/// During thread teardown the flag may already be gone; tracking then
/// behaves as unpaused.
#[cfg_attr(feature = "minimal", allow(dead_code))]
pub(crate) fn set_paused(paused: bool) -> bool {
    PAUSED.try_with(|flag| flag.replace(paused)).unwrap_or(false)
}

/// Whether tracking is paused on the current thread.
pub(crate) fn is_paused() -> bool {
    PAUSED.try_with(Cell::get).unwrap_or(false)
}
