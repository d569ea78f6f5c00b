//! Suppression control: pause and resume tracking on the current thread.
//!
//! While paused, allocations still hit the real heap but leave no trace in
//! any registry or warning log, and releases are ignored entirely. Use it
//! around third-party code whose allocations cannot be attributed to a
//! call site.
//!
//! With the `minimal` feature every function here is a no-op.

use std::marker::PhantomData;

use crate::core::tls;

/// Pause tracking on the current thread.
pub fn pause() {
    #[cfg(not(feature = "minimal"))]
    tls::set_paused(true);
}

/// Resume tracking on the current thread.
pub fn resume() {
    #[cfg(not(feature = "minimal"))]
    tls::set_paused(false);
}

/// Whether tracking is paused on the current thread.
pub fn is_paused() -> bool {
    !cfg!(feature = "minimal") && tls::is_paused()
}

/// RAII guard for a paused scope.
///
/// Restores the previous pause state when dropped, so guards nest. Bound
/// to the thread that created it.
///
/// # Example
///
/// ```rust
/// use memd::PauseGuard;
///
/// {
///     let _paused = PauseGuard::new();
///     assert!(memd::is_paused() || cfg!(feature = "minimal"));
/// }
/// assert!(!memd::is_paused());
/// ```
#[derive(Debug)]
pub struct PauseGuard {
    previous: bool,
    _not_send: PhantomData<*const ()>,
}

impl PauseGuard {
    /// Pause the current thread until the guard is dropped.
    pub fn new() -> Self {
        let previous = is_paused();
        pause();
        Self {
            previous,
            _not_send: PhantomData,
        }
    }
}

impl Default for PauseGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PauseGuard {
    fn drop(&mut self) {
        if !self.previous {
            resume();
        }
    }
}

/// Run a closure with tracking paused on the current thread.
pub fn paused<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = PauseGuard::new();
    f()
}
