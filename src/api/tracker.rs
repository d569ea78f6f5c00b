//! The tracker: the four intercepted heap operations plus reporting.

use crate::allocators::heap::RawHeap;
use crate::api::config::TrackerConfig;
use crate::api::pause::{self, PauseGuard};
use crate::api::report::{self, Report};
use crate::api::site::CallSite;
use crate::api::stats::TrackerStats;
use crate::core::registry::MemoryRecord;
use crate::core::state::TrackerState;
use crate::core::warnings::Warning;
use crate::diagnostics::emit::emit_all;
use crate::diagnostics::WarningKind;
use crate::sync::mutex::Mutex;

/// A heap allocation tracker.
///
/// Each operation performs the real heap call and, unless tracking is
/// paused on the calling thread, records it. Tracking never fails an
/// operation: the tracker only observes, and anomalies end up as warnings
/// in the report.
///
/// The registry and warning log sit behind one mutex, so a tracker can be
/// shared between threads. The lock is held only for bookkeeping, never
/// across the real heap call of an intercepted operation.
///
/// # Example
///
/// ```rust,no_run
/// use memd::{here, Tracker, TrackerConfig};
///
/// let tracker = Tracker::new(TrackerConfig::default());
///
/// let ptr = tracker.allocate(100, here!());
/// unsafe {
///     tracker.release(ptr, here!());
///     tracker.release(ptr, here!()); // caught, not forwarded to free()
/// }
///
/// if let Some(report) = tracker.report() {
///     assert!(report.contains("Double free detected"));
/// }
/// ```
#[derive(Debug)]
pub struct Tracker {
    state: Mutex<TrackerState>,
    config: TrackerConfig,
}

impl Tracker {
    /// Create a tracker. Record and warning storage is reserved here.
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            state: Mutex::new(TrackerState::new(&config)),
            config,
        }
    }

    /// Create a tracker with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(TrackerConfig::default())
    }

    /// The configuration this tracker was built with.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    fn is_tracking(&self) -> bool {
        !cfg!(feature = "minimal") && !pause::is_paused()
    }

    /// `malloc` with tracking.
    ///
    /// Returns the block (or null) whatever the tracking outcome.
    pub fn allocate(&self, size: usize, site: CallSite) -> *mut u8 {
        let ptr = RawHeap::malloc(size);

        if self.is_tracking() {
            let raised = self.state.lock().insert(ptr as usize, size, site);
            emit_all([raised]);
        }

        ptr
    }

    /// `calloc` with tracking.
    ///
    /// The block is recorded with size `count * size`. If that product
    /// overflows, nothing is allocated, a [`WarningKind::SizeOverflow`]
    /// warning is recorded, and null is returned. A null result from the
    /// heap is not recorded.
    pub fn zero_allocate(&self, count: usize, size: usize, site: CallSite) -> *mut u8 {
        let Some(total) = count.checked_mul(size) else {
            if self.is_tracking() {
                let raised = self.state.lock().warn(WarningKind::SizeOverflow, site);
                emit_all([Some(raised)]);
            }
            return std::ptr::null_mut();
        };

        let ptr = RawHeap::calloc(count, size);

        if !ptr.is_null() && self.is_tracking() {
            let raised = self.state.lock().insert(ptr as usize, total, site);
            emit_all([raised]);
        }

        ptr
    }

    /// `free` with tracking.
    ///
    /// The block is freed only if it has a live record. A null pointer or
    /// an untracked address is logged and never reaches the heap. While
    /// paused the call does nothing at all, so blocks allocated while paused
    /// are never given back by this method.
    ///
    /// With the `minimal` feature the call is forwarded to `free()`.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a block returned by a tracker or by the raw
    /// heap. With the `minimal` feature it must additionally be live, since
    /// there is no record to catch a double free.
    pub unsafe fn release(&self, ptr: *mut u8, site: CallSite) {
        if cfg!(feature = "minimal") {
            RawHeap::free(ptr);
            return;
        }
        if pause::is_paused() {
            return;
        }

        let erased = self.state.lock().erase(ptr as usize, site);
        match erased {
            Ok(_record) => {
                #[cfg(feature = "debug")]
                crate::debug::poison::poison_freed(ptr, _record.size);

                RawHeap::free(ptr);
            }
            Err(warning) => emit_all([Some(warning)]),
        }
    }

    /// `realloc` with tracking.
    ///
    /// - null `ptr`: same as [`allocate`](Self::allocate).
    /// - `new_size == 0`: same as [`release`](Self::release); returns null.
    /// - otherwise the block is resized; on success the old record is
    ///   erased and the new address recorded. On failure null is returned,
    ///   nothing is recorded and `ptr` stays tracked and valid.
    ///
    /// # Safety
    ///
    /// Same contract as [`release`](Self::release) for `ptr`.
    pub unsafe fn resize(&self, ptr: *mut u8, new_size: usize, site: CallSite) -> *mut u8 {
        if ptr.is_null() {
            return self.allocate(new_size, site);
        }
        if new_size == 0 {
            self.release(ptr, site);
            return std::ptr::null_mut();
        }

        let new_ptr = RawHeap::realloc(ptr, new_size);

        if !new_ptr.is_null() && self.is_tracking() {
            let raised = {
                let mut state = self.state.lock();
                let erased = state.erase(ptr as usize, site).err();
                let inserted = state.insert(new_ptr as usize, new_size, site);
                [erased, inserted]
            };
            emit_all(raised);
        }

        new_ptr
    }

    /// Pause tracking on the current thread.
    ///
    /// The flag is per thread, not per tracker.
    pub fn pause(&self) {
        pause::pause();
    }

    /// Resume tracking on the current thread.
    pub fn resume(&self) {
        pause::resume();
    }

    /// Pause tracking on the current thread until the guard is dropped.
    pub fn pause_scope(&self) -> PauseGuard {
        PauseGuard::new()
    }

    /// Run `f` with tracking paused on the current thread.
    pub fn paused<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        pause::paused(f)
    }

    /// Generate the leak report.
    ///
    /// Returns `None` if the report buffer cannot be allocated, and always
    /// in `minimal` mode. Generating a report changes nothing: warnings are
    /// cumulative until [`reset`](Self::reset).
    pub fn report(&self) -> Option<Report> {
        if cfg!(feature = "minimal") {
            return None;
        }

        let state = self.state.lock();
        let report = report::generate(&state, self.config.report_capacity);

        #[cfg(feature = "log")]
        match &report {
            Some(report) => log::debug!("generated leak report ({} bytes)", report.len()),
            None => log::warn!("failed to allocate leak report buffer"),
        }

        report
    }

    /// Current totals and counts.
    pub fn stats(&self) -> TrackerStats {
        let state = self.state.lock();
        TrackerStats {
            total_allocated: state.registry.total_allocated(),
            total_freed: state.registry.total_freed(),
            live_allocations: state.registry.live_count(),
            max_allocations: state.registry.capacity(),
            warning_count: state.warnings.len(),
            dropped_warnings: state.warnings.dropped(),
        }
    }

    /// Copy of the live records, in slot order.
    pub fn leaks(&self) -> Vec<MemoryRecord> {
        self.state.lock().registry.live().copied().collect()
    }

    /// Copy of the warning log, in recording order.
    pub fn warnings(&self) -> Vec<Warning> {
        self.state.lock().warnings.iter().copied().collect()
    }

    /// Forget every record and warning and zero the totals.
    ///
    /// Blocks that were live stay allocated; releasing them afterwards is
    /// reported as a double free.
    pub fn reset(&self) {
        self.state.lock().clear();
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::with_defaults()
    }
}
