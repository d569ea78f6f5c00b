//! # memd
//!
//! A call-site aware heap allocation tracker.
//!
//! Every allocation and release routed through a [`Tracker`] is performed
//! on the native C heap and, unless tracking is paused on the calling
//! thread, recorded together with the file and line it came from. On
//! demand the tracker renders a plain-text report of leaked blocks and of
//! anomalies it caught along the way (null releases, double releases,
//! failed allocations, registry exhaustion).
//!
//! ## Features
//!
//! - Fixed-capacity registry: no allocation inside the bookkeeping path
//! - Double frees are caught and never forwarded to `free()`
//! - Per-thread pause/resume for untracked third-party code
//! - Report text in a raw-heap buffer that never tracks itself
//! - `minimal` feature turns tracking off without touching call sites
//!
//! ## Quick Start
//!
//! ```rust
//! use memd::{calloc, free, malloc, Tracker, TrackerConfig};
//!
//! let tracker = Tracker::new(TrackerConfig::default());
//!
//! let kept = malloc!(tracker, 200);
//! let table = calloc!(tracker, 16, 8);
//! unsafe { free!(tracker, table) };
//!
//! if let Some(report) = tracker.report() {
//!     print!("{report}");
//! }
//! # unsafe { free!(tracker, kept) };
//! ```
//!
//! The one-argument macro forms (`malloc!(size)`, `free!(ptr)`, ...) use
//! the process-wide tracker returned by [`global()`].
//!
//! ## Threads
//!
//! A tracker can be shared: its registry and warning log are guarded by a
//! mutex (`parking_lot` with the `parking_lot` feature). The pause flag is
//! thread-local, so pausing on one thread never hides another thread's
//! operations.

pub mod api;
pub mod diagnostics;

mod allocators;
mod core;
mod macros;
mod sync;

#[cfg(feature = "debug")]
pub mod debug;

pub use api::config::TrackerConfig;
pub use api::pause::{is_paused, pause, paused, resume, PauseGuard};
pub use api::report::Report;
pub use api::site::CallSite;
pub use api::stats::TrackerStats;
pub use api::tracker::Tracker;

pub use allocators::heap::RawHeap;
pub use crate::core::global::global;
pub use crate::core::registry::MemoryRecord;
pub use crate::core::warnings::Warning;

pub use diagnostics::{suppress_diagnostics, WarningKind};

/// Generate a report for the [`global()`] tracker.
///
/// Returns `None` when the report buffer cannot be allocated, and always
/// with the `minimal` feature.
pub fn generate_report() -> Option<Report> {
    global().report()
}

/// Release a report buffer.
///
/// Same as dropping the report. The buffer was never tracked, so this
/// bypasses double-free detection.
pub fn release_report(report: Report) {
    drop(report);
}
