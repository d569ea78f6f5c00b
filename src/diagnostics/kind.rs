//! Warning kinds and their diagnostic codes.
//!
//! Codes follow the pattern:
//! - `MD0xx` - allocation side (malloc/calloc/realloc growth)
//! - `MD1xx` - release side (free/realloc shrink to zero)

/// An anomaly detected by the tracker.
///
/// None of these alter control flow at the call site; they are stored in
/// the warning log and surfaced through the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// The real allocation returned null.
    AllocationFailed,
    /// The registry is full; the block exists on the heap but is untracked.
    CapacityExhausted,
    /// `count * size` of a zero-allocation overflowed.
    SizeOverflow,
    /// Release was called with a null pointer.
    NullRelease,
    /// Release was called on an address with no live record.
    DoubleRelease,
}

impl WarningKind {
    /// Stable diagnostic code.
    pub const fn code(&self) -> &'static str {
        match self {
            WarningKind::AllocationFailed => "MD001",
            WarningKind::CapacityExhausted => "MD002",
            WarningKind::SizeOverflow => "MD003",
            WarningKind::NullRelease => "MD101",
            WarningKind::DoubleRelease => "MD102",
        }
    }

    /// The message printed in the report.
    pub const fn message(&self) -> &'static str {
        match self {
            WarningKind::AllocationFailed => "Memory allocation failed",
            WarningKind::CapacityExhausted => "Max allocations reached",
            WarningKind::SizeOverflow => "Allocation size overflow",
            WarningKind::NullRelease => "Tried to free a null ptr",
            WarningKind::DoubleRelease => "Double free detected",
        }
    }

    /// Suggested fix, used for live diagnostics output.
    pub const fn help(&self) -> &'static str {
        match self {
            WarningKind::AllocationFailed => "the heap is exhausted or the requested size is unreasonable",
            WarningKind::CapacityExhausted => {
                "raise TrackerConfig::max_allocations (or MEMD_MAX_ALLOCATIONS); this block will not appear in leak reports"
            }
            WarningKind::SizeOverflow => "count * size does not fit in usize; nothing was allocated",
            WarningKind::NullRelease => "releasing null is a no-op, but usually points at a missed allocation check",
            WarningKind::DoubleRelease => {
                "the block was already released (or never tracked); the release was not forwarded to the heap"
            }
        }
    }
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
