//! Tracker statistics.

/// A point-in-time snapshot of a tracker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerStats {
    /// Bytes ever recorded as allocated.
    pub total_allocated: usize,

    /// Bytes ever recorded as freed.
    pub total_freed: usize,

    /// Records currently live in the registry.
    pub live_allocations: usize,

    /// Registry capacity.
    pub max_allocations: usize,

    /// Warnings stored in the log.
    pub warning_count: usize,

    /// Warnings dropped because the log was full.
    pub dropped_warnings: usize,
}

impl TrackerStats {
    /// `total_allocated - total_freed`. Not clamped at zero.
    pub fn leaked_bytes(&self) -> i128 {
        self.total_allocated as i128 - self.total_freed as i128
    }

    /// Whether every tracked byte has been freed.
    pub fn is_balanced(&self) -> bool {
        self.leaked_bytes() == 0
    }

    /// Whether the registry has no free slot left.
    pub fn is_full(&self) -> bool {
        self.live_allocations >= self.max_allocations
    }
}

impl std::fmt::Display for TrackerStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Tracker Statistics:")?;
        writeln!(f, "  Allocated:  {} bytes", self.total_allocated)?;
        writeln!(f, "  Freed:      {} bytes", self.total_freed)?;
        writeln!(f, "  Leaked:     {} bytes", self.leaked_bytes())?;
        writeln!(f, "  Live:       {}/{}", self.live_allocations, self.max_allocations)?;
        writeln!(f, "  Warnings:   {} ({} dropped)", self.warning_count, self.dropped_warnings)?;
        Ok(())
    }
}
