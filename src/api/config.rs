//! Tracker configuration.

/// Default registry capacity.
pub const DEFAULT_MAX_ALLOCATIONS: usize = 1000;

/// Default warning log capacity.
pub const DEFAULT_MAX_WARNINGS: usize = 1000;

/// Default initial size of the report buffer (10 KiB).
pub const DEFAULT_REPORT_CAPACITY: usize = 10 * 1024;

/// Configuration for a [`Tracker`](crate::Tracker).
///
/// Capacities are fixed for the lifetime of the tracker: storage for
/// records and warnings is reserved once, at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Maximum number of simultaneously tracked allocations (default: 1000)
    pub max_allocations: usize,

    /// Maximum number of stored warnings (default: 1000)
    pub max_warnings: usize,

    /// Initial report buffer size in bytes; doubled as needed (default: 10 KiB)
    pub report_capacity: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_allocations: DEFAULT_MAX_ALLOCATIONS,
            max_warnings: DEFAULT_MAX_WARNINGS,
            report_capacity: DEFAULT_REPORT_CAPACITY,
        }
    }
}

impl TrackerConfig {
    /// A small config for tests or constrained environments.
    pub fn minimal() -> Self {
        Self {
            max_allocations: 64,
            max_warnings: 64,
            report_capacity: 1024,
        }
    }

    /// Read overrides from the environment, falling back to the defaults.
    ///
    /// - `MEMD_MAX_ALLOCATIONS`
    /// - `MEMD_MAX_WARNINGS`
    /// - `MEMD_REPORT_CAPACITY`
    ///
    /// Values that are missing or do not parse as `usize` are ignored.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_allocations: env_usize("MEMD_MAX_ALLOCATIONS").unwrap_or(defaults.max_allocations),
            max_warnings: env_usize("MEMD_MAX_WARNINGS").unwrap_or(defaults.max_warnings),
            report_capacity: env_usize("MEMD_REPORT_CAPACITY").unwrap_or(defaults.report_capacity),
        }
    }

    /// Builder pattern: set registry capacity.
    pub fn with_max_allocations(mut self, max: usize) -> Self {
        self.max_allocations = max;
        self
    }

    /// Builder pattern: set warning log capacity.
    pub fn with_max_warnings(mut self, max: usize) -> Self {
        self.max_warnings = max;
        self
    }

    /// Builder pattern: set the initial report buffer size.
    pub fn with_report_capacity(mut self, bytes: usize) -> Self {
        self.report_capacity = bytes;
        self
    }
}

fn env_usize(key: &str) -> Option<usize> {
    std::env::var(key).ok()?.trim().parse().ok()
}
