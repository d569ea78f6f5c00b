//! Registry and warning log, mutated together under one lock.

use crate::api::config::TrackerConfig;
use crate::api::site::CallSite;
use crate::core::registry::{MemoryRecord, Registry};
use crate::core::warnings::{Warning, WarningLog};
use crate::diagnostics::WarningKind;

/// Everything a tracker knows.
///
/// Methods return the warning they raised (stored or dropped) so the
/// caller can emit it after releasing the lock.
#[derive(Debug)]
pub(crate) struct TrackerState {
    pub(crate) registry: Registry,
    pub(crate) warnings: WarningLog,
}

impl TrackerState {
    pub(crate) fn new(config: &TrackerConfig) -> Self {
        Self {
            registry: Registry::new(config.max_allocations),
            warnings: WarningLog::new(config.max_warnings),
        }
    }

    /// Record a warning.
    pub(crate) fn warn(&mut self, kind: WarningKind, site: CallSite) -> Warning {
        let warning = Warning::new(kind, site);
        self.warnings.record(warning);
        warning
    }

    /// Track a block, or warn about why it could not be tracked.
    pub(crate) fn insert(&mut self, address: usize, size: usize, site: CallSite) -> Option<Warning> {
        match self.registry.insert(address, size, site) {
            Ok(()) => None,
            Err(kind) => Some(self.warn(kind, site)),
        }
    }

    /// Untrack a block, or warn about a null or double release.
    pub(crate) fn erase(&mut self, address: usize, site: CallSite) -> Result<MemoryRecord, Warning> {
        self.registry
            .erase(address)
            .map_err(|kind| self.warn(kind, site))
    }

    pub(crate) fn clear(&mut self) {
        self.registry.clear();
        self.warnings.clear();
    }
}
