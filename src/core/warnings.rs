//! Bounded, append-only warning log.

use crate::api::site::CallSite;
use crate::diagnostics::WarningKind;

/// One recorded anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Warning {
    /// What went wrong.
    pub kind: WarningKind,
    /// Where the offending operation was issued.
    pub site: CallSite,
}

impl Warning {
    /// Create a warning.
    pub const fn new(kind: WarningKind, site: CallSite) -> Self {
        Self { kind, site }
    }

    /// The report message.
    pub const fn message(&self) -> &'static str {
        self.kind.message()
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.site, self.kind.message())
    }
}

/// Append-only list with a fixed capacity.
///
/// Storage is reserved up front and never grows. Once full, new warnings
/// are dropped and only counted.
#[derive(Debug)]
pub(crate) struct WarningLog {
    entries: Vec<Warning>,
    capacity: usize,
    dropped: usize,
}

impl WarningLog {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Append a warning if there is room. Returns whether it was stored.
    pub(crate) fn record(&mut self, warning: Warning) -> bool {
        if self.entries.len() < self.capacity {
            self.entries.push(warning);
            true
        } else {
            self.dropped = self.dropped.saturating_add(1);
            false
        }
    }

    /// Warnings in recording order.
    pub(crate) fn iter(&self) -> std::slice::Iter<'_, Warning> {
        self.entries.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Warnings that arrived after the log was full.
    pub(crate) fn dropped(&self) -> usize {
        self.dropped
    }

    /// Forget all warnings. Keeps the reserved storage.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.dropped = 0;
    }
}
