//! Call-site provenance.

use std::panic::Location;

/// Source location of a tracked operation.
///
/// Usually built by the [`here!`](crate::here) macro or by
/// [`CallSite::caller`], which relies on `#[track_caller]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    /// Source file, as produced by `file!()`.
    pub file: &'static str,
    /// Source line, as produced by `line!()`.
    pub line: u32,
}

impl CallSite {
    /// Placeholder used for empty slots.
    pub const UNKNOWN: CallSite = CallSite::new("<unknown>", 0);

    /// Create a call site from a file and line.
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// The location of the caller of the function this is called from.
    #[track_caller]
    pub fn caller() -> Self {
        let location: &'static Location<'static> = Location::caller();
        Self::new(location.file(), location.line())
    }
}

impl std::fmt::Display for CallSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
