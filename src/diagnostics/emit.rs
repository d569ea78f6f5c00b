//! Live warning emission.
//!
//! The warning log is the source of truth; this only mirrors warnings to
//! stderr (`diagnostics` feature) or to the `log` crate (`log` feature) at
//! the moment they are recorded.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::core::warnings::Warning;

/// Global flag to suppress live output (for testing).
static DIAGNOSTICS_SUPPRESSED: AtomicBool = AtomicBool::new(false);

/// Suppress all live diagnostic output. The warning log is unaffected.
pub fn suppress_diagnostics(suppress: bool) {
    DIAGNOSTICS_SUPPRESSED.store(suppress, Ordering::Relaxed);
}

/// Check if live diagnostics are suppressed.
pub fn is_suppressed() -> bool {
    DIAGNOSTICS_SUPPRESSED.load(Ordering::Relaxed)
}

/// Mirror a freshly recorded warning to the configured outputs.
///
/// Must not be called with a tracker lock held.
pub fn emit(warning: &Warning) {
    if is_suppressed() {
        return;
    }

    #[cfg(feature = "diagnostics")]
    emit_to_stderr(warning);

    #[cfg(feature = "log")]
    emit_to_log(warning);

    #[cfg(not(any(feature = "diagnostics", feature = "log")))]
    let _ = warning;
}

/// Emit every warning in `warnings`, skipping empty entries.
pub(crate) fn emit_all<const N: usize>(warnings: [Option<Warning>; N]) {
    for warning in warnings.iter().flatten() {
        emit(warning);
    }
}

#[cfg(feature = "diagnostics")]
fn emit_to_stderr(warning: &Warning) {
    use std::io::Write;

    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(
        stderr,
        "[memd][{}] warning: {}",
        warning.kind.code(),
        warning.kind.message()
    );
    let _ = writeln!(stderr, "  --> {}", warning.site);
    let _ = writeln!(stderr, "  help: {}", warning.kind.help());
    let _ = writeln!(stderr);
}

#[cfg(feature = "log")]
fn emit_to_log(warning: &Warning) {
    log::warn!(
        "[{}] {} ({})",
        warning.kind.code(),
        warning.kind.message(),
        warning.site
    );
}
