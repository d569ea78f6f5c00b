//! Build script for memd.
//!
//! Prints build-time notes about feature combinations that change what the
//! tracker does.

use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_MINIMAL");
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_DEBUG");
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_DIAGNOSTICS");
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_LOG");
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_PARKING_LOT");

    let minimal_enabled = env::var("CARGO_FEATURE_MINIMAL").is_ok();
    let debug_enabled = env::var("CARGO_FEATURE_DEBUG").is_ok();
    let diagnostics_enabled = env::var("CARGO_FEATURE_DIAGNOSTICS").is_ok();
    let log_enabled = env::var("CARGO_FEATURE_LOG").is_ok();
    let parking_lot_enabled = env::var("CARGO_FEATURE_PARKING_LOT").is_ok();

    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());
    let is_release = profile == "release";

    // =========================================================================
    // Feature-specific diagnostics
    // =========================================================================

    if minimal_enabled {
        emit_info("Minimal mode: tracking compiled out");
        emit_note("Heap calls are forwarded untouched and reports are never generated.");

        if debug_enabled || diagnostics_enabled || log_enabled {
            emit_warning("'minimal' disables tracking; debug/diagnostics/log have nothing to report");
        }
        return;
    }

    if debug_enabled && is_release {
        emit_warning("Debug features enabled in release build!");
        emit_note("Freed blocks are poisoned with 0xCD before release.");
    }

    if !diagnostics_enabled && !log_enabled && !is_release {
        emit_note("Tip: enable 'diagnostics' to see warnings on stderr as they happen:");
        emit_note("  memd = { version = \"0.1\", features = [\"diagnostics\"] }");
    }

    if is_release && !parking_lot_enabled {
        emit_note("Tip: Consider enabling 'parking_lot' for a cheaper tracker lock:");
        emit_note("  memd = { version = \"0.1\", features = [\"parking_lot\"] }");
    }
}

// =============================================================================
// Diagnostic emission helpers
// =============================================================================

fn emit_info(msg: &str) {
    println!("cargo:warning=[memd] {}", msg);
}

fn emit_note(msg: &str) {
    println!("cargo:warning=[memd]    {}", msg);
}

fn emit_warning(msg: &str) {
    println!("cargo:warning=[memd] warning: {}", msg);
}
