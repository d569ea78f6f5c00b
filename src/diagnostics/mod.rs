//! Warning taxonomy and live diagnostics.
//!
//! ## Diagnostic Codes
//!
//! | Code  | Meaning                        |
//! |-------|--------------------------------|
//! | MD001 | Memory allocation failed       |
//! | MD002 | Max allocations reached        |
//! | MD003 | Allocation size overflow       |
//! | MD101 | Tried to free a null ptr       |
//! | MD102 | Double free detected           |

pub mod emit;
pub mod kind;

pub use emit::{emit, is_suppressed, suppress_diagnostics};
pub use kind::WarningKind;
