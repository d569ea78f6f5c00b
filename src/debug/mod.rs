//! Debug utilities for released memory.
//!
//! Only compiled when the `debug` feature is enabled.

pub mod poison;
