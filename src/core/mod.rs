//! Tracking engine internals.

pub(crate) mod global;
pub(crate) mod registry;
pub(crate) mod state;
pub(crate) mod tls;
pub(crate) mod warnings;
