//! Backing heap.

pub(crate) mod heap;
