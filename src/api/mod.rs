//! Public API for memd.
//!
//! This module contains all user-facing types and functions.

pub mod config;
pub mod pause;
pub mod report;
pub mod site;
pub mod stats;
pub mod tracker;
