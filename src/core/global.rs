//! Process-wide default tracker.

use std::sync::OnceLock;

use crate::api::config::TrackerConfig;
use crate::api::tracker::Tracker;

static GLOBAL: OnceLock<Tracker> = OnceLock::new();

/// The tracker used by the single-argument forms of the tracking macros.
///
/// Built on first use from [`TrackerConfig::from_env`] and kept for the
/// lifetime of the process.
pub fn global() -> &'static Tracker {
    GLOBAL.get_or_init(|| Tracker::new(TrackerConfig::from_env()))
}
