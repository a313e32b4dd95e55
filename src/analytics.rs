//! Launch-event reporting boundary.
//!
//! The actual analytics backend lives outside this crate; the service only
//! needs a place to send category/action pairs when a launch surface fires.

use tracing::info;

pub const CATEGORY_SHORTCUT: &str = "shortcut";
pub const ACTION_SHORTCUT_LAUNCHED: &str = "shortcut_launched";
pub const ACTION_QUICK_TILE_LAUNCHED: &str = "quick_tile_launched";

/// Analytics event sink.
pub trait Analytics: Send + Sync {
    /// Report a single event. Fire-and-forget, never fails.
    fn send(&self, category: &str, action: &str);
}

/// Default sink that records events in the service log.
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics {
    fn send(&self, category: &str, action: &str) {
        info!("Analytics event: category={} action={}", category, action);
    }
}
