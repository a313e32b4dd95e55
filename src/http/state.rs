use crate::analytics::Analytics;
use crate::overlay::OverlayPermission;
use crate::service::RecordingService;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RecordingService>,
    pub overlay_permission: Arc<dyn OverlayPermission>,
    pub analytics: Arc<dyn Analytics>,
}

impl AppState {
    pub fn new(
        service: Arc<RecordingService>,
        overlay_permission: Arc<dyn OverlayPermission>,
        analytics: Arc<dyn Analytics>,
    ) -> Self {
        Self {
            service,
            overlay_permission,
            analytics,
        }
    }
}
