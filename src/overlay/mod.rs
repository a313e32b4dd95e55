//! On-screen overlay collaborators.
//!
//! The overlay is a floating control surface rendered above other
//! applications. Its layout and rendering live outside this crate; the
//! session controller only tells it when to appear and disappear, and the
//! launch surface checks the draw permission before anything else happens.

use crate::error::ServiceError;
use tracing::info;

/// Floating capture-control overlay.
///
/// Calls are fire-and-forget: overlay placement is an OS-level UI operation
/// and the service accepts eventual consistency of its visible state.
pub trait OverlayController: Send + Sync {
    fn show(&self);
    fn hide(&self);
}

/// Permission to draw above other applications.
pub trait OverlayPermission: Send + Sync {
    fn can_draw_overlays(&self) -> bool;

    /// URI of the system screen where the user can grant the permission.
    fn settings_uri(&self) -> String;

    /// Check the permission, failing with the grant-screen URI so callers can
    /// redirect the user instead of proceeding.
    fn check(&self) -> Result<(), ServiceError> {
        if self.can_draw_overlays() {
            Ok(())
        } else {
            Err(ServiceError::OverlayPermissionDenied {
                settings_uri: self.settings_uri(),
            })
        }
    }
}

/// Overlay that records show/hide calls in the service log.
pub struct LoggingOverlay;

impl OverlayController for LoggingOverlay {
    fn show(&self) {
        info!("Showing capture overlay");
    }

    fn hide(&self) {
        info!("Hiding capture overlay");
    }
}

/// Fixed permission answer, for hosts without a per-app overlay grant.
pub struct StaticOverlayPermission {
    granted: bool,
}

impl StaticOverlayPermission {
    pub fn granted() -> Self {
        Self { granted: true }
    }

    pub fn denied() -> Self {
        Self { granted: false }
    }
}

impl OverlayPermission for StaticOverlayPermission {
    fn can_draw_overlays(&self) -> bool {
        self.granted
    }

    fn settings_uri(&self) -> String {
        "settings://manage-overlay-permission/screencastd".to_string()
    }
}
