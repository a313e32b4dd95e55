use super::geometry::{CaptureSize, DisplayInfo};
use super::grant::CaptureGrant;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::info;

/// Everything the capture surface needs to begin recording.
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    /// Permission token authorizing the capture.
    pub grant: CaptureGrant,
    /// File the encoder writes into. Created by the session; never read back.
    pub output_path: PathBuf,
    /// Target dimensions, already rounded to even pixel counts.
    pub size: CaptureSize,
    /// Whether touch indicators are rendered into the capture.
    pub show_touches: bool,
}

/// Capture surface and encoder pipeline boundary.
///
/// Platform-specific implementations own the display handle and the video
/// encoder/muxer. The session controller only starts and stops them; teardown
/// is fire-and-forget.
#[async_trait::async_trait]
pub trait CaptureBackend: Send + Sync {
    /// Native resolution of the display this backend captures.
    async fn display_info(&self) -> Result<DisplayInfo>;

    /// Acquire the capture surface and begin encoding into the output file.
    async fn start(&mut self, request: CaptureRequest) -> Result<()>;

    /// Stop capturing and release the surface.
    async fn stop(&mut self) -> Result<()>;

    /// Check if the backend is currently capturing.
    fn is_capturing(&self) -> bool;

    /// Get backend name for logging.
    fn name(&self) -> &str;
}

/// Capture source selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureSource {
    /// The platform's primary display.
    Primary,
    /// In-process virtual display, for headless hosts and tests.
    Virtual,
}

/// Capture backend factory.
pub struct CaptureBackendFactory;

impl CaptureBackendFactory {
    pub fn create(source: CaptureSource) -> Result<Box<dyn CaptureBackend>> {
        match source {
            CaptureSource::Primary => {
                anyhow::bail!("no platform capture backend is available in this build")
            }
            CaptureSource::Virtual => Ok(Box::new(VirtualCaptureBackend::new())),
        }
    }
}

/// Backend over a fixed virtual display. Accepts every request and records
/// the last one so callers can inspect what would have been encoded.
pub struct VirtualCaptureBackend {
    display: DisplayInfo,
    capturing: AtomicBool,
    last_request: Mutex<Option<CaptureRequest>>,
}

impl VirtualCaptureBackend {
    pub fn new() -> Self {
        Self::with_display(DisplayInfo { width: 1080, height: 1920 })
    }

    pub fn with_display(display: DisplayInfo) -> Self {
        Self {
            display,
            capturing: AtomicBool::new(false),
            last_request: Mutex::new(None),
        }
    }

    pub fn last_request(&self) -> Option<CaptureRequest> {
        self.last_request.lock().expect("request lock poisoned").clone()
    }
}

impl Default for VirtualCaptureBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CaptureBackend for VirtualCaptureBackend {
    async fn display_info(&self) -> Result<DisplayInfo> {
        Ok(self.display)
    }

    async fn start(&mut self, request: CaptureRequest) -> Result<()> {
        info!(
            "Virtual capture started: {}x{} -> {}",
            request.size.width,
            request.size.height,
            request.output_path.display()
        );
        *self.last_request.lock().expect("request lock poisoned") = Some(request);
        self.capturing.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        self.capturing.store(false, Ordering::SeqCst);
        info!("Virtual capture stopped");
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "virtual"
    }
}
