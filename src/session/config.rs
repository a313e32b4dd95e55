use crate::capture::CaptureSource;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a recording session.
///
/// Sampled once from the service configuration when the session is created
/// and immutable for the session's lifetime; settings changed mid-recording
/// apply to the next session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Run a countdown between user confirmation and capture start.
    pub show_countdown: bool,

    /// Countdown length in seconds.
    pub countdown_seconds: u64,

    /// Capture size as a percentage of the native display resolution (1-100).
    pub video_size_percentage: u8,

    /// Show the recording notification and promote the process to the
    /// foreground while capturing. Disabling this is a deliberate trade-off:
    /// capture runs without a visible notification and without the
    /// foreground-priority protection it anchors.
    pub show_notification: bool,

    /// Render touch indicators into the capture.
    pub show_touches: bool,

    /// Freeze status-bar indicators via demo mode while recording.
    pub use_demo_mode: bool,

    /// Directory recordings are written into.
    pub output_dir: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            show_countdown: true,
            countdown_seconds: 3,
            video_size_percentage: 100,
            show_notification: true,
            show_touches: false,
            use_demo_mode: false,
            output_dir: PathBuf::from("recordings"),
        }
    }
}

/// Recording settings as they appear in the service configuration file.
///
/// The per-session snapshot is taken with [`SessionConfig::from`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecordingConfig {
    pub show_countdown: bool,
    pub countdown_seconds: u64,
    pub video_size_percentage: u8,
    pub recording_notification: bool,
    pub show_touches: bool,
    pub use_demo_mode: bool,
    pub output_dir: PathBuf,
    pub capture_source: CaptureSource,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            show_countdown: true,
            countdown_seconds: 3,
            video_size_percentage: 100,
            recording_notification: true,
            show_touches: false,
            use_demo_mode: false,
            output_dir: PathBuf::from("recordings"),
            capture_source: CaptureSource::Virtual,
        }
    }
}

impl From<&RecordingConfig> for SessionConfig {
    fn from(config: &RecordingConfig) -> Self {
        Self {
            show_countdown: config.show_countdown,
            countdown_seconds: config.countdown_seconds,
            video_size_percentage: config.video_size_percentage,
            show_notification: config.recording_notification,
            show_touches: config.show_touches,
            use_demo_mode: config.use_demo_mode,
            output_dir: config.output_dir.clone(),
        }
    }
}
