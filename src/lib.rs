pub mod analytics;
pub mod capture;
pub mod config;
pub mod demomode;
pub mod error;
pub mod http;
pub mod notify;
pub mod overlay;
pub mod service;
pub mod session;

pub use capture::{
    derive_capture_size, CaptureBackend, CaptureBackendFactory, CaptureGrant, CaptureRequest,
    CaptureSize, CaptureSource, CaptureToken, DisplayInfo, VirtualCaptureBackend,
};
pub use config::Config;
pub use error::ServiceError;
pub use http::{create_router, AppState};
pub use service::{RecordingService, StartDisposition};
pub use session::{
    Effect, Machine, RecordingConfig, RecordingSession, SessionConfig, SessionEvent,
    SessionListener, SessionState, SessionStats,
};
