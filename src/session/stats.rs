use super::machine::SessionState;
use crate::capture::CaptureSize;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use uuid::Uuid;

/// Snapshot of a recording session for the status surface.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStats {
    pub session_id: Uuid,

    pub state: SessionState,

    /// When the session was created.
    pub started_at: DateTime<Utc>,

    /// Seconds since creation.
    pub duration_secs: f64,

    /// Derived capture dimensions, once acquisition has run.
    pub capture_size: Option<CaptureSize>,

    /// File the encoder writes into, once acquisition has run.
    pub output_path: Option<PathBuf>,
}
