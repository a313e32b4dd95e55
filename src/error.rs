use thiserror::Error;

/// Errors surfaced by the recording service.
///
/// Expected conditions (a busy coordinator, a pending overlay permission) are
/// absorbed close to where they occur; only a start request carrying no usable
/// capture grant is treated as a contract violation and aborts loudly.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The capture grant is missing its result code or token data.
    #[error("capture grant result code or data missing")]
    ConfigurationMissing,

    /// A session is already running; duplicate triggers are ignored.
    #[error("a recording session is already running")]
    SessionBusy,

    /// The overlay draw permission has not been granted yet.
    #[error("overlay permission not granted, visit {settings_uri}")]
    OverlayPermissionDenied { settings_uri: String },

    /// The capture surface or encoder could not be acquired.
    #[error("capture acquisition failed: {0}")]
    CaptureAcquisitionFailure(String),

    /// The requested operation is not part of this service's contract.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}
