use crate::error::ServiceError;
use serde::{Deserialize, Serialize};

/// Opaque platform token authorizing screen-content capture for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureToken(String);

impl CaptureToken {
    pub fn new(data: impl Into<String>) -> Self {
        Self(data.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Result of the capture permission flow: a result code plus the opaque token.
///
/// Produced by the permission collaborator; at most one grant is in use at a
/// time, enforced by the coordinator's single-session rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureGrant {
    pub result_code: i32,
    pub data: Option<CaptureToken>,
}

impl CaptureGrant {
    pub fn new(result_code: i32, data: Option<CaptureToken>) -> Self {
        Self { result_code, data }
    }

    /// Reject grants the permission flow never actually approved.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.result_code == 0 || self.data.is_none() {
            return Err(ServiceError::ConfigurationMissing);
        }
        Ok(())
    }
}
