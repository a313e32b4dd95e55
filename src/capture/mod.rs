//! Capture permission, geometry, and surface acquisition.
//!
//! This module holds the boundary to the platform's screen-capture machinery:
//! - The capture grant produced by the permission flow
//! - Capture-size derivation from the native display resolution
//! - The `CaptureBackend` trait the encoder pipeline hides behind

mod geometry;
mod grant;
mod surface;

pub use geometry::{derive_capture_size, CaptureSize, DisplayInfo};
pub use grant::{CaptureGrant, CaptureToken};
pub use surface::{
    CaptureBackend, CaptureBackendFactory, CaptureRequest, CaptureSource, VirtualCaptureBackend,
};
