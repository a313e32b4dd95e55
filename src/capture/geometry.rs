use serde::Serialize;

/// Native resolution of the display being captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayInfo {
    pub width: u32,
    pub height: u32,
}

/// Pixel dimensions handed to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CaptureSize {
    pub width: u32,
    pub height: u32,
}

/// Scale the native resolution by a percentage, rounding each dimension down
/// to an even pixel count. Encoders reject odd dimensions, so the rounding
/// rule is part of the contract.
pub fn derive_capture_size(display: DisplayInfo, percentage: u8) -> CaptureSize {
    let percentage = u32::from(percentage.clamp(1, 100));
    let scale = |dimension: u32| (dimension * percentage / 100) & !1;
    CaptureSize {
        width: scale(display.width),
        height: scale(display.height),
    }
}
