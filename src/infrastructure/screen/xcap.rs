//! Screen capture adapter using xcap

use std::io::Cursor;

use async_trait::async_trait;

use crate::application::ports::{CaptureError, ScreenCapture};
use crate::domain::{ImageEncoding, ScreenImage};

/// Linear downscale factor applied before encoding. Quarter resolution
/// keeps screenshots well under typical provider payload limits while
/// leaving UI text legible.
const SCALE_DIVISOR: u32 = 4;

/// Captures the primary display, downscaled and JPEG-compressed
pub struct XcapScreenCapture;

impl XcapScreenCapture {
    /// Create a new xcap capture adapter
    pub fn new() -> Self {
        Self
    }

    fn capture_blocking() -> Result<ScreenImage, CaptureError> {
        let monitors =
            xcap::Monitor::all().map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;
        if monitors.is_empty() {
            return Err(CaptureError::NoDisplay);
        }

        // Prefer the primary monitor, falling back to the first.
        let index = monitors
            .iter()
            .position(|m| m.is_primary().unwrap_or(false))
            .unwrap_or(0);

        let image = monitors[index]
            .capture_image()
            .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;

        let (w, h) = (image.width(), image.height());
        let resized = image::imageops::resize(
            &image,
            (w / SCALE_DIVISOR).max(1),
            (h / SCALE_DIVISOR).max(1),
            image::imageops::FilterType::Triangle,
        );

        // JPEG has no alpha channel.
        let rgb = image::DynamicImage::ImageRgba8(resized).to_rgb8();

        let mut buf = Cursor::new(Vec::new());
        rgb.write_to(&mut buf, image::ImageFormat::Jpeg)
            .map_err(|e| CaptureError::EncodeFailed(e.to_string()))?;

        Ok(ScreenImage::new(buf.into_inner(), ImageEncoding::Jpeg))
    }
}

impl Default for XcapScreenCapture {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScreenCapture for XcapScreenCapture {
    async fn capture(&self) -> Result<ScreenImage, CaptureError> {
        // xcap is blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(Self::capture_blocking)
            .await
            .map_err(|e| CaptureError::CaptureFailed(format!("Task join error: {}", e)))?
    }
}
