//! Screen capture port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::screen::ScreenImage;

/// Capture errors
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("No display available to capture")]
    NoDisplay,

    #[error("Screen capture failed: {0}")]
    CaptureFailed(String),

    #[error("Failed to encode the screenshot: {0}")]
    EncodeFailed(String),
}

/// Port for capturing the current screen as compressed image data
#[async_trait]
pub trait ScreenCapture: Send + Sync {
    /// Capture the primary display, downscaled and compressed per the
    /// adapter's declared quality contract
    async fn capture(&self) -> Result<ScreenImage, CaptureError>;
}

/// Blanket implementation for boxed capture types
#[async_trait]
impl ScreenCapture for Box<dyn ScreenCapture> {
    async fn capture(&self) -> Result<ScreenImage, CaptureError> {
        self.as_ref().capture().await
    }
}
