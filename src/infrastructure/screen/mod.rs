//! Screen capture infrastructure module

mod xcap;

pub use xcap::XcapScreenCapture;

use crate::application::ports::ScreenCapture;

/// Create the default screen capture adapter for the current platform
pub fn create_screen_capture() -> Box<dyn ScreenCapture> {
    Box::new(XcapScreenCapture::new())
}
