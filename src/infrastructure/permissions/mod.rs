//! Accessibility permission implementations

mod platform;

pub use platform::PlatformAccessibility;

use crate::application::ports::AccessibilityGate;

/// Create the accessibility gate for the current platform
pub fn create_accessibility_gate() -> Box<dyn AccessibilityGate> {
    Box::new(PlatformAccessibility::new())
}
