//! OS accessibility permission gate
//!
//! macOS requires the app to be trusted under Privacy & Security >
//! Accessibility before it may observe selections or synthesize
//! keystrokes. Other platforms have no equivalent gate.

use crate::application::ports::AccessibilityGate;

/// Accessibility gate backed by the current platform's permission model
pub struct PlatformAccessibility;

impl PlatformAccessibility {
    /// Create a new platform accessibility gate
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlatformAccessibility {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessibilityGate for PlatformAccessibility {
    fn granted(&self) -> bool {
        probe_accessibility()
    }

    fn request(&self) {
        tracing::debug!("requesting accessibility permission from the OS");
        trigger_permission_prompt();
    }

    fn remediation(&self) -> String {
        remediation_steps().to_string()
    }
}

#[cfg(target_os = "macos")]
fn probe_accessibility() -> bool {
    use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};

    // Creating an event source fails while the process is untrusted
    CGEventSource::new(CGEventSourceStateID::CombinedSessionState).is_ok()
}

#[cfg(not(target_os = "macos"))]
fn probe_accessibility() -> bool {
    true
}

#[cfg(target_os = "macos")]
fn trigger_permission_prompt() {
    use core_graphics::event::CGEvent;
    use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};

    // Touching the HID event chain from an untrusted process makes macOS
    // show the Accessibility prompt and list the app in System Settings.
    // The event is created but never posted.
    if let Ok(source) = CGEventSource::new(CGEventSourceStateID::HIDSystemState) {
        let _ = CGEvent::new_keyboard_event(source, 0, true);
    }
}

#[cfg(not(target_os = "macos"))]
fn trigger_permission_prompt() {}

#[cfg(target_os = "macos")]
fn remediation_steps() -> &'static str {
    "Open System Settings → Privacy & Security → Accessibility, \
     add QuillShift and switch it on, then press the shortcut again."
}

#[cfg(not(target_os = "macos"))]
fn remediation_steps() -> &'static str {
    "Make sure your desktop session allows programs to read the clipboard \
     and send keystrokes, then press the shortcut again."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_creates_successfully() {
        let _gate = PlatformAccessibility::new();
    }

    #[test]
    fn remediation_is_actionable() {
        let gate = PlatformAccessibility::default();
        assert!(!gate.remediation().is_empty());
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn granted_without_prompt_on_this_platform() {
        let gate = PlatformAccessibility::new();
        assert!(gate.granted());
    }
}
