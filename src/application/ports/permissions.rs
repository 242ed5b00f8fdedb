//! Accessibility permission port interface

/// Port for the OS accessibility/input permission gate.
///
/// Reading selections and synthesizing paste keystrokes both need this
/// permission on macOS; other platforms report granted.
pub trait AccessibilityGate: Send + Sync {
    /// Whether the process may observe selections and synthesize keystrokes
    fn granted(&self) -> bool;

    /// Ask the OS to prompt the user. The OS decides whether a dialog
    /// actually appears; calling this more than once is harmless.
    fn request(&self);

    /// Step-by-step remediation instructions for the current platform
    fn remediation(&self) -> String;
}

/// Blanket implementation for boxed gates
impl AccessibilityGate for Box<dyn AccessibilityGate> {
    fn granted(&self) -> bool {
        self.as_ref().granted()
    }

    fn request(&self) {
        self.as_ref().request()
    }

    fn remediation(&self) -> String {
        self.as_ref().remediation()
    }
}
