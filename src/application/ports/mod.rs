//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod alert;
pub mod config;
pub mod hotkeys;
pub mod permissions;
pub mod provider;
pub mod screen;
pub mod selection;

// Re-export common types
pub use alert::{AlertError, AlertKind, AlertSink};
pub use config::ConfigStore;
pub use hotkeys::{HotkeyBackend, HotkeyError, HotkeyToken};
pub use permissions::AccessibilityGate;
pub use provider::{ModelDescriptor, Provider, ProviderError, MODEL_FRESHNESS_DAYS};
pub use screen::{CaptureError, ScreenCapture};
pub use selection::{SelectionError, TextSelection};
