//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like the OS clipboard, global
//! hotkey facility, screen capture, and the provider HTTP APIs.

pub mod config;
pub mod hotkeys;
pub mod notification;
pub mod permissions;
pub mod providers;
pub mod screen;
pub mod selection;

// Re-export adapters
pub use config::{create_config_store, XdgConfigStore};
pub use hotkeys::GlobalHotkeyBackend;
pub use notification::{create_alert_sink, NotifyRustAlerts};
pub use permissions::{create_accessibility_gate, PlatformAccessibility};
pub use providers::{build_provider_set, ClaudeProvider, OpenAiProvider};
pub use screen::{create_screen_capture, XcapScreenCapture};
pub use selection::{create_selection, ClipboardSelection};
