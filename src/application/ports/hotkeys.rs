//! Global hotkey backend port interface

use thiserror::Error;

use crate::domain::KeyCombo;

/// Opaque handle identifying a registered hotkey.
///
/// Tokens are only meaningful to the backend that issued them and only
/// until the hotkey is unregistered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HotkeyToken(pub u32);

/// Errors from hotkey registration
#[derive(Debug, Clone, Error)]
pub enum HotkeyError {
    #[error("Failed to register {combo}: {reason}")]
    RegisterFailed { combo: String, reason: String },

    #[error("Failed to unregister hotkey: {0}")]
    UnregisterFailed(String),

    #[error("Hotkey backend unavailable: {0}")]
    BackendUnavailable(String),
}

/// Port for registering system-wide hotkeys with the OS.
///
/// Not required to be Send: on macOS the event tap must live on the
/// main thread, so the backend is driven from the thread that created it.
pub trait HotkeyBackend {
    /// Register a key combination, returning a token for later events.
    /// Fails when the OS rejects the combination or another application
    /// already owns it.
    fn register(&mut self, combo: &KeyCombo) -> Result<HotkeyToken, HotkeyError>;

    /// Unregister a previously registered combination
    fn unregister(&mut self, token: HotkeyToken) -> Result<(), HotkeyError>;
}
