//! Clipboard-backed selection adapter
//!
//! Reads the selection by synthesizing the platform copy combo and reading
//! the clipboard back; delivers text by loading the clipboard and
//! synthesizing paste. Pasting over a selection replaces it; pasting with
//! nothing selected inserts at the cursor, which is why `replace` and
//! `insert` share one paste path. Prior clipboard contents are not
//! preserved.

use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{SelectionError, TextSelection};

/// Delay after key synthesis for the target app to process the combo
const KEY_SETTLE: Duration = Duration::from_millis(150);

/// arboard's set_text is synchronous; a short yield lets the OS finalise
/// the write before the paste combo fires
const CLIPBOARD_SETTLE: Duration = Duration::from_millis(10);

/// Cross-platform selection adapter using arboard + enigo
pub struct ClipboardSelection;

impl ClipboardSelection {
    /// Create a new clipboard selection adapter
    pub fn new() -> Self {
        Self
    }

    /// Synthesize the platform copy/paste combo (Cmd on macOS, Ctrl elsewhere)
    fn send_combo(key: char) -> Result<(), String> {
        use enigo::{Direction, Enigo, Key, Keyboard, Settings};

        let mut enigo = Enigo::new(&Settings::default())
            .map_err(|e| format!("Failed to create enigo: {}", e))?;

        #[cfg(target_os = "macos")]
        let modifier = Key::Meta;
        #[cfg(not(target_os = "macos"))]
        let modifier = Key::Control;

        enigo
            .key(modifier, Direction::Press)
            .map_err(|e| e.to_string())?;
        let clicked = enigo.key(Key::Unicode(key), Direction::Click);
        // Lift the modifier even when the click failed.
        let released = enigo.key(modifier, Direction::Release);

        clicked.map_err(|e| e.to_string())?;
        released.map_err(|e| e.to_string())?;
        Ok(())
    }

    async fn paste(text: String) -> Result<(), SelectionError> {
        // arboard and enigo are blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| SelectionError::ClipboardUnavailable(e.to_string()))?;

            clipboard
                .set_text(&text)
                .map_err(|e| SelectionError::WriteFailed(e.to_string()))?;
            std::thread::sleep(CLIPBOARD_SETTLE);

            Self::send_combo('v').map_err(SelectionError::WriteFailed)
        })
        .await
        .map_err(|e| SelectionError::WriteFailed(format!("Task join error: {}", e)))?
    }
}

impl Default for ClipboardSelection {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextSelection for ClipboardSelection {
    async fn read(&self) -> Result<String, SelectionError> {
        tokio::task::spawn_blocking(|| {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| SelectionError::ClipboardUnavailable(e.to_string()))?;

            // Clear first so stale clipboard contents never masquerade as
            // the current selection.
            let _ = clipboard.clear();

            Self::send_combo('c').map_err(SelectionError::ReadFailed)?;
            std::thread::sleep(KEY_SETTLE);

            match clipboard.get_text() {
                Ok(text) => Ok(text),
                // Nothing was copied, so nothing is selected.
                Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
                Err(e) => Err(SelectionError::ReadFailed(e.to_string())),
            }
        })
        .await
        .map_err(|e| SelectionError::ReadFailed(format!("Task join error: {}", e)))?
    }

    async fn replace(&self, text: &str) -> Result<(), SelectionError> {
        Self::paste(text.to_owned()).await
    }

    async fn insert(&self, text: &str) -> Result<(), SelectionError> {
        Self::paste(text.to_owned()).await
    }
}
