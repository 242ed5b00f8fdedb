//! Selection infrastructure module
//!
//! Reads and writes the user's text selection through the system clipboard
//! plus synthesized copy/paste keystrokes.

mod clipboard;

pub use clipboard::ClipboardSelection;

use crate::application::ports::TextSelection;

/// Create the default selection adapter for the current platform
pub fn create_selection() -> Box<dyn TextSelection> {
    Box::new(ClipboardSelection::new())
}
