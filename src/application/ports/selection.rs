//! Text selection port interface

use async_trait::async_trait;
use thiserror::Error;

/// Selection errors
#[derive(Debug, Clone, Error)]
pub enum SelectionError {
    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("Failed to read the current selection: {0}")]
    ReadFailed(String),

    #[error("Failed to write the result back: {0}")]
    WriteFailed(String),
}

/// Port for reading and replacing the user's current text selection.
///
/// Implementations may use the system clipboard as a scratch channel; prior
/// clipboard contents are not preserved.
#[async_trait]
pub trait TextSelection: Send + Sync {
    /// Read the currently selected text. An empty string means nothing is
    /// selected.
    async fn read(&self) -> Result<String, SelectionError>;

    /// Replace the current selection with the given text
    async fn replace(&self, text: &str) -> Result<(), SelectionError>;

    /// Insert text at the cursor without consuming a selection
    async fn insert(&self, text: &str) -> Result<(), SelectionError>;
}

/// Blanket implementation for boxed selection types
#[async_trait]
impl TextSelection for Box<dyn TextSelection> {
    async fn read(&self) -> Result<String, SelectionError> {
        self.as_ref().read().await
    }

    async fn replace(&self, text: &str) -> Result<(), SelectionError> {
        self.as_ref().replace(text).await
    }

    async fn insert(&self, text: &str) -> Result<(), SelectionError> {
        self.as_ref().insert(text).await
    }
}
