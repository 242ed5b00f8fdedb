//! Alert port interface

use async_trait::async_trait;
use thiserror::Error;

/// Alert errors
#[derive(Debug, Clone, Error)]
pub enum AlertError {
    #[error("Failed to show alert: {0}")]
    ShowFailed(String),
}

/// Alert severity, mapped by adapters to icon and urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Warning,
    Error,
}

impl AlertKind {
    /// Get the freedesktop icon name
    pub const fn icon_name(&self) -> &'static str {
        match self {
            Self::Info => "dialog-information",
            Self::Warning => "dialog-warning",
            Self::Error => "dialog-error",
        }
    }
}

/// Port for user-facing alerts.
///
/// Every failure in the processing pipeline ends up here as a
/// human-readable, actionable message.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Show an alert.
    ///
    /// # Arguments
    /// * `kind` - Severity
    /// * `title` - Short headline
    /// * `message` - Body with the actionable detail
    async fn show(&self, kind: AlertKind, title: &str, message: &str) -> Result<(), AlertError>;
}

/// Blanket implementation for boxed alert sinks
#[async_trait]
impl AlertSink for Box<dyn AlertSink> {
    async fn show(&self, kind: AlertKind, title: &str, message: &str) -> Result<(), AlertError> {
        self.as_ref().show(kind, title, message).await
    }
}
