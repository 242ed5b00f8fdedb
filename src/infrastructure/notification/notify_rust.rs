//! Cross-platform alert adapter using notify-rust
//!
//! Works on Windows, macOS, and Linux.

use async_trait::async_trait;

use crate::application::ports::{AlertError, AlertKind, AlertSink};

/// Cross-platform alert sink using desktop notifications
pub struct NotifyRustAlerts {
    /// Application name for notifications
    app_name: String,
}

impl NotifyRustAlerts {
    /// Create a new notify-rust alert sink
    pub fn new() -> Self {
        Self {
            app_name: "QuillShift".to_string(),
        }
    }

    /// Create with custom app name
    pub fn with_app_name(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl Default for NotifyRustAlerts {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AlertSink for NotifyRustAlerts {
    async fn show(&self, kind: AlertKind, title: &str, message: &str) -> Result<(), AlertError> {
        let title = title.to_owned();
        let message = message.to_owned();
        let app_name = self.app_name.clone();
        let icon_name = kind.icon_name().to_string();

        // notify-rust operations can block, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            let mut notification = notify_rust::Notification::new();
            notification
                .appname(&app_name)
                .summary(&title)
                .body(&message)
                .icon(&icon_name);

            #[cfg(all(unix, not(target_os = "macos")))]
            {
                use notify_rust::Urgency;
                notification.urgency(match kind {
                    AlertKind::Error => Urgency::Critical,
                    AlertKind::Warning => Urgency::Normal,
                    AlertKind::Info => Urgency::Low,
                });
            }

            notification
                .show()
                .map_err(|e| AlertError::ShowFailed(e.to_string()))?;

            Ok(())
        })
        .await
        .map_err(|e| AlertError::ShowFailed(format!("Task join error: {}", e)))?
    }
}
