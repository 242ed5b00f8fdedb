//! Desktop alert infrastructure
//!
//! Delivers outcome and failure alerts as native desktop notifications
//! using notify-rust.

mod notify_rust;

pub use notify_rust::NotifyRustAlerts;

use crate::application::ports::AlertSink;

/// Create the default alert sink for the current platform
pub fn create_alert_sink() -> Box<dyn AlertSink> {
    Box::new(NotifyRustAlerts::new())
}
