//! Domain layer - Core business logic
//!
//! Value objects, entities, and domain errors. Nothing here talks to the
//! OS, the network, or the filesystem.

pub mod binding;
pub mod config;
pub mod enhancement;
pub mod error;
pub mod hotkey;
pub mod request;
pub mod screen;

// Re-export common types
pub use binding::{Binding, BindingMode, ProviderId};
pub use config::{AppConfig, BindingConfig};
pub use enhancement::{recover, EnhancementPayload, EnhancementPrompt, ExtractError};
pub use error::*;
pub use hotkey::{KeyCode, KeyCombo, Modifier, ModifierSet};
pub use request::{ProcessingRequest, SourceText};
pub use screen::{ImageEncoding, ScreenImage};
