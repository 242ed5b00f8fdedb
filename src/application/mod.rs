//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod ports;
pub mod process;
pub mod provider_set;
pub mod registry;

// Re-export use cases
pub use process::{ProcessingEvent, ProcessingOrchestrator, ProcessingOutcome};
pub use provider_set::{ProviderSet, ResolveError};
pub use registry::{ReloadSummary, ShortcutRegistry};
