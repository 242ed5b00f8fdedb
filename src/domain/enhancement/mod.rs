//! Enhancement domain module: payload schema, recovery, prompt composition

mod extract;
mod payload;
mod prompt;

pub use extract::{recover, ExtractError};
pub use payload::EnhancementPayload;
pub use prompt::{EnhancementPrompt, SCHEMA_INSTRUCTION};
