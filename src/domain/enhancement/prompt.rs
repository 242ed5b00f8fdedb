//! Outbound user-message composition

use crate::domain::request::{ProcessingRequest, SourceText};

/// Instruction appended to every rewrite request so the response can be
/// machine-decoded. Screenshot-only requests never carry it; their responses
/// are consumed verbatim.
pub const SCHEMA_INSTRUCTION: &str = "Respond with ONLY a JSON object, no prose before or after, matching exactly this schema:\n{\"enhancedText\": \"<the rewritten text>\", \"model\": \"<optional: model name>\", \"notes\": \"<optional: short remarks>\"}";

/// Builds the user message content for a provider call
pub struct EnhancementPrompt;

impl EnhancementPrompt {
    /// Compose the outbound user message for a request
    pub fn compose(request: &ProcessingRequest) -> String {
        match &request.source {
            SourceText::Selection(text) => format!(
                "{}\n\nText to rewrite:\n\"\"\"\n{}\n\"\"\"\n\n{}",
                request.prompt_template, text, SCHEMA_INSTRUCTION
            ),
            SourceText::ScreenshotOnly => request.prompt_template.clone(),
        }
    }
}
