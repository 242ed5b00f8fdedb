//! Processing request assembled when a binding fires

use crate::domain::binding::{Binding, ProviderId};
use crate::domain::screen::ScreenImage;

/// Source text for one request: a read selection, or the screenshot-only
/// sentinel for bindings that consume no selection.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceText {
    Selection(String),
    ScreenshotOnly,
}

impl SourceText {
    pub fn as_selection(&self) -> Option<&str> {
        match self {
            SourceText::Selection(text) => Some(text),
            SourceText::ScreenshotOnly => None,
        }
    }

    pub fn is_screenshot_only(&self) -> bool {
        matches!(self, SourceText::ScreenshotOnly)
    }
}

/// Everything a provider needs to serve one call
#[derive(Debug, Clone)]
pub struct ProcessingRequest {
    pub source: SourceText,
    pub prompt_template: String,
    pub provider: ProviderId,
    pub model: String,
    pub screenshot: Option<ScreenImage>,
}

impl ProcessingRequest {
    /// Build a request around a read selection
    pub fn for_selection(
        binding: &Binding,
        text: impl Into<String>,
        screenshot: Option<ScreenImage>,
    ) -> Self {
        Self {
            source: SourceText::Selection(text.into()),
            prompt_template: binding.prompt_template.clone(),
            provider: binding.provider,
            model: binding.model.clone(),
            screenshot,
        }
    }

    /// Build a screenshot-only request. Capture is mandatory for these, so
    /// the image is required here.
    pub fn screenshot_only(binding: &Binding, screenshot: ScreenImage) -> Self {
        Self {
            source: SourceText::ScreenshotOnly,
            prompt_template: binding.prompt_template.clone(),
            provider: binding.provider,
            model: binding.model.clone(),
            screenshot: Some(screenshot),
        }
    }
}
