//! LLM provider adapters
//!
//! One adapter per provider profile, all speaking through the Provider port.

mod claude;
mod openai;

pub use claude::ClaudeProvider;
pub use openai::OpenAiProvider;

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::ProviderError;
use crate::application::ProviderSet;
use crate::domain::config::AppConfig;
use crate::domain::ProviderId;

/// Per-call transport timeout, independent of the pipeline ceiling
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Output token budget for every call
pub(crate) const MAX_OUTPUT_TOKENS: u32 = 1000;

/// Map a non-success HTTP status onto the provider error taxonomy.
///
/// 429 and 5xx are transient and surfaced without retry; everything else
/// keeps the response body for diagnostics.
pub(crate) fn classify_http_failure(
    provider: ProviderId,
    status: reqwest::StatusCode,
    body: String,
) -> ProviderError {
    match status {
        reqwest::StatusCode::UNAUTHORIZED => ProviderError::InvalidCredential(provider),
        reqwest::StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited(provider),
        s if s.is_server_error() => ProviderError::Unavailable {
            provider,
            status: s.as_u16(),
        },
        s => ProviderError::ApiError {
            provider,
            status: s.as_u16(),
            body,
        },
    }
}

/// Build the provider set from merged configuration.
///
/// Every known provider is registered whether or not it has a key; the
/// credential gate fires at dispatch time with an actionable message.
pub fn build_provider_set(config: &AppConfig) -> ProviderSet {
    let mut set = ProviderSet::new();

    let mut claude = ClaudeProvider::new(config.api_key(ProviderId::Claude));
    if let Some(url) = config.base_url(ProviderId::Claude) {
        claude = claude.with_base_url(url);
    }
    set.register(
        Arc::new(claude),
        config.provider_enabled(ProviderId::Claude),
    );

    let mut openai = OpenAiProvider::new(config.api_key(ProviderId::OpenAi));
    if let Some(url) = config.base_url(ProviderId::OpenAi) {
        openai = openai.with_base_url(url);
    }
    set.register(
        Arc::new(openai),
        config.provider_enabled(ProviderId::OpenAi),
    );

    set
}
