//! Provider port interface

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::domain::binding::ProviderId;
use crate::domain::request::ProcessingRequest;

/// Models older than this are dropped from listings
pub const MODEL_FRESHNESS_DAYS: i64 = 365;

/// Provider call errors
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("No API key set for {0}. Export {env} or run: quillshift config set providers.{0}.api_key <key>", env = .0.env_var())]
    MissingCredential(ProviderId),

    #[error("{} rejected the API key. Update it with: quillshift config set providers.{}.api_key <key>", .0.label(), .0.as_str())]
    InvalidCredential(ProviderId),

    #[error("{} is rate limiting requests. Try again shortly.", .0.label())]
    RateLimited(ProviderId),

    #[error("{} returned HTTP {status}. The service looks degraded; try again shortly.", .provider.label())]
    Unavailable { provider: ProviderId, status: u16 },

    #[error("{} request failed (HTTP {status}): {body}", .provider.label())]
    ApiError {
        provider: ProviderId,
        status: u16,
        body: String,
    },

    #[error("The model returned no content")]
    NoContent,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),
}

impl ProviderError {
    /// Whether trying again later could plausibly succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ProviderError::RateLimited(_) | ProviderError::Unavailable { .. }
        )
    }

    /// Whether the fix is a credential change
    pub fn is_credential(&self) -> bool {
        matches!(
            self,
            ProviderError::MissingCredential(_) | ProviderError::InvalidCredential(_)
        )
    }
}

/// One model as reported by a provider's listing endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDescriptor {
    pub id: String,
    pub display_name: String,
    /// Release timestamp; None when the provider omitted it or it could not
    /// be parsed
    pub created: Option<DateTime<Utc>>,
}

impl ModelDescriptor {
    /// Listing filter. Models with no parseable timestamp are kept; a false
    /// positive beats hiding a valid model.
    pub fn is_recent(&self, now: DateTime<Utc>) -> bool {
        match self.created {
            Some(created) => {
                now.signed_duration_since(created) <= Duration::days(MODEL_FRESHNESS_DAYS)
            }
            None => true,
        }
    }
}

/// Port for one LLM provider profile
#[async_trait]
pub trait Provider: Send + Sync {
    /// Which profile this implementation serves
    fn id(&self) -> ProviderId;

    /// Whether a credential is configured. No network involved.
    fn is_configured(&self) -> bool;

    /// Serve one call, returning the raw model text.
    ///
    /// # Arguments
    /// * `request` - The assembled request (source text or screenshot-only,
    ///   prompt template, model, optional screenshot)
    ///
    /// # Returns
    /// The provider's raw text output, unextracted
    async fn enhance(&self, request: &ProcessingRequest) -> Result<String, ProviderError>;

    /// List this provider's models released within the freshness window
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, ProviderError>;
}

/// Identifies the provider without exposing implementation state such as
/// credentials; also lets `Result<Arc<dyn Provider>, _>` satisfy the `Debug`
/// bound on `Result::unwrap`/`unwrap_err`.
impl std::fmt::Debug for dyn Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Provider").field(&self.id()).finish()
    }
}
