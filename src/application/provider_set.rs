//! Provider lookup with per-binding gating

use std::sync::Arc;

use thiserror::Error;

use crate::domain::ProviderId;

use super::ports::Provider;

/// Errors resolving the provider behind a binding.
///
/// All of these surface to the user before any network call is made.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    #[error("No provider registered for {0}")]
    Unknown(ProviderId),

    #[error("{} is disabled. Enable it with: quillshift config set providers.{}.enabled true", .0.label(), .0.as_str())]
    Disabled(ProviderId),

    #[error("No API key set for {0}. Export {env} or run: quillshift config set providers.{0}.api_key <key>", env = .0.env_var())]
    MissingCredential(ProviderId),
}

struct Entry {
    provider: Arc<dyn Provider>,
    enabled: bool,
}

/// The providers this process can dispatch to, with their enabled flags.
///
/// Built once at startup from configuration; credential or enablement
/// changes take effect on the next start.
#[derive(Default)]
pub struct ProviderSet {
    entries: Vec<Entry>,
}

impl ProviderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider. Registration order is the listing order.
    pub fn register(&mut self, provider: Arc<dyn Provider>, enabled: bool) {
        self.entries.push(Entry { provider, enabled });
    }

    /// Resolve a provider for dispatch, gating on enablement and credential.
    pub fn resolve(&self, id: ProviderId) -> Result<Arc<dyn Provider>, ResolveError> {
        let entry = self
            .entries
            .iter()
            .find(|entry| entry.provider.id() == id)
            .ok_or(ResolveError::Unknown(id))?;

        if !entry.enabled {
            return Err(ResolveError::Disabled(id));
        }
        if !entry.provider.is_configured() {
            return Err(ResolveError::MissingCredential(id));
        }
        Ok(Arc::clone(&entry.provider))
    }

    /// Registered provider IDs in registration order
    pub fn ids(&self) -> Vec<ProviderId> {
        self.entries.iter().map(|entry| entry.provider.id()).collect()
    }
}
