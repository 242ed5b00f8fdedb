//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::binding::{Binding, BindingMode, ProviderId};
use crate::domain::error::ConfigError;
use crate::domain::hotkey::KeyCombo;

/// Per-provider configuration section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub enabled: Option<bool>,
    /// API origin override, used to point provider calls at a test server
    pub base_url: Option<String>,
}

/// Provider sections keyed by profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvidersConfig {
    pub claude: Option<ProviderConfig>,
    pub openai: Option<ProviderConfig>,
}

/// One raw `[[bindings]]` row as written in the config file. Validation into
/// a domain [`Binding`] happens in [`BindingConfig::to_binding`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingConfig {
    pub id: String,
    pub name: Option<String>,
    pub keys: String,
    pub prompt: String,
    pub provider: String,
    pub model: String,
    pub screenshot: Option<bool>,
    pub mode: Option<String>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub providers: Option<ProvidersConfig>,
    pub bindings: Option<Vec<BindingConfig>>,
}

impl BindingConfig {
    /// Validate this row into a domain binding
    pub fn to_binding(&self) -> Result<Binding, ConfigError> {
        let combo: KeyCombo = self.keys.parse().map_err(|e| self.invalid("keys", e))?;
        let provider: ProviderId = self
            .provider
            .parse()
            .map_err(|e| self.invalid("provider", e))?;
        let mode = match self.mode.as_deref() {
            Some(raw) => raw
                .parse::<BindingMode>()
                .map_err(|e| self.invalid("mode", e))?,
            None => BindingMode::Rewrite,
        };

        if self.prompt.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                key: format!("bindings.{}.prompt", self.id),
                message: "prompt must not be empty".to_string(),
            });
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                key: format!("bindings.{}.model", self.id),
                message: "model must not be empty".to_string(),
            });
        }

        Ok(Binding {
            id: self.id.clone(),
            display_name: self.name.clone().unwrap_or_else(|| self.id.clone()),
            combo,
            prompt_template: self.prompt.clone(),
            provider,
            model: self.model.clone(),
            include_screenshot: self.screenshot.unwrap_or(false),
            mode,
        })
    }

    fn invalid(&self, field: &str, err: impl std::fmt::Display) -> ConfigError {
        ConfigError::ValidationError {
            key: format!("bindings.{}.{}", self.id, field),
            message: err.to_string(),
        }
    }
}

impl AppConfig {
    /// Create config with default values: both providers enabled (keys left
    /// unset) and two starter bindings to edit.
    pub fn defaults() -> Self {
        Self {
            providers: Some(ProvidersConfig {
                claude: Some(ProviderConfig {
                    api_key: None,
                    enabled: Some(true),
                    base_url: None,
                }),
                openai: Some(ProviderConfig {
                    api_key: None,
                    enabled: Some(true),
                    base_url: None,
                }),
            }),
            bindings: Some(vec![
                BindingConfig {
                    id: "improve-writing".to_string(),
                    name: Some("Improve writing".to_string()),
                    keys: "ctrl+shift+e".to_string(),
                    prompt: "Improve the clarity and flow of this text while keeping its meaning and tone.".to_string(),
                    provider: "claude".to_string(),
                    model: "claude-sonnet-4-5".to_string(),
                    screenshot: Some(false),
                    mode: None,
                },
                BindingConfig {
                    id: "describe-screen".to_string(),
                    name: Some("Describe my screen".to_string()),
                    keys: "ctrl+shift+d".to_string(),
                    prompt: "Describe what is currently visible on this screen, briefly.".to_string(),
                    provider: "claude".to_string(),
                    model: "claude-sonnet-4-5".to_string(),
                    screenshot: Some(true),
                    mode: Some("describe-screen".to_string()),
                },
            ]),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Provider sections merge field-wise; the bindings table is replaced
    /// wholesale when the other config declares one.
    pub fn merge(self, other: Self) -> Self {
        Self {
            providers: Self::merge_providers(self.providers, other.providers),
            bindings: other.bindings.or(self.bindings),
        }
    }

    fn merge_providers(
        base: Option<ProvidersConfig>,
        other: Option<ProvidersConfig>,
    ) -> Option<ProvidersConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(ProvidersConfig {
                claude: Self::merge_provider(b.claude, o.claude),
                openai: Self::merge_provider(b.openai, o.openai),
            }),
        }
    }

    fn merge_provider(
        base: Option<ProviderConfig>,
        other: Option<ProviderConfig>,
    ) -> Option<ProviderConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(ProviderConfig {
                api_key: o.api_key.or(b.api_key),
                enabled: o.enabled.or(b.enabled),
                base_url: o.base_url.or(b.base_url),
            }),
        }
    }

    fn provider_section(&self, id: ProviderId) -> Option<&ProviderConfig> {
        let providers = self.providers.as_ref()?;
        match id {
            ProviderId::Claude => providers.claude.as_ref(),
            ProviderId::OpenAi => providers.openai.as_ref(),
        }
    }

    /// Get a provider's API key; empty strings count as unset
    pub fn api_key(&self, id: ProviderId) -> Option<String> {
        self.provider_section(id)
            .and_then(|p| p.api_key.clone())
            .filter(|k| !k.is_empty())
    }

    /// Whether a provider is enabled; defaults to true when unset
    pub fn provider_enabled(&self, id: ProviderId) -> bool {
        self.provider_section(id)
            .and_then(|p| p.enabled)
            .unwrap_or(true)
    }

    /// Get a provider's API origin override, if any
    pub fn base_url(&self, id: ProviderId) -> Option<String> {
        self.provider_section(id).and_then(|p| p.base_url.clone())
    }

    /// Get the raw binding rows, or an empty list if not set
    pub fn bindings_or_default(&self) -> Vec<BindingConfig> {
        self.bindings.clone().unwrap_or_default()
    }

    /// Validate every binding row into domain bindings, in declaration order.
    /// The first invalid row fails the whole load so misconfigurations are
    /// loud rather than silently skipped.
    pub fn validated_bindings(&self) -> Result<Vec<Binding>, ConfigError> {
        self.bindings_or_default()
            .iter()
            .map(BindingConfig::to_binding)
            .collect()
    }
}
