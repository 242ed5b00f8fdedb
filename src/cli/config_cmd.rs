//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::binding::ProviderId;
use crate::domain::config::{AppConfig, ProviderConfig, ProvidersConfig};
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    // Validate key
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    // Validate value based on key type
    validate_config_value(key, value)?;

    // Load existing config
    let mut config = store.load().await?;

    let (id, field) = match split_provider_key(key) {
        Some(pair) => pair,
        None => unreachable!(), // Already validated
    };

    let section = provider_section_mut(&mut config, id);
    match field {
        "api_key" => section.api_key = Some(value.to_string()),
        "enabled" => {
            section.enabled = Some(parse_bool(value).map_err(|_| ConfigError::ValidationError {
                key: key.to_string(),
                message: "Value must be 'true' or 'false'".to_string(),
            })?)
        }
        "base_url" => section.base_url = Some(value.to_string()),
        _ => unreachable!(), // Already validated
    }

    // Save config
    store.save(&config).await?;

    // Never echo credentials back in full
    let shown = if field == "api_key" {
        mask_api_key(value)
    } else {
        value.to_string()
    };
    presenter.success(&format!("{} = {}", key, shown));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    // Validate key
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    let config = store.load().await?;

    let (id, field) = match split_provider_key(key) {
        Some(pair) => pair,
        None => unreachable!(),
    };

    let section = provider_section(&config, id);
    let value = match field {
        "api_key" => section
            .and_then(|s| s.api_key.as_deref())
            .map(mask_api_key),
        "enabled" => section.and_then(|s| s.enabled).map(|b| b.to_string()),
        "base_url" => section.and_then(|s| s.base_url.clone()),
        _ => unreachable!(),
    };

    match value {
        Some(v) => presenter.output(&v),
        None => presenter.output("(not set)"),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for id in ProviderId::ALL {
        let section = provider_section(&config, id);
        presenter.key_value(
            &format!("providers.{}.api_key", id.as_str()),
            &section
                .and_then(|s| s.api_key.as_deref())
                .map(mask_api_key)
                .unwrap_or_else(|| "(not set)".to_string()),
        );
        presenter.key_value(
            &format!("providers.{}.enabled", id.as_str()),
            &section
                .and_then(|s| s.enabled)
                .map(|b| b.to_string())
                .unwrap_or_else(|| "(not set)".to_string()),
        );
        presenter.key_value(
            &format!("providers.{}.base_url", id.as_str()),
            section
                .and_then(|s| s.base_url.as_deref())
                .unwrap_or("(not set)"),
        );
    }

    // Binding rows are edited in the file directly; list them read-only
    for binding in config.bindings.as_deref().unwrap_or(&[]) {
        presenter.key_value(
            &format!("bindings.{}", binding.id),
            &format!(
                "{} -> {} {}",
                binding.keys, binding.provider, binding.model
            ),
        );
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

/// Split "providers.<id>.<field>" into its parts
fn split_provider_key(key: &str) -> Option<(ProviderId, &str)> {
    let rest = key.strip_prefix("providers.")?;
    let (provider, field) = rest.split_once('.')?;
    let id = provider.parse::<ProviderId>().ok()?;
    Some((id, field))
}

fn provider_section(config: &AppConfig, id: ProviderId) -> Option<&ProviderConfig> {
    let providers = config.providers.as_ref()?;
    match id {
        ProviderId::Claude => providers.claude.as_ref(),
        ProviderId::OpenAi => providers.openai.as_ref(),
    }
}

fn provider_section_mut(config: &mut AppConfig, id: ProviderId) -> &mut ProviderConfig {
    let providers = config
        .providers
        .get_or_insert_with(ProvidersConfig::default);
    let slot = match id {
        ProviderId::Claude => &mut providers.claude,
        ProviderId::OpenAi => &mut providers.openai,
    };
    slot.get_or_insert_with(ProviderConfig::default)
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    if key.ends_with(".enabled") {
        parse_bool(value).map_err(|_| ConfigError::ValidationError {
            key: key.to_string(),
            message: "Value must be 'true' or 'false'".to_string(),
        })?;
    }
    // api_key and base_url accept any string
    Ok(())
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

/// Mask API key for display (show first 4 and last 4 chars)
fn mask_api_key(key: &str) -> String {
    if key.len() <= 8 {
        "*".repeat(key.len())
    } else {
        format!("{}...{}", &key[..4], &key[key.len() - 4..])
    }
}
