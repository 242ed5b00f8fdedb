//! Domain error types

use thiserror::Error;

/// Error when parsing a key combination string
#[derive(Debug, Clone, Error)]
#[error("Invalid key combination \"{input}\": {reason}")]
pub struct KeyComboError {
    pub input: String,
    pub reason: String,
}

/// Error when an invalid provider ID is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid provider: \"{input}\". Valid providers are: claude, openai")]
pub struct InvalidProviderError {
    pub input: String,
}

/// Error when an invalid binding mode is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid binding mode: \"{input}\". Valid modes are: rewrite, describe-screen")]
pub struct InvalidModeError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
