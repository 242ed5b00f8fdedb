//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

/// QuillShift - rewrite selected text anywhere with a hotkey
#[derive(Parser, Debug)]
#[command(name = "quillshift")]
#[command(version = "0.3.0")]
#[command(about = "Rewrite selected text anywhere with a global hotkey and an LLM")]
#[command(long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Subcommand (running the agent is the default)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the hotkey agent in the foreground
    Run,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List recent models offered by the configured providers
    Models {
        /// Only query this provider (claude or openai)
        #[arg(long, value_name = "PROVIDER")]
        provider: Option<String>,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys for `config set` and `config get`
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "providers.claude.api_key",
    "providers.claude.enabled",
    "providers.claude.base_url",
    "providers.openai.api_key",
    "providers.openai.enabled",
    "providers.openai.base_url",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["quillshift"]);
        assert!(!cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_verbose() {
        let cli = Cli::parse_from(["quillshift", "-v"]);
        assert!(cli.verbose);
    }

    #[test]
    fn cli_parses_run() {
        let cli = Cli::parse_from(["quillshift", "run"]);
        assert!(matches!(cli.command, Some(Commands::Run)));
    }

    #[test]
    fn cli_parses_config_init() {
        let cli = Cli::parse_from(["quillshift", "config", "init"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from([
            "quillshift",
            "config",
            "set",
            "providers.claude.api_key",
            "sk-test",
        ]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "providers.claude.api_key");
            assert_eq!(value, "sk-test");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn cli_parses_models() {
        let cli = Cli::parse_from(["quillshift", "models"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Models { provider: None })
        ));
    }

    #[test]
    fn cli_parses_models_with_provider() {
        let cli = Cli::parse_from(["quillshift", "models", "--provider", "openai"]);
        if let Some(Commands::Models { provider }) = cli.command {
            assert_eq!(provider, Some("openai".to_string()));
        } else {
            panic!("Expected Models command");
        }
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("providers.claude.api_key"));
        assert!(is_valid_config_key("providers.openai.enabled"));
        assert!(is_valid_config_key("providers.openai.base_url"));
        assert!(!is_valid_config_key("api_key"));
        assert!(!is_valid_config_key("providers.gemini.api_key"));
    }

    #[test]
    fn verify_cli() {
        // Verify the CLI definition is valid
        Cli::command().debug_assert();
    }
}
