//! Shortcut bindings: what to press and what to do with the selection

use std::fmt;
use std::str::FromStr;

use crate::domain::error::{InvalidModeError, InvalidProviderError};
use crate::domain::hotkey::KeyCombo;

/// Built-in LLM provider profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Claude,
    OpenAi,
}

impl ProviderId {
    /// All providers, in display order
    pub const ALL: [ProviderId; 2] = [ProviderId::Claude, ProviderId::OpenAi];

    /// Canonical lowercase ID used in config files
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Claude => "claude",
            ProviderId::OpenAi => "openai",
        }
    }

    /// Human-readable provider name
    pub const fn label(&self) -> &'static str {
        match self {
            ProviderId::Claude => "Claude",
            ProviderId::OpenAi => "OpenAI",
        }
    }

    /// Environment variable consulted for this provider's API key
    pub const fn env_var(&self) -> &'static str {
        match self {
            ProviderId::Claude => "ANTHROPIC_API_KEY",
            ProviderId::OpenAi => "OPENAI_API_KEY",
        }
    }
}

impl FromStr for ProviderId {
    type Err = InvalidProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "claude" | "anthropic" => Ok(ProviderId::Claude),
            "openai" => Ok(ProviderId::OpenAi),
            _ => Err(InvalidProviderError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a binding does with the model's answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingMode {
    /// Rewrite the current selection and paste the result over it
    Rewrite,
    /// No selection at all; describe the screen and insert at the cursor
    DescribeScreen,
}

impl BindingMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            BindingMode::Rewrite => "rewrite",
            BindingMode::DescribeScreen => "describe-screen",
        }
    }
}

impl FromStr for BindingMode {
    type Err = InvalidModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rewrite" => Ok(BindingMode::Rewrite),
            "describe-screen" => Ok(BindingMode::DescribeScreen),
            _ => Err(InvalidModeError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for BindingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One configured shortcut: hotkey, prompt template, provider, and model.
///
/// Uniqueness of the key combination is enforced at registration time, not
/// here.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub id: String,
    pub display_name: String,
    pub combo: KeyCombo,
    pub prompt_template: String,
    pub provider: ProviderId,
    pub model: String,
    pub include_screenshot: bool,
    pub mode: BindingMode,
}

impl Binding {
    /// Whether this binding consumes no selection at all
    pub fn is_screen_only(&self) -> bool {
        self.mode == BindingMode::DescribeScreen
    }

    /// Whether processing should attach a screenshot
    pub fn wants_screenshot(&self) -> bool {
        self.include_screenshot || self.is_screen_only()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(mode: BindingMode, include_screenshot: bool) -> Binding {
        Binding {
            id: "test".to_string(),
            display_name: "Test".to_string(),
            combo: "ctrl+shift+e".parse().unwrap(),
            prompt_template: "Improve this text".to_string(),
            provider: ProviderId::Claude,
            model: "claude-sonnet-4-5".to_string(),
            include_screenshot,
            mode,
        }
    }

    #[test]
    fn provider_parses_case_insensitively() {
        assert_eq!("Claude".parse::<ProviderId>().unwrap(), ProviderId::Claude);
        assert_eq!("OPENAI".parse::<ProviderId>().unwrap(), ProviderId::OpenAi);
    }

    #[test]
    fn provider_accepts_anthropic_alias() {
        assert_eq!(
            "anthropic".parse::<ProviderId>().unwrap(),
            ProviderId::Claude
        );
    }

    #[test]
    fn provider_rejects_unknown() {
        let err = "gemini".parse::<ProviderId>().unwrap_err();
        assert!(err.to_string().contains("claude, openai"));
    }

    #[test]
    fn mode_parses() {
        assert_eq!(
            "rewrite".parse::<BindingMode>().unwrap(),
            BindingMode::Rewrite
        );
        assert_eq!(
            "describe-screen".parse::<BindingMode>().unwrap(),
            BindingMode::DescribeScreen
        );
        assert!("draw".parse::<BindingMode>().is_err());
    }

    #[test]
    fn rewrite_without_flag_wants_no_screenshot() {
        assert!(!binding(BindingMode::Rewrite, false).wants_screenshot());
    }

    #[test]
    fn rewrite_with_flag_wants_screenshot() {
        let b = binding(BindingMode::Rewrite, true);
        assert!(b.wants_screenshot());
        assert!(!b.is_screen_only());
    }

    #[test]
    fn describe_screen_always_wants_screenshot() {
        let b = binding(BindingMode::DescribeScreen, false);
        assert!(b.wants_screenshot());
        assert!(b.is_screen_only());
    }
}
