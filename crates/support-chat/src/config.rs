//! Settings read from the environment.

use std::env;
use std::error::Error;
use std::fmt::{self, Debug, Display};
use std::time::Duration;

use support_chat_core::DEFAULT_TYPING_DELAY;

/// Environment variable holding the Gemini API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Environment variable overriding the Gemini model name.
pub const MODEL_VAR: &str = "GEMINI_MODEL";
/// Environment variable overriding the Gemini base URL.
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";
/// Environment variable overriding the typing delay, in milliseconds.
pub const TYPING_DELAY_VAR: &str = "SUPPORT_CHAT_TYPING_DELAY_MS";

/// Value shipped in sample configurations. It is treated as no key.
pub const API_KEY_PLACEHOLDER: &str = "YOUR_GEMINI_API_KEY";

/// Settings of a chat session.
#[derive(Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// The API key, `None` means offline mode.
    pub api_key: Option<String>,
    /// Model name, the provider default if `None`.
    pub model: Option<String>,
    /// Base URL, the provider default if `None`.
    pub base_url: Option<String>,
    /// Minimum time between a submission and its reply.
    pub typing_delay: Duration,
}

impl ChatConfig {
    /// Reads the settings from the process environment.
    #[inline]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the settings through a lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let api_key =
            non_empty(API_KEY_VAR).filter(|key| key != API_KEY_PLACEHOLDER);
        let typing_delay = match non_empty(TYPING_DELAY_VAR) {
            Some(value) => value
                .parse()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidTypingDelay(value))?,
            None => DEFAULT_TYPING_DELAY,
        };

        Ok(Self {
            api_key,
            model: non_empty(MODEL_VAR),
            base_url: non_empty(BASE_URL_VAR),
            typing_delay,
        })
    }

    /// Returns `true` if no remote model will be used.
    #[inline]
    pub fn is_offline(&self) -> bool {
        self.api_key.is_none()
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: None,
            base_url: None,
            typing_delay: DEFAULT_TYPING_DELAY,
        }
    }
}

impl Debug for ChatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("typing_delay", &self.typing_delay)
            .finish()
    }
}

/// A setting has an unusable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The typing delay is not a whole number of milliseconds.
    InvalidTypingDelay(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTypingDelay(value) => write!(
                f,
                "{TYPING_DELAY_VAR} must be a number of milliseconds, \
                 got {value:?}"
            ),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_empty_environment() {
        let config = ChatConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ChatConfig::default());
        assert!(config.is_offline());
        assert_eq!(config.typing_delay, Duration::from_millis(1500));
    }

    #[test]
    fn test_placeholder_key_is_absent() {
        for key in ["", "   ", API_KEY_PLACEHOLDER] {
            let config =
                ChatConfig::from_lookup(lookup(&[(API_KEY_VAR, key)])).unwrap();
            assert!(config.is_offline(), "{key:?}");
        }
    }

    #[test]
    fn test_full_environment() {
        let config = ChatConfig::from_lookup(lookup(&[
            (API_KEY_VAR, " secret "),
            (MODEL_VAR, "gemini-1.5-flash"),
            (BASE_URL_VAR, "http://localhost:8080"),
            (TYPING_DELAY_VAR, "0"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model.as_deref(), Some("gemini-1.5-flash"));
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(config.typing_delay, Duration::ZERO);
        assert!(!format!("{config:?}").contains("secret"));
    }

    #[test]
    fn test_invalid_typing_delay() {
        let err =
            ChatConfig::from_lookup(lookup(&[(TYPING_DELAY_VAR, "fast")]))
                .unwrap_err();
        assert_eq!(err, ConfigError::InvalidTypingDelay("fast".to_owned()));
        assert!(err.to_string().contains(TYPING_DELAY_VAR));
    }
}
