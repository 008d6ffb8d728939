//! LLM provider credentials.
//!
//! The pipeline logs aggressively; keys live behind `secrecy` so a stray
//! `{:?}` on a config or extractor never prints one.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

use crate::error::ConfigError;

/// An API key wrapper whose `Debug`/`Display` output is always redacted.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// The raw key, for building the Authorization header and nothing else.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// API credentials for an LLM provider.
#[derive(Clone)]
pub struct ApiCredentials {
    /// API key (secret)
    pub api_key: SecretString,

    /// Model identifier
    pub model: String,
}

impl ApiCredentials {
    /// Create new credentials.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key),
            model: model.into(),
        }
    }

    /// Read the key from an environment variable.
    ///
    /// A missing variable is a fatal configuration error, raised before
    /// any network activity.
    pub fn from_env(var: &'static str, model: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = std::env::var(var).map_err(|_| ConfigError::MissingApiKey { var })?;
        Ok(Self::new(api_key, model))
    }
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "gsk-0123456789abcdef";

    #[test]
    fn test_key_redacted_in_debug_and_display() {
        let secret = SecretString::new(KEY);
        for rendered in [format!("{:?}", secret), format!("{}", secret)] {
            assert!(!rendered.contains("0123456789"), "leaked: {rendered}");
            assert!(rendered.contains("[REDACTED]"));
        }
    }

    #[test]
    fn test_expose_returns_the_key_verbatim() {
        assert_eq!(SecretString::new(KEY).expose(), KEY);
        assert_eq!(SecretString::from(KEY).clone().expose(), KEY);
    }

    #[test]
    fn test_credentials_debug_redacted() {
        let creds = ApiCredentials::new("gsk-secret", "llama-3.3-70b");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("gsk-secret"));
        assert!(debug.contains("llama-3.3-70b"));
    }

    #[test]
    fn test_from_env_missing_is_config_error() {
        let result = ApiCredentials::from_env("HARVEST_NO_SUCH_KEY_VAR", "model");
        assert!(matches!(
            result,
            Err(ConfigError::MissingApiKey {
                var: "HARVEST_NO_SUCH_KEY_VAR"
            })
        ));
    }
}
