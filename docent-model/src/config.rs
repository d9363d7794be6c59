//! Generation client configuration.

use std::fmt;
use std::time::Duration;

use crate::error::{ModelError, Result};

/// Environment variable holding the required API credential.
pub const API_KEY_ENV: &str = "DOCENT_API_KEY";
/// Environment variable overriding the service base URL.
pub const BASE_URL_ENV: &str = "DOCENT_BASE_URL";
/// Environment variable overriding the model name.
pub const MODEL_ENV: &str = "DOCENT_MODEL";

/// Default chat-completions endpoint base.
pub const DEFAULT_BASE_URL: &str = "https://api.perplexity.ai";
/// Default model name.
pub const DEFAULT_MODEL: &str = "sonar-pro";
/// Default per-request deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`ChatClient`](crate::ChatClient).
///
/// The credential is required at construction; everything else has a
/// default and a builder-style override.
#[derive(Clone)]
pub struct ModelConfig {
    /// Bearer credential sent in the `Authorization` header.
    pub api_key: String,
    /// Base URL of the service; `/chat/completions` is appended per call.
    pub base_url: String,
    /// Model name sent in each request.
    pub model: String,
    /// Per-request deadline; expiry surfaces as a transport error.
    pub timeout: Duration,
}

impl ModelConfig {
    /// Create a configuration with the given credential and defaults for
    /// everything else.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Auth`] if the credential is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ModelError::Auth("API key must not be empty".into()));
        }
        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Create a configuration from the environment: `DOCENT_API_KEY`
    /// (required), `DOCENT_BASE_URL` and `DOCENT_MODEL` (optional).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Auth`] if `DOCENT_API_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| ModelError::Auth(format!("{API_KEY_ENV} environment variable not set")))?;
        let mut config = Self::new(api_key)?;
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }
        if let Ok(model) = std::env::var(MODEL_ENV) {
            config = config.with_model(model);
        }
        Ok(config)
    }

    /// Override the service base URL. A trailing slash is stripped so the
    /// endpoint path can always be appended verbatim.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Override the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the per-request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// Manual Debug so the credential never reaches logs.
impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_rejected() {
        assert!(matches!(ModelConfig::new(""), Err(ModelError::Auth(_))));
    }

    #[test]
    fn defaults_are_applied() {
        let config = ModelConfig::new("k").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ModelConfig::new("k").unwrap().with_base_url("http://localhost:8080/");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn debug_redacts_the_credential() {
        let config = ModelConfig::new("secret-key").unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
