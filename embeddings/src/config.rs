//! Configuration for the embedding client.
//!
//! All values are resolved once, usually at process start via
//! [`EmbeddingConfig::from_env`], and then handed to the provider and store.

use std::fmt;
use std::time::Duration;

use crate::error::{EmbeddingError, Result};

/// Model used when `EMBEDDING_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "models/text-embedding-004";

/// Host of the Generative Language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Primary credential variable.
pub const API_KEY_VAR: &str = "API_KEY";

/// Fallback credential variable.
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

pub const MODEL_VAR: &str = "EMBEDDING_MODEL";
pub const BASE_URL_VAR: &str = "EMBEDDING_BASE_URL";
pub const TIMEOUT_VAR: &str = "EMBEDDING_TIMEOUT_SECS";

/// Configuration for the embedding provider.
#[derive(Clone)]
pub struct EmbeddingConfig {
    /// Provider credential. Checked when a request is made, not here.
    pub api_key: Option<String>,

    /// Model identifier, e.g. `models/text-embedding-004`.
    pub model: String,

    /// Scheme and host of the provider, without trailing slash.
    pub base_url: String,

    /// Request timeout. `None` waits for the full response.
    pub timeout: Option<Duration>,
}

impl EmbeddingConfig {
    /// Create a configuration with default values and no credential.
    pub fn new() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Resolve the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = Self::new();
        config.api_key = get(API_KEY_VAR).or_else(|| get(GEMINI_API_KEY_VAR));

        if let Some(model) = get(MODEL_VAR) {
            config.model = model;
        }

        if let Some(base_url) = get(BASE_URL_VAR) {
            config = config.with_base_url(base_url);
        }

        if let Some(raw) = get(TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    EmbeddingError::Config(format!(
                        "{TIMEOUT_VAR} must be a positive number of seconds, got {raw:?}"
                    ))
                })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EmbeddingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddingConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = EmbeddingConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_key, None);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_env_overrides() {
        let config = EmbeddingConfig::from_lookup(lookup(&[
            ("API_KEY", "secret"),
            ("EMBEDDING_MODEL", "models/gemini-embedding-001"),
            ("EMBEDDING_BASE_URL", "http://localhost:8080/"),
            ("EMBEDDING_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model, "models/gemini-embedding-001");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_gemini_key_fallback_and_empty_values() {
        let config = EmbeddingConfig::from_lookup(lookup(&[
            ("API_KEY", ""),
            ("GEMINI_API_KEY", "fallback"),
            ("EMBEDDING_MODEL", "  "),
        ]))
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("fallback"));
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_invalid_timeout_is_config_error() {
        let err = EmbeddingConfig::from_lookup(lookup(&[("EMBEDDING_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, EmbeddingError::Config(_)));

        let err = EmbeddingConfig::from_lookup(lookup(&[("EMBEDDING_TIMEOUT_SECS", "0")]))
            .unwrap_err();
        assert!(matches!(err, EmbeddingError::Config(_)));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = EmbeddingConfig::new().with_api_key("super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
