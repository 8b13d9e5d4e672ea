// Application configuration
//
// Read from the process environment (after `.env` is loaded by main).
// Only the API key is required; everything else has a logged default.

use std::net::SocketAddr;
use std::time::Duration;

use crate::agents::errors::{AgentError, AgentResult};
use crate::agents::gemini::{GeminiClient, DEFAULT_BASE_URL, DEFAULT_GEMINI_MODEL};
use crate::agents::retry::{retry_with_backoff, RetryPolicy};

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// Runtime settings for the chat service
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub google_api_key: String,
    pub model: String,
    pub base_url: String,
    pub bind_addr: SocketAddr,
    pub model_timeout: Duration,
    pub init_retry: RetryPolicy,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// * `CredentialMissing` - `GOOGLE_API_KEY` unset or blank
    /// * `Config` - a variable is set but cannot be parsed
    pub fn from_env() -> AgentResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> AgentResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let google_api_key = lookup(API_KEY_VAR)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                AgentError::CredentialMissing(format!(
                    "{} is missing. Add it to your .env file or set it as an environment variable.",
                    API_KEY_VAR
                ))
            })?;

        let model = lookup("GEMINI_MODEL").unwrap_or_else(|| {
            tracing::debug!("GEMINI_MODEL not set, using {}", DEFAULT_GEMINI_MODEL);
            DEFAULT_GEMINI_MODEL.to_string()
        });

        let base_url = lookup("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let bind_addr = match lookup("BIND_ADDR") {
            Some(raw) => raw
                .parse::<SocketAddr>()
                .map_err(|e| AgentError::Config(format!("BIND_ADDR '{}': {}", raw, e)))?,
            None => {
                tracing::warn!("BIND_ADDR not set, using default");
                SocketAddr::from(([0, 0, 0, 0], 3000))
            }
        };

        let model_timeout = Duration::from_secs(parse_or(&lookup, "MODEL_TIMEOUT_SECS", 120)?);

        let defaults = RetryPolicy::default();
        let init_retry = RetryPolicy {
            max_retries: parse_or(&lookup, "INIT_MAX_RETRIES", defaults.max_retries)?,
            initial_wait: Duration::from_millis(parse_or(
                &lookup,
                "INIT_RETRY_WAIT_MS",
                defaults.initial_wait.as_millis() as u64,
            )?),
            exponential_base: defaults.exponential_base,
        };

        Ok(Self {
            google_api_key,
            model,
            base_url,
            bind_addr,
            model_timeout,
            init_retry,
        })
    }

    /// Build the Gemini client, retrying with backoff
    ///
    /// Construction does no network I/O, so the retry only guards client
    /// setup (TLS backend, HTTP settings). A blank key is reported as
    /// `CredentialMissing` straight away rather than retried.
    pub async fn initialize_model_client(&self) -> AgentResult<GeminiClient> {
        if self.google_api_key.trim().is_empty() {
            return Err(AgentError::CredentialMissing(format!("{} is empty", API_KEY_VAR)));
        }

        retry_with_backoff(&self.init_retry, "initialize model client", || async {
            GeminiClient::new(
                &self.google_api_key,
                &self.model,
                &self.base_url,
                self.model_timeout,
            )
        })
        .await
        .map_err(|e| match e {
            AgentError::CredentialMissing(_) => e,
            other => AgentError::ChainConstruction(format!(
                "Error initializing Gemini model after multiple attempts: {}",
                other
            )),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> AgentResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AgentError::Config(format!("{} '{}': {}", key, raw, e))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn missing_api_key_is_credential_error() {
        let result = AppConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(AgentError::CredentialMissing(_))));
    }

    #[test]
    fn blank_api_key_is_credential_error() {
        let result = AppConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "   ")]));
        assert!(matches!(result, Err(AgentError::CredentialMissing(_))));
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "abc")])).unwrap();

        assert_eq!(config.google_api_key, "abc");
        assert_eq!(config.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.bind_addr, SocketAddr::from(([0, 0, 0, 0], 3000)));
        assert_eq!(config.model_timeout, Duration::from_secs(120));
        assert_eq!(config.init_retry, RetryPolicy::default());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, "abc"),
            ("GEMINI_MODEL", "gemini-pro"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("MODEL_TIMEOUT_SECS", "30"),
            ("INIT_MAX_RETRIES", "5"),
            ("INIT_RETRY_WAIT_MS", "250"),
        ]))
        .unwrap();

        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.model_timeout, Duration::from_secs(30));
        assert_eq!(config.init_retry.max_retries, 5);
        assert_eq!(config.init_retry.initial_wait, Duration::from_millis(250));
    }

    #[tokio::test]
    async fn initialize_model_client_with_valid_config() {
        let config = AppConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "abc")])).unwrap();

        let client = config.initialize_model_client().await;

        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn initialize_model_client_keeps_credential_error() {
        let mut config = AppConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "abc")])).unwrap();
        config.google_api_key = "  ".to_string();

        let result = config.initialize_model_client().await;

        assert!(matches!(result, Err(AgentError::CredentialMissing(_))));
    }

    #[test]
    fn malformed_value_is_config_error() {
        let result = AppConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, "abc"),
            ("MODEL_TIMEOUT_SECS", "soon"),
        ]));

        match result {
            Err(AgentError::Config(message)) => assert!(message.contains("MODEL_TIMEOUT_SECS")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }
}
