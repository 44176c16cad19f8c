//! Aggregator configuration with sensible defaults.
//!
//! [`AggregatorConfig`] controls which providers are queried, timeouts,
//! caching, and credentials. Credentials are read from the environment
//! and never appear in logs or error messages.

use crate::error::AggregateError;
use crate::types::Source;

/// Per-provider API credentials, loaded from the environment.
///
/// Providers whose credential is absent degrade to an empty contribution
/// at query time; a missing key never aborts aggregation.
#[derive(Debug, Clone, Default)]
pub struct ProviderCredentials {
    /// Google Custom Search API key (`GOOGLE_API_KEY`).
    pub google_api_key: Option<String>,
    /// Google Custom Search engine id (`GOOGLE_CSE_ID`).
    pub google_cse_id: Option<String>,
    /// NewsAPI key (`NEWS_API_KEY`).
    pub news_api_key: Option<String>,
    /// SearchApi.io bearer token (`SEARCHAPI_KEY`).
    pub searchapi_key: Option<String>,
}

impl ProviderCredentials {
    /// Load credentials from environment variables.
    ///
    /// Empty values are treated as absent.
    pub fn from_env() -> Self {
        Self {
            google_api_key: env_var("GOOGLE_API_KEY"),
            google_cse_id: env_var("GOOGLE_CSE_ID"),
            news_api_key: env_var("NEWS_API_KEY"),
            searchapi_key: env_var("SEARCHAPI_KEY"),
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Configuration for a search aggregation run.
///
/// Use [`Default::default()`] for sensible defaults (no credentials), or
/// [`AggregatorConfig::from_env()`] to also pick up provider credentials.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Which providers to query, in registration order. Providers are
    /// queried concurrently but joined in this order, which makes the
    /// merge deterministic.
    pub providers: Vec<Source>,
    /// Per-request HTTP timeout in seconds, applied to provider calls
    /// and image probes alike. A hung provider degrades to an empty
    /// contribution instead of stalling the whole response.
    pub timeout_seconds: u64,
    /// How long to cache aggregated responses in seconds. 0 disables caching.
    pub cache_ttl_seconds: u64,
    /// Custom User-Agent string. If `None`, rotates through a built-in
    /// list of realistic browser User-Agents.
    pub user_agent: Option<String>,
    /// API credentials for providers that require them.
    pub credentials: ProviderCredentials,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            providers: Source::all().to_vec(),
            timeout_seconds: 8,
            cache_ttl_seconds: 600,
            user_agent: None,
            credentials: ProviderCredentials::default(),
        }
    }
}

impl AggregatorConfig {
    /// Default configuration with credentials loaded from the environment.
    pub fn from_env() -> Self {
        Self {
            credentials: ProviderCredentials::from_env(),
            ..Default::default()
        }
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - `providers` must not be empty
    pub fn validate(&self) -> Result<(), AggregateError> {
        if self.timeout_seconds == 0 {
            return Err(AggregateError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.providers.is_empty() {
            return Err(AggregateError::Config(
                "at least one provider must be enabled".into(),
            ));
        }
        Ok(())
    }
}
