//! # sporez-search
//!
//! Multi-provider search aggregation with image enrichment.
//!
//! This crate queries several heterogeneous search providers (DuckDuckGo
//! Instant Answers, Wikipedia, Google CSE, NewsAPI, SearchApi.io)
//! concurrently, merges their results into a single deduplicated set,
//! groups them by source with one highlight per provider, and backfills
//! missing preview images by probing the linked pages.
//!
//! ## Design
//!
//! - One adapter per provider, each mapping its own response shape into a
//!   common record; a failing provider degrades to an empty contribution
//! - Deduplication by link, first-registered provider wins
//! - Recency sort before grouping; per-source cap of 5, one highlight per
//!   source, remainder capped at 20
//! - Hero-image extraction via CSS selectors with tracker and pixel
//!   rejection
//! - In-memory response cache with configurable TTL
//!
//! ## Security
//!
//! - Provider credentials are read from the environment and never appear
//!   in logs or error messages
//! - Search queries are logged only at trace level
//! - Wikipedia snippets are stripped of markup before returning

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod pipeline;
pub mod provider;
pub mod providers;
pub mod scrape;
pub mod server;
pub mod types;

pub use config::{AggregatorConfig, ProviderCredentials};
pub use error::{AggregateError, Result};
pub use provider::ProviderAdapter;
pub use types::{PageMeta, ResultRecord, SearchResponse, Source};

/// Aggregate search results from all configured providers.
///
/// Queries every provider in `config.providers` concurrently, merges and
/// deduplicates the results by link, splits them into per-source
/// highlights and a capped remainder, and backfills missing preview
/// images. Responses are cached in memory when `config.cache_ttl_seconds`
/// is non-zero.
///
/// # Errors
///
/// Returns [`AggregateError::Config`] for an invalid configuration and
/// [`AggregateError::Http`] if the HTTP client cannot be constructed.
/// Individual provider and probe failures are contained and degrade to
/// empty contributions.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> sporez_search::Result<()> {
/// let config = sporez_search::AggregatorConfig::from_env();
/// let response = sporez_search::aggregate("giraffe", &config).await?;
/// for record in &response.highlights {
///     println!("{}: {}", record.source, record.link);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn aggregate(query: &str, config: &AggregatorConfig) -> Result<SearchResponse> {
    config.validate()?;

    if config.cache_ttl_seconds == 0 {
        return pipeline::run(query, config).await;
    }

    let key = cache::CacheKey::new(query, &config.providers);
    let responses = cache::shared();
    if let Some(cached) = responses.fetch(&key, config.cache_ttl_seconds).await {
        tracing::debug!(query, "aggregation cache hit");
        return Ok(cached);
    }

    let response = pipeline::run(query, config).await?;
    responses.store(key, response.clone()).await;
    Ok(response)
}

/// Aggregate with default configuration and environment credentials.
///
/// Convenience wrapper around [`aggregate`] using
/// [`AggregatorConfig::from_env()`].
///
/// # Errors
///
/// Same as [`aggregate`].
pub async fn aggregate_default(query: &str) -> Result<SearchResponse> {
    aggregate(query, &AggregatorConfig::from_env()).await
}
