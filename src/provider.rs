//! Trait definition for pluggable provider adapters.
//!
//! Each provider (DuckDuckGo, Wikipedia, Google CSE, NewsAPI, SearchApi.io)
//! implements [`ProviderAdapter`] to give the pipeline a uniform interface
//! for querying and mapping results into [`ResultRecord`] values.

use crate::config::AggregatorConfig;
use crate::error::AggregateError;
use crate::types::{ResultRecord, Source};

/// A pluggable search provider adapter.
///
/// Implementors call a specific provider's API and map its response shape
/// into normalized [`ResultRecord`] values. Each adapter handles its own:
///
/// - URL construction with query encoding
/// - HTTP request, including any credential headers
/// - Response deserialization via typed serde structs
/// - Native image attachment where the provider exposes one
///
/// Adapters may return errors; the pipeline treats any adapter failure as
/// an empty contribution, so one broken provider never aborts aggregation.
///
/// All implementations must be `Send + Sync` for concurrent fan-out.
pub trait ProviderAdapter: Send + Sync {
    /// Perform a provider search and return normalized records.
    ///
    /// # Arguments
    ///
    /// * `query`: the search query string (raw; the implementation
    ///   handles encoding).
    /// * `config`: aggregator configuration carrying timeouts and credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError`] if the HTTP request fails, the response
    /// cannot be deserialized, or a required credential is missing.
    fn search(
        &self,
        query: &str,
        config: &AggregatorConfig,
    ) -> impl std::future::Future<Output = Result<Vec<ResultRecord>, AggregateError>> + Send;

    /// Returns which [`Source`] this adapter contributes records for.
    fn source(&self) -> Source;
}
