//! Aggregation pipeline: concurrent provider fan-out, merge, dedup,
//! grouping, and image backfill.
//!
//! Queries all configured providers concurrently, flattens and
//! deduplicates their records by link, sorts by recency, splits the
//! result into per-source highlights and a capped remainder, and
//! backfills missing preview images by probing the linked pages.

pub mod backfill;
pub mod group;
pub mod merge;

use crate::config::AggregatorConfig;
use crate::error::AggregateError;
use crate::provider::ProviderAdapter;
use crate::providers::{
    DuckDuckGoAdapter, GoogleAdapter, NewsAdapter, SearchApiAdapter, WikipediaAdapter,
};
use crate::types::{ResultRecord, SearchResponse, Source};

/// Run the full aggregation pipeline for one query.
///
/// # Pipeline
///
/// 1. Fan out to all configured providers with [`futures::future::join_all`];
///    failures are logged and degrade to empty contributions
/// 2. Flatten in registration order and deduplicate by link
/// 3. Sort by timestamp descending, bucket per source, split highlights
/// 4. Probe links still missing an image and merge the results back
///
/// All per-request state is owned by this invocation; nothing is shared
/// across concurrent aggregation runs.
///
/// # Errors
///
/// Only infrastructure failures (HTTP client construction) surface here;
/// provider and probe failures are contained per branch.
pub async fn run(query: &str, config: &AggregatorConfig) -> Result<SearchResponse, AggregateError> {
    // 1. Fan out to all providers concurrently; join in registration order.
    let futures: Vec<_> = config
        .providers
        .iter()
        .map(|source| {
            let q = query.to_string();
            let cfg = config.clone();
            let src = *source;
            async move {
                let outcome = query_provider(src, &q, &cfg).await;
                (src, outcome)
            }
        })
        .collect();

    let outcomes = futures::future::join_all(futures).await;

    // 2. Collect contributions, degrading failures to empty batches.
    let mut batches: Vec<Vec<ResultRecord>> = Vec::with_capacity(outcomes.len());
    for (source, outcome) in outcomes {
        match outcome {
            Ok(records) => {
                tracing::debug!(%source, count = records.len(), "provider returned results");
                batches.push(records);
            }
            Err(err) => {
                tracing::warn!(%source, error = %err, "provider query failed");
                batches.push(Vec::new());
            }
        }
    }

    // 3. Merge and deduplicate by link, first occurrence wins.
    let merged = merge::merge_and_dedup(batches);
    tracing::debug!(count = merged.len(), "merged deduplicated results");

    // 4. Recency sort, per-source grouping, highlight split.
    let grouped = group::group_and_split(merged);

    // 5. Backfill missing images and assemble the response.
    backfill::backfill_images(grouped, config).await
}

/// Query a single provider, dispatching to the concrete adapter.
async fn query_provider(
    source: Source,
    query: &str,
    config: &AggregatorConfig,
) -> Result<Vec<ResultRecord>, AggregateError> {
    match source {
        Source::DuckDuckGo => DuckDuckGoAdapter.search(query, config).await,
        Source::Wikipedia => WikipediaAdapter.search(query, config).await,
        Source::Google => GoogleAdapter.search(query, config).await,
        Source::News => NewsAdapter.search(query, config).await,
        Source::SearchApi => SearchApiAdapter.search(query, config).await,
    }
}
