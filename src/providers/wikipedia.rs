//! Wikipedia search adapter with per-result thumbnail enrichment.
//!
//! Uses the MediaWiki search API for results, then the REST summary
//! endpoint for thumbnails. The summary fetch is a secondary request per
//! candidate result, issued concurrently and individually fault-tolerant:
//! a failed thumbnail lookup reduces to "no image" for that record, never
//! a dropped record.

use crate::config::AggregatorConfig;
use crate::error::AggregateError;
use crate::http;
use crate::provider::ProviderAdapter;
use crate::types::{ResultRecord, Source};
use chrono::{DateTime, Utc};
use scraper::Html;
use serde::Deserialize;

/// Wikipedia search API adapter.
pub struct WikipediaAdapter;

#[derive(Debug, Deserialize)]
pub(crate) struct WikiSearchResponse {
    #[serde(default)]
    query: WikiQueryBlock,
}

#[derive(Debug, Deserialize, Default)]
struct WikiQueryBlock {
    #[serde(default)]
    search: Vec<WikiSearchHit>,
}

#[derive(Debug, Deserialize)]
struct WikiSearchHit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
}

#[derive(Debug, Deserialize)]
struct PageSummary {
    thumbnail: Option<SummaryThumbnail>,
}

#[derive(Debug, Deserialize)]
struct SummaryThumbnail {
    source: String,
}

impl ProviderAdapter for WikipediaAdapter {
    async fn search(
        &self,
        query: &str,
        config: &AggregatorConfig,
    ) -> Result<Vec<ResultRecord>, AggregateError> {
        tracing::trace!(query, "Wikipedia search");

        let client = http::api_client(config)?;

        let response = client
            .get("https://en.wikipedia.org/w/api.php")
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| AggregateError::Http(format!("Wikipedia request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AggregateError::Http(format!("Wikipedia HTTP error: {e}")))?;

        let data: WikiSearchResponse = response
            .json()
            .await
            .map_err(|e| AggregateError::Parse(format!("Wikipedia response invalid: {e}")))?;

        let now = Utc::now();
        let records = map_hits(data, now);

        // Secondary thumbnail fetch per record, concurrently; each lookup
        // failure degrades to a record without an image.
        let enriched = futures::future::join_all(records.into_iter().map(|mut record| {
            let client = client.clone();
            async move {
                record.image = summary_thumbnail(&client, &record.title).await;
                record
            }
        }))
        .await;

        tracing::debug!(count = enriched.len(), "Wikipedia results mapped");
        Ok(enriched)
    }

    fn source(&self) -> Source {
        Source::Wikipedia
    }
}

/// Map search hits into records, stripping markup from snippets.
///
/// The search API wraps matched terms in `searchmatch` spans; snippets are
/// reduced to plain text before leaving the adapter.
pub(crate) fn map_hits(data: WikiSearchResponse, now: DateTime<Utc>) -> Vec<ResultRecord> {
    data.query
        .search
        .into_iter()
        .map(|hit| ResultRecord {
            link: format!(
                "https://en.wikipedia.org/wiki/{}",
                urlencoding::encode(&hit.title)
            ),
            snippet: strip_markup(&hit.snippet),
            title: hit.title,
            source: Source::Wikipedia,
            timestamp: now,
            image: None,
        })
        .collect()
}

/// Fetch a page's thumbnail URL from the REST summary endpoint.
///
/// Returns `None` on any transport, status, or parse failure. Also used by
/// the SearchApi adapter for wikipedia.org links without a native thumbnail.
pub(crate) async fn summary_thumbnail(client: &reqwest::Client, title: &str) -> Option<String> {
    let url = format!(
        "https://en.wikipedia.org/api/rest_v1/page/summary/{}",
        urlencoding::encode(title)
    );
    let response = client.get(&url).send().await.ok()?.error_for_status().ok()?;
    let summary: PageSummary = response.json().await.ok()?;
    summary.thumbnail.map(|t| t.source)
}

/// Reduce an HTML snippet fragment to its plain text.
fn strip_markup(snippet: &str) -> String {
    let fragment = Html::parse_fragment(snippet);
    fragment.root_element().text().collect::<String>()
}
