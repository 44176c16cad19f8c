//! Google Custom Search adapter. Requires an API key and engine id.
//!
//! Native images come from the result pagemap: `cse_image` entries are
//! preferred, with the `og:image` metatag as fallback.

use crate::config::AggregatorConfig;
use crate::error::AggregateError;
use crate::http;
use crate::provider::ProviderAdapter;
use crate::types::{ResultRecord, Source};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

/// Google Custom Search Engine adapter.
pub struct GoogleAdapter;

#[derive(Debug, Deserialize)]
pub(crate) struct CseResponse {
    #[serde(default)]
    items: Vec<CseItem>,
}

#[derive(Debug, Deserialize)]
struct CseItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
    pagemap: Option<PageMap>,
}

#[derive(Debug, Deserialize)]
struct PageMap {
    #[serde(default)]
    cse_image: Vec<CseImage>,
    #[serde(default)]
    metatags: Vec<HashMap<String, String>>,
}

#[derive(Debug, Deserialize)]
struct CseImage {
    #[serde(default)]
    src: String,
}

impl ProviderAdapter for GoogleAdapter {
    async fn search(
        &self,
        query: &str,
        config: &AggregatorConfig,
    ) -> Result<Vec<ResultRecord>, AggregateError> {
        tracing::trace!(query, "Google CSE search");

        let key = config
            .credentials
            .google_api_key
            .as_deref()
            .ok_or_else(|| AggregateError::Config("GOOGLE_API_KEY not set".into()))?;
        let cx = config
            .credentials
            .google_cse_id
            .as_deref()
            .ok_or_else(|| AggregateError::Config("GOOGLE_CSE_ID not set".into()))?;

        let client = http::api_client(config)?;

        let response = client
            .get("https://www.googleapis.com/customsearch/v1")
            .query(&[("key", key), ("cx", cx), ("q", query)])
            .send()
            .await
            .map_err(|e| AggregateError::Http(format!("Google CSE request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AggregateError::Http(format!("Google CSE HTTP error: {e}")))?;

        let data: CseResponse = response
            .json()
            .await
            .map_err(|e| AggregateError::Parse(format!("Google CSE response invalid: {e}")))?;

        let records = map_response(data, Utc::now());
        tracing::debug!(count = records.len(), "Google CSE results mapped");
        Ok(records)
    }

    fn source(&self) -> Source {
        Source::Google
    }
}

/// Map CSE items into records, attaching pagemap images where present.
pub(crate) fn map_response(data: CseResponse, now: DateTime<Utc>) -> Vec<ResultRecord> {
    data.items
        .into_iter()
        .map(|item| {
            let image = item.pagemap.as_ref().and_then(pagemap_image);
            ResultRecord {
                title: item.title,
                link: item.link,
                snippet: item.snippet,
                source: Source::Google,
                timestamp: now,
                image,
            }
        })
        .collect()
}

/// Prefer a `cse_image` src, falling back to the first `og:image` metatag.
fn pagemap_image(pagemap: &PageMap) -> Option<String> {
    let cse = pagemap
        .cse_image
        .first()
        .map(|i| i.src.clone())
        .filter(|s| !s.is_empty());
    cse.or_else(|| {
        pagemap
            .metatags
            .first()
            .and_then(|tags| tags.get("og:image"))
            .cloned()
            .filter(|s| !s.is_empty())
    })
}
