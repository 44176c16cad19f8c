//! DuckDuckGo Instant Answers adapter. No credentials required.
//!
//! Uses the JSON API at `https://api.duckduckgo.com/` with `format=json`.
//! Related topics arrive either as flat entries or as named groups with a
//! nested `Topics` array; both are flattened into records. The API exposes
//! no native images, so these records rely entirely on backfill.

use crate::config::AggregatorConfig;
use crate::error::AggregateError;
use crate::http;
use crate::provider::ProviderAdapter;
use crate::types::{ResultRecord, Source};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// DuckDuckGo Instant Answers API adapter.
pub struct DuckDuckGoAdapter;

/// Raw Instant Answers response, reduced to the fields we map.
#[derive(Debug, Deserialize)]
pub(crate) struct InstantAnswerResponse {
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<RelatedTopic>,
}

/// A related topic is either a nested group or a flat entry.
///
/// `Group` must be tried first: a flat entry has no `Topics` key, while a
/// group would otherwise match the all-defaulted `Entry` shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RelatedTopic {
    Group {
        #[serde(rename = "Topics")]
        topics: Vec<TopicEntry>,
    },
    Entry(TopicEntry),
}

#[derive(Debug, Deserialize)]
struct TopicEntry {
    #[serde(rename = "Text", default)]
    text: String,
    #[serde(rename = "FirstURL", default)]
    first_url: String,
}

impl ProviderAdapter for DuckDuckGoAdapter {
    async fn search(
        &self,
        query: &str,
        config: &AggregatorConfig,
    ) -> Result<Vec<ResultRecord>, AggregateError> {
        tracing::trace!(query, "DuckDuckGo search");

        let client = http::api_client(config)?;

        let response = client
            .get("https://api.duckduckgo.com/")
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("no_redirect", "1"),
            ])
            .send()
            .await
            .map_err(|e| AggregateError::Http(format!("DuckDuckGo request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AggregateError::Http(format!("DuckDuckGo HTTP error: {e}")))?;

        let data: InstantAnswerResponse = response
            .json()
            .await
            .map_err(|e| AggregateError::Parse(format!("DuckDuckGo response invalid: {e}")))?;

        let records = map_response(data, Utc::now());
        tracing::debug!(count = records.len(), "DuckDuckGo results mapped");
        Ok(records)
    }

    fn source(&self) -> Source {
        Source::DuckDuckGo
    }
}

/// Flatten related topics (including nested groups) into records.
///
/// Extracted as a separate function for testability with mock JSON.
pub(crate) fn map_response(
    data: InstantAnswerResponse,
    now: DateTime<Utc>,
) -> Vec<ResultRecord> {
    let mut records = Vec::new();
    for topic in data.related_topics {
        match topic {
            RelatedTopic::Group { topics } => {
                for entry in topics {
                    records.push(map_entry(entry, now));
                }
            }
            RelatedTopic::Entry(entry) => records.push(map_entry(entry, now)),
        }
    }
    records
}

fn map_entry(entry: TopicEntry, now: DateTime<Utc>) -> ResultRecord {
    ResultRecord {
        title: entry.text.clone(),
        link: entry.first_url,
        snippet: entry.text,
        source: Source::DuckDuckGo,
        timestamp: now,
        image: None,
    }
}
