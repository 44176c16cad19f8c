//! Core types for aggregated search results and provider identification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single normalized search result contributed by a provider.
///
/// Records are immutable once created by an adapter; the pipeline only
/// ever fills in a missing `image` during backfill, never overwrites one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Result title, possibly empty.
    pub title: String,
    /// Canonical resource URL. Doubles as the deduplication key; records
    /// with an empty link are dropped during merge.
    pub link: String,
    /// Plain-text excerpt, possibly empty.
    pub snippet: String,
    /// Which provider contributed this record.
    pub source: Source,
    /// Point in time used for recency ordering. Adapters fall back to
    /// aggregation time when the provider supplies no timestamp.
    pub timestamp: DateTime<Utc>,
    /// Preview image URL, absent until filled by the provider or backfill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Search providers that sporez-search can aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// DuckDuckGo Instant Answers API. No credentials, no native images.
    DuckDuckGo,
    /// Wikipedia search API, thumbnails via a secondary summary request.
    Wikipedia,
    /// Google Custom Search Engine, native images via pagemap.
    Google,
    /// NewsAPI, native images and publish timestamps.
    News,
    /// SearchApi.io organic results with native thumbnails.
    SearchApi,
}

impl Source {
    /// Returns the wire-format identifier for this provider.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "duckduckgo",
            Self::Wikipedia => "wikipedia",
            Self::Google => "google",
            Self::News => "news",
            Self::SearchApi => "searchapi",
        }
    }

    /// Returns all provider variants in default registration order.
    pub fn all() -> &'static [Source] {
        &[
            Self::DuckDuckGo,
            Self::Wikipedia,
            Self::Google,
            Self::News,
            Self::SearchApi,
        ]
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The combined aggregation payload returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// One featured record per contributing source.
    pub highlights: Vec<ResultRecord>,
    /// Remaining deduplicated records, capped in total count.
    pub items: Vec<ResultRecord>,
}

/// Metadata extracted from a probed web page.
#[derive(Debug, Clone)]
pub struct PageMeta {
    /// The URL that was fetched.
    pub url: String,
    /// Page title (og:title preferred, `<title>` fallback).
    pub title: String,
    /// Page description from meta tags, empty when none found.
    pub description: String,
    /// Selected hero image URL, empty when nothing qualified.
    pub image: String,
}
