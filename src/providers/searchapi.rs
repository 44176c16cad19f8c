//! SearchApi.io adapter. Requires a bearer token.
//!
//! Organic Google results with native thumbnails where available. For
//! wikipedia.org links without a thumbnail, the Wikipedia REST summary
//! endpoint is queried as a fallback, concurrently and fault-tolerantly.

use crate::config::AggregatorConfig;
use crate::error::AggregateError;
use crate::http;
use crate::provider::ProviderAdapter;
use crate::providers::wikipedia::summary_thumbnail;
use crate::types::{ResultRecord, Source};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// SearchApi.io organic-results adapter.
pub struct SearchApiAdapter;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchApiResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
    thumbnail: Option<String>,
    snippet_thumbnail: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}

impl ProviderAdapter for SearchApiAdapter {
    async fn search(
        &self,
        query: &str,
        config: &AggregatorConfig,
    ) -> Result<Vec<ResultRecord>, AggregateError> {
        tracing::trace!(query, "SearchApi search");

        let key = config
            .credentials
            .searchapi_key
            .as_deref()
            .ok_or_else(|| AggregateError::Config("SEARCHAPI_KEY not set".into()))?;

        let client = http::api_client(config)?;

        let response = client
            .get("https://www.searchapi.io/api/v1/search")
            .query(&[("q", query), ("engine", "google")])
            .bearer_auth(key)
            .send()
            .await
            .map_err(|e| AggregateError::Http(format!("SearchApi request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AggregateError::Http(format!("SearchApi HTTP error: {e}")))?;

        let data: SearchApiResponse = response
            .json()
            .await
            .map_err(|e| AggregateError::Parse(format!("SearchApi response invalid: {e}")))?;

        let records = map_response(data, Utc::now());

        // Wikipedia links without a native thumbnail get a summary lookup.
        let enriched = futures::future::join_all(records.into_iter().map(|mut record| {
            let client = client.clone();
            async move {
                if record.image.is_none() {
                    if let Some(title) = wikipedia_title(&record.link) {
                        record.image = summary_thumbnail(&client, &title).await;
                    }
                }
                record
            }
        }))
        .await;

        tracing::debug!(count = enriched.len(), "SearchApi results mapped");
        Ok(enriched)
    }

    fn source(&self) -> Source {
        Source::SearchApi
    }
}

/// Map organic results into records, preferring the primary thumbnail.
pub(crate) fn map_response(data: SearchApiResponse, now: DateTime<Utc>) -> Vec<ResultRecord> {
    data.organic_results
        .into_iter()
        .map(|result| ResultRecord {
            title: result.title,
            link: result.link,
            snippet: result.snippet,
            source: Source::SearchApi,
            timestamp: result
                .published_at
                .as_deref()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or(now),
            image: result
                .thumbnail
                .or(result.snippet_thumbnail)
                .filter(|s| !s.is_empty()),
        })
        .collect()
}

/// Extract the decoded article title from a wikipedia.org link.
pub(crate) fn wikipedia_title(link: &str) -> Option<String> {
    if !link.contains("wikipedia.org") {
        return None;
    }
    let encoded = link.split("/wiki/").nth(1)?;
    if encoded.is_empty() {
        return None;
    }
    match urlencoding::decode(encoded) {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(_) => Some(encoded.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AggregatorConfig;
    use crate::provider::ProviderAdapter;

    const MOCK_SEARCHAPI_JSON: &str = r#"{
        "organic_results": [
            {
                "title": "Giraffe - Wikipedia",
                "link": "https://en.wikipedia.org/wiki/Giraffe",
                "snippet": "The giraffe is a large African mammal."
            },
            {
                "title": "Giraffe photos",
                "link": "https://photos.example.com/giraffe",
                "snippet": "Photo gallery.",
                "thumbnail": "https://photos.example.com/thumb.jpg",
                "snippet_thumbnail": "https://photos.example.com/snippet-thumb.jpg"
            },
            {
                "title": "Giraffe sounds",
                "link": "https://sounds.example.com/giraffe",
                "snippet": "What noises do giraffes make?",
                "snippet_thumbnail": "https://sounds.example.com/snippet-thumb.jpg"
            }
        ]
    }"#;

    fn parse(json: &str) -> SearchApiResponse {
        serde_json::from_str(json).expect("mock JSON should deserialize")
    }

    #[test]
    fn maps_organic_results_to_records() {
        let records = map_response(parse(MOCK_SEARCHAPI_JSON), Utc::now());
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].title, "Giraffe - Wikipedia");
        assert_eq!(records[0].source, Source::SearchApi);
    }

    #[test]
    fn primary_thumbnail_preferred() {
        let records = map_response(parse(MOCK_SEARCHAPI_JSON), Utc::now());
        assert_eq!(
            records[1].image.as_deref(),
            Some("https://photos.example.com/thumb.jpg")
        );
    }

    #[test]
    fn snippet_thumbnail_used_as_fallback() {
        let records = map_response(parse(MOCK_SEARCHAPI_JSON), Utc::now());
        assert_eq!(
            records[2].image.as_deref(),
            Some("https://sounds.example.com/snippet-thumb.jpg")
        );
    }

    #[test]
    fn wikipedia_link_without_thumbnail_starts_imageless() {
        let records = map_response(parse(MOCK_SEARCHAPI_JSON), Utc::now());
        assert!(records[0].image.is_none());
    }

    #[test]
    fn wikipedia_title_extracted_and_decoded() {
        assert_eq!(
            wikipedia_title("https://en.wikipedia.org/wiki/Giraffe"),
            Some("Giraffe".to_string())
        );
        assert_eq!(
            wikipedia_title("https://en.wikipedia.org/wiki/Masai%20giraffe"),
            Some("Masai giraffe".to_string())
        );
    }

    #[test]
    fn wikipedia_title_none_for_other_domains() {
        assert!(wikipedia_title("https://example.com/wiki/Giraffe").is_none());
        assert!(wikipedia_title("https://en.wikipedia.org/").is_none());
    }

    #[test]
    fn empty_response_maps_to_no_records() {
        let records = map_response(parse("{}"), Utc::now());
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn missing_credential_is_config_error() {
        let config = AggregatorConfig::default();
        let result = SearchApiAdapter.search("giraffe", &config).await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("SEARCHAPI_KEY"));
    }

    #[test]
    fn adapter_source_is_searchapi() {
        assert_eq!(SearchApiAdapter.source(), Source::SearchApi);
    }
}
