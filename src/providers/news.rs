//! NewsAPI adapter. Requires an API key.
//!
//! The only provider that supplies real publish timestamps, which drive
//! the recency sort. Articles also carry a native `urlToImage`.

use crate::config::AggregatorConfig;
use crate::error::AggregateError;
use crate::http;
use crate::provider::ProviderAdapter;
use crate::types::{ResultRecord, Source};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// NewsAPI `everything` endpoint adapter.
pub struct NewsAdapter;

#[derive(Debug, Deserialize)]
pub(crate) struct NewsResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
    #[serde(default)]
    url: String,
    description: Option<String>,
    #[serde(rename = "urlToImage")]
    url_to_image: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}

impl ProviderAdapter for NewsAdapter {
    async fn search(
        &self,
        query: &str,
        config: &AggregatorConfig,
    ) -> Result<Vec<ResultRecord>, AggregateError> {
        tracing::trace!(query, "NewsAPI search");

        let key = config
            .credentials
            .news_api_key
            .as_deref()
            .ok_or_else(|| AggregateError::Config("NEWS_API_KEY not set".into()))?;

        let client = http::api_client(config)?;

        let response = client
            .get("https://newsapi.org/v2/everything")
            .query(&[("q", query), ("apiKey", key)])
            .send()
            .await
            .map_err(|e| AggregateError::Http(format!("NewsAPI request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AggregateError::Http(format!("NewsAPI HTTP error: {e}")))?;

        let data: NewsResponse = response
            .json()
            .await
            .map_err(|e| AggregateError::Parse(format!("NewsAPI response invalid: {e}")))?;

        let records = map_response(data, Utc::now());
        tracing::debug!(count = records.len(), "NewsAPI results mapped");
        Ok(records)
    }

    fn source(&self) -> Source {
        Source::News
    }
}

/// Map articles into records, parsing publish timestamps where present.
pub(crate) fn map_response(data: NewsResponse, now: DateTime<Utc>) -> Vec<ResultRecord> {
    data.articles
        .into_iter()
        .map(|article| ResultRecord {
            title: article.title.unwrap_or_default(),
            link: article.url,
            snippet: article.description.unwrap_or_default(),
            source: Source::News,
            timestamp: parse_timestamp(article.published_at.as_deref(), now),
            image: article.url_to_image.filter(|s| !s.is_empty()),
        })
        .collect()
}

/// Parse an RFC 3339 publish timestamp, falling back to aggregation time.
fn parse_timestamp(raw: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AggregatorConfig;
    use crate::provider::ProviderAdapter;
    use chrono::TimeZone;

    const MOCK_NEWS_JSON: &str = r#"{
        "articles": [
            {
                "title": "Giraffe born at city zoo",
                "url": "https://news.example.com/giraffe-born",
                "description": "A calf was born on Tuesday.",
                "urlToImage": "https://news.example.com/calf.jpg",
                "publishedAt": "2026-08-20T10:30:00Z"
            },
            {
                "title": "Giraffe population study",
                "url": "https://news.example.com/study",
                "description": null,
                "urlToImage": null,
                "publishedAt": "not-a-date"
            }
        ]
    }"#;

    fn parse(json: &str) -> NewsResponse {
        serde_json::from_str(json).expect("mock JSON should deserialize")
    }

    #[test]
    fn maps_articles_to_records() {
        let records = map_response(parse(MOCK_NEWS_JSON), Utc::now());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Giraffe born at city zoo");
        assert_eq!(records[0].source, Source::News);
    }

    #[test]
    fn published_at_parsed_as_timestamp() {
        let now = Utc::now();
        let records = map_response(parse(MOCK_NEWS_JSON), now);
        let expected = Utc.with_ymd_and_hms(2026, 8, 20, 10, 30, 0).unwrap();
        assert_eq!(records[0].timestamp, expected);
    }

    #[test]
    fn invalid_published_at_falls_back_to_aggregation_time() {
        let now = Utc::now();
        let records = map_response(parse(MOCK_NEWS_JSON), now);
        assert_eq!(records[1].timestamp, now);
    }

    #[test]
    fn native_image_attached() {
        let records = map_response(parse(MOCK_NEWS_JSON), Utc::now());
        assert_eq!(
            records[0].image.as_deref(),
            Some("https://news.example.com/calf.jpg")
        );
        assert!(records[1].image.is_none());
    }

    #[test]
    fn null_description_becomes_empty_snippet() {
        let records = map_response(parse(MOCK_NEWS_JSON), Utc::now());
        assert!(records[1].snippet.is_empty());
    }

    #[test]
    fn empty_response_maps_to_no_records() {
        let records = map_response(parse("{}"), Utc::now());
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn missing_credential_is_config_error() {
        let config = AggregatorConfig::default();
        let result = NewsAdapter.search("giraffe", &config).await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("NEWS_API_KEY"));
    }

    #[test]
    fn adapter_source_is_news() {
        assert_eq!(NewsAdapter.source(), Source::News);
    }
}
