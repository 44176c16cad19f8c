//! Image backfill: probe pages for records missing a preview image.
//!
//! Collects the links of all highlight and remainder records without an
//! image, probes them concurrently, and merges the resulting link→image
//! map back into the records. Every probed link appears in the map, with
//! an empty string when the fetch failed or nothing qualified; a per-link
//! failure never aborts the batch. Each link is probed exactly once per
//! aggregation run, with no retries.

use std::collections::HashMap;

use crate::config::AggregatorConfig;
use crate::error::AggregateError;
use crate::http;
use crate::scrape;
use crate::types::{ResultRecord, SearchResponse};

use super::group::GroupedResults;

/// Backfill missing images and assemble the final response.
///
/// # Errors
///
/// Only HTTP client construction can fail; individual probe failures are
/// contained and reduce to empty images.
pub async fn backfill_images(
    grouped: GroupedResults,
    config: &AggregatorConfig,
) -> Result<SearchResponse, AggregateError> {
    let links: Vec<String> = grouped
        .highlights
        .iter()
        .chain(grouped.items.iter())
        .filter(|record| record.image.is_none())
        .map(|record| record.link.clone())
        .collect();

    let image_map = probe_links(&links, config).await?;

    Ok(SearchResponse {
        highlights: merge_images(grouped.highlights, &image_map),
        items: merge_images(grouped.items, &image_map),
    })
}

/// Probe each link concurrently and collect a link→image map.
///
/// Each link resolves to its extracted hero image, or an empty string on
/// fetch failure or when nothing qualified. The join barrier settles only
/// after every probe has resolved.
pub async fn probe_links(
    links: &[String],
    config: &AggregatorConfig,
) -> Result<HashMap<String, String>, AggregateError> {
    if links.is_empty() {
        return Ok(HashMap::new());
    }

    let client = http::probe_client(config)?;
    tracing::debug!(count = links.len(), "probing links for images");

    let probes = links.iter().map(|link| {
        let client = client.clone();
        let link = link.clone();
        async move {
            let image = match scrape::fetch_page_meta(&client, &link).await {
                Ok(meta) => meta.image,
                Err(err) => {
                    tracing::debug!(%link, error = %err, "image probe failed");
                    String::new()
                }
            };
            (link, image)
        }
    });

    Ok(futures::future::join_all(probes).await.into_iter().collect())
}

/// Merge probed images into records that still lack one.
///
/// A record's existing image is never overwritten, and empty probe
/// results leave the record imageless.
pub fn merge_images(
    records: Vec<ResultRecord>,
    image_map: &HashMap<String, String>,
) -> Vec<ResultRecord> {
    records
        .into_iter()
        .map(|mut record| {
            if record.image.is_none() {
                if let Some(image) = image_map.get(&record.link) {
                    if !image.is_empty() {
                        record.image = Some(image.clone());
                    }
                }
            }
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Source;
    use chrono::Utc;

    fn make_record(link: &str, image: Option<&str>) -> ResultRecord {
        ResultRecord {
            title: "Title".into(),
            link: link.into(),
            snippet: String::new(),
            source: Source::DuckDuckGo,
            timestamp: Utc::now(),
            image: image.map(String::from),
        }
    }

    #[test]
    fn merge_fills_missing_images() {
        let mut map = HashMap::new();
        map.insert(
            "https://a.com".to_string(),
            "https://cdn.example.com/a.jpg".to_string(),
        );
        let merged = merge_images(vec![make_record("https://a.com", None)], &map);
        assert_eq!(
            merged[0].image.as_deref(),
            Some("https://cdn.example.com/a.jpg")
        );
    }

    #[test]
    fn merge_never_overwrites_existing_image() {
        let mut map = HashMap::new();
        map.insert(
            "https://a.com".to_string(),
            "https://cdn.example.com/probed.jpg".to_string(),
        );
        let merged = merge_images(
            vec![make_record("https://a.com", Some("https://native.example.com/n.jpg"))],
            &map,
        );
        assert_eq!(
            merged[0].image.as_deref(),
            Some("https://native.example.com/n.jpg")
        );
    }

    #[test]
    fn empty_probe_result_leaves_record_imageless() {
        let mut map = HashMap::new();
        map.insert("https://a.com".to_string(), String::new());
        let merged = merge_images(vec![make_record("https://a.com", None)], &map);
        assert!(merged[0].image.is_none());
    }

    #[test]
    fn unprobed_link_left_unchanged() {
        let map = HashMap::new();
        let merged = merge_images(vec![make_record("https://a.com", None)], &map);
        assert!(merged[0].image.is_none());
    }

    #[tokio::test]
    async fn probing_no_links_returns_empty_map() {
        let config = AggregatorConfig::default();
        let map = probe_links(&[], &config).await.expect("empty probe");
        assert!(map.is_empty());
    }
}
