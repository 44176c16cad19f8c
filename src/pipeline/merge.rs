//! Flattening and link-based deduplication of provider contributions.
//!
//! Input is the ordered collection of per-provider batches (registration
//! order, as joined by the fan-out barrier). Records with an empty link
//! are dropped unconditionally; they can neither be deduplicated nor
//! displayed. Deduplication is stable and first-occurrence-wins: when two
//! providers return the same link, the earlier-registered provider's
//! record is kept.

use std::collections::HashSet;

use crate::types::ResultRecord;

/// Flatten batches in registration order and deduplicate by exact link.
pub fn merge_and_dedup(batches: Vec<Vec<ResultRecord>>) -> Vec<ResultRecord> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged: Vec<ResultRecord> = Vec::new();

    for batch in batches {
        for record in batch {
            if record.link.is_empty() {
                continue;
            }
            if seen.insert(record.link.clone()) {
                merged.push(record);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Source;
    use chrono::Utc;

    fn make_record(link: &str, source: Source, title: &str) -> ResultRecord {
        ResultRecord {
            title: title.to_string(),
            link: link.to_string(),
            snippet: format!("Snippet for {title}"),
            source,
            timestamp: Utc::now(),
            image: None,
        }
    }

    #[test]
    fn unique_links_pass_through() {
        let merged = merge_and_dedup(vec![
            vec![make_record("https://a.com", Source::DuckDuckGo, "A")],
            vec![make_record("https://b.com", Source::Wikipedia, "B")],
        ]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn duplicate_links_first_registered_provider_wins() {
        let merged = merge_and_dedup(vec![
            vec![make_record(
                "https://en.wikipedia.org/wiki/Giraffe",
                Source::DuckDuckGo,
                "DDG version",
            )],
            vec![make_record(
                "https://en.wikipedia.org/wiki/Giraffe",
                Source::Wikipedia,
                "Wiki version",
            )],
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "DDG version");
        assert_eq!(merged[0].source, Source::DuckDuckGo);
    }

    #[test]
    fn empty_links_dropped() {
        let merged = merge_and_dedup(vec![vec![
            make_record("", Source::DuckDuckGo, "No link"),
            make_record("https://a.com", Source::DuckDuckGo, "A"),
        ]]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].link, "https://a.com");
    }

    #[test]
    fn duplicate_within_single_provider_kept_once() {
        let merged = merge_and_dedup(vec![vec![
            make_record("https://a.com", Source::News, "First"),
            make_record("https://a.com", Source::News, "Second"),
        ]]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "First");
    }

    #[test]
    fn registration_order_preserved_in_output() {
        let merged = merge_and_dedup(vec![
            vec![
                make_record("https://a.com", Source::DuckDuckGo, "A"),
                make_record("https://b.com", Source::DuckDuckGo, "B"),
            ],
            vec![make_record("https://c.com", Source::Wikipedia, "C")],
        ]);
        let links: Vec<&str> = merged.iter().map(|r| r.link.as_str()).collect();
        assert_eq!(links, vec!["https://a.com", "https://b.com", "https://c.com"]);
    }

    #[test]
    fn dedup_keys_on_exact_link_text() {
        // Trailing slash variants are distinct links; no normalisation.
        let merged = merge_and_dedup(vec![vec![
            make_record("https://a.com/page", Source::Google, "A"),
            make_record("https://a.com/page/", Source::Google, "B"),
        ]]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(merge_and_dedup(vec![]).is_empty());
        assert!(merge_and_dedup(vec![vec![], vec![]]).is_empty());
    }
}
