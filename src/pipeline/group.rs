//! Recency sort, per-source grouping, and highlight selection.
//!
//! The deduplicated list is sorted newest-first once, then bucketed by
//! source in first-encounter order. Each bucket keeps at most
//! [`PER_SOURCE_CAP`] records; the first record per non-empty bucket
//! becomes a highlight and the rest join a shared remainder pool capped
//! at [`REMAINDER_CAP`]. Grouping never re-sorts.

use crate::types::{ResultRecord, Source};

/// Maximum records retained per source bucket before the highlight split.
pub const PER_SOURCE_CAP: usize = 5;

/// Maximum records in the shared remainder pool across all sources.
pub const REMAINDER_CAP: usize = 20;

/// The highlight/remainder partition produced by grouping.
#[derive(Debug, Clone)]
pub struct GroupedResults {
    /// One record per contributing source, newest-first per bucket order.
    pub highlights: Vec<ResultRecord>,
    /// Remaining records in bucket-encounter order, capped.
    pub items: Vec<ResultRecord>,
}

/// Sort by recency, bucket per source, and split highlights from the rest.
///
/// Bucket order follows first encounter in the sorted sequence, so the
/// partition is deterministic for a fixed provider list. The sort is
/// stable: records with equal timestamps keep their merge order.
pub fn group_and_split(mut records: Vec<ResultRecord>) -> GroupedResults {
    // Newest first, over the full deduplicated sequence.
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut buckets: Vec<(Source, Vec<ResultRecord>)> = Vec::new();
    for record in records {
        match buckets.iter_mut().find(|(source, _)| *source == record.source) {
            Some((_, bucket)) => {
                if bucket.len() < PER_SOURCE_CAP {
                    bucket.push(record);
                }
            }
            None => buckets.push((record.source, vec![record])),
        }
    }

    let mut highlights = Vec::with_capacity(buckets.len());
    let mut items = Vec::new();
    for (_, mut bucket) in buckets {
        let rest = bucket.split_off(1);
        highlights.extend(bucket);
        items.extend(rest);
    }
    items.truncate(REMAINDER_CAP);

    GroupedResults { highlights, items }
}
