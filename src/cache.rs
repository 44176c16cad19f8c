//! In-memory cache for aggregated responses.
//!
//! Entries carry their insertion instant and staleness is judged against
//! the caller's TTL on every read, so a config change takes effect
//! immediately instead of being frozen into the cache at first use. The
//! underlying [`moka`] cache only handles capacity and idle eviction;
//! responses are cached whole and never persisted.

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use moka::future::Cache;

use crate::types::{SearchResponse, Source};

/// Maximum number of cached responses.
const MAX_ENTRIES: u64 = 64;

/// Entries untouched for this long are evicted regardless of TTL.
const IDLE_EVICTION_SECS: u64 = 3600;

/// Cache key: normalised query plus the sorted provider set.
///
/// The query is lowercased and trimmed; provider names are sorted and
/// deduplicated, so `[Google, News]` and `[News, Google]` key identically
/// while different provider sets never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Build a deterministic key from a query and provider list.
    pub fn new(query: &str, providers: &[Source]) -> Self {
        let mut names: Vec<&str> = providers.iter().map(Source::name).collect();
        names.sort_unstable();
        names.dedup();
        Self(format!("{}|{}", query.trim().to_lowercase(), names.join("+")))
    }
}

#[derive(Clone)]
struct CachedResponse {
    response: SearchResponse,
    stored_at: Instant,
}

/// Process-wide store of aggregated responses.
pub struct ResponseCache {
    entries: Cache<CacheKey, CachedResponse>,
}

impl ResponseCache {
    fn new() -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(MAX_ENTRIES)
                .time_to_idle(Duration::from_secs(IDLE_EVICTION_SECS))
                .build(),
        }
    }

    /// Look up a response no older than `ttl_seconds`.
    ///
    /// Stale entries are invalidated on read and reported as a miss.
    pub async fn fetch(&self, key: &CacheKey, ttl_seconds: u64) -> Option<SearchResponse> {
        let entry = self.entries.get(key).await?;
        if entry.stored_at.elapsed() > Duration::from_secs(ttl_seconds) {
            self.entries.invalidate(key).await;
            return None;
        }
        Some(entry.response)
    }

    /// Store an aggregated response, stamped with the current instant.
    pub async fn store(&self, key: CacheKey, response: SearchResponse) {
        self.entries
            .insert(
                key,
                CachedResponse {
                    response,
                    stored_at: Instant::now(),
                },
            )
            .await;
    }
}

/// The shared response cache, lazily initialised on first access.
pub fn shared() -> &'static ResponseCache {
    static SHARED: OnceLock<ResponseCache> = OnceLock::new();
    SHARED.get_or_init(ResponseCache::new)
}
