//! Page cache service - TTL-bounded caching of fetched pages

use std::sync::Arc;
use std::time::Duration;

use kvscribe_domain::constants::{DEFAULT_PAGE_TTL_SECS, PAGE_CONTENT_PREFIX, PAGE_COUNT_PREFIX};
use kvscribe_domain::{Result, ScribeError};
use tracing::{debug, warn};

use super::ports::PageFetcher;
use super::stats::{FetchStats, StatsCollector};
use crate::store::ports::KeyValueStore;

fn content_key(url: &str) -> String {
    format!("{PAGE_CONTENT_PREFIX}{url}")
}

fn count_key(url: &str) -> String {
    format!("{PAGE_COUNT_PREFIX}{url}")
}

/// Parses a store-held counter value, absent meaning zero.
fn parse_counter(bytes: Option<Vec<u8>>) -> Result<u64> {
    match bytes {
        Some(bytes) => std::str::from_utf8(&bytes)
            .map_err(|err| ScribeError::Conversion(err.to_string()))?
            .parse::<u64>()
            .map_err(|err| ScribeError::Conversion(err.to_string())),
        None => Ok(0),
    }
}

/// TTL cache for fetched pages with per-URL demand counting.
///
/// Page content lives in the backing store under `cached:<url>` with a
/// per-key TTL owned by the store; no stale entry is ever served and there
/// is no sweeper. The demand counter under `count:<url>` is bumped on every
/// access, hit or miss, and survives content expiry.
pub struct PageCache {
    store: Arc<dyn KeyValueStore>,
    fetcher: Arc<dyn PageFetcher>,
    ttl: Duration,
    stats: StatsCollector,
}

impl PageCache {
    /// Create a page cache with the default time-to-live.
    pub fn new(store: Arc<dyn KeyValueStore>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self::with_ttl(store, fetcher, Duration::from_secs(DEFAULT_PAGE_TTL_SECS))
    }

    /// Create a page cache with the specified time-to-live.
    pub fn with_ttl(
        store: Arc<dyn KeyValueStore>,
        fetcher: Arc<dyn PageFetcher>,
        ttl: Duration,
    ) -> Self {
        Self { store, fetcher, ttl, stats: StatsCollector::new() }
    }

    /// Return the page body for `url`, fetching it when not cached.
    ///
    /// The demand counter is bumped first, unconditionally; a failed fetch
    /// does not roll it back. Cached content that does not decode as UTF-8
    /// surfaces as a `Conversion` error.
    pub async fn fetch_page(&self, url: &str) -> Result<String> {
        if url.is_empty() {
            return Err(ScribeError::InvalidInput("empty url".to_string()));
        }

        self.store.incr(&count_key(url)).await?;

        if let Some(bytes) = self.store.get(&content_key(url)).await? {
            let text = String::from_utf8(bytes)
                .map_err(|err| ScribeError::Conversion(err.to_string()))?;
            self.stats.record_hit();
            debug!(%url, "page cache hit");
            return Ok(text);
        }

        self.stats.record_miss();
        debug!(%url, "page cache miss, fetching");

        let body = match self.fetcher.fetch(url).await {
            Ok(body) => body,
            Err(err) => {
                self.stats.record_fetch_error();
                warn!(%url, error = %err, "page fetch failed");
                return Err(err);
            }
        };

        self.store.set_ex(&content_key(url), body.clone().into_bytes(), self.ttl).await?;
        Ok(body)
    }

    /// Number of times `url` has been requested (0 when never requested).
    pub async fn access_count(&self, url: &str) -> Result<u64> {
        parse_counter(self.store.get(&count_key(url)).await?)
    }

    /// Current hit/miss/error snapshot for this process.
    pub fn stats(&self) -> FetchStats {
        self.stats.snapshot()
    }
}
