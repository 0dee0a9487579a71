//! Page-cache statistics and metrics tracking
//!
//! In-process observability counters for the page cache. The demand counter
//! of record (`count:<url>`) lives in the backing store; these counters only
//! describe this process's hit/miss/error behavior.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Statistics for page-cache performance monitoring
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Fetches served from the backing store without touching the network
    pub hits: u64,

    /// Fetches that went to the network
    pub misses: u64,

    /// Network fetches that failed
    pub fetch_errors: u64,
}

impl FetchStats {
    /// Calculate hit rate (hits / total accesses)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Total number of page accesses (hits + misses)
    pub fn total_accesses(&self) -> u64 {
        self.hits + self.misses
    }
}

/// Thread-safe metrics collector for page-cache operations
///
/// This struct uses atomic operations to track metrics without requiring
/// locks, enabling low-overhead monitoring.
#[derive(Debug)]
pub(crate) struct StatsCollector {
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    fetch_errors: Arc<AtomicU64>,
}

impl Clone for StatsCollector {
    fn clone(&self) -> Self {
        Self {
            hits: Arc::clone(&self.hits),
            misses: Arc::clone(&self.misses),
            fetch_errors: Arc::clone(&self.fetch_errors),
        }
    }
}

impl Default for StatsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsCollector {
    /// Create a new metrics collector
    pub(crate) fn new() -> Self {
        Self {
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
            fetch_errors: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record a cache hit
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cache miss
    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed network fetch
    pub(crate) fn record_fetch_error(&self) {
        self.fetch_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current statistics snapshot
    pub(crate) fn snapshot(&self) -> FetchStats {
        FetchStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            fetch_errors: self.fetch_errors.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for page::stats.
    use super::*;

    /// Validates `FetchStats::default` behavior for the zeroed snapshot
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms every counter equals `0`.
    /// - Confirms `stats.hit_rate()` equals `0.0`.
    #[test]
    fn test_fetch_stats_default() {
        let stats = FetchStats::default();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.fetch_errors, 0);
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.total_accesses(), 0);
    }

    /// Validates `FetchStats` behavior for the hit rate calculation scenario.
    ///
    /// Assertions:
    /// - Ensures `(stats.hit_rate() - 0.8).abs() < 1e-10` evaluates to true.
    /// - Confirms `stats.total_accesses()` equals `100`.
    #[test]
    fn test_hit_rate_calculation() {
        let stats = FetchStats { hits: 80, misses: 20, ..Default::default() };

        assert!((stats.hit_rate() - 0.8).abs() < 1e-10);
        assert_eq!(stats.total_accesses(), 100);
    }

    /// Validates `StatsCollector::new` behavior for the record operations
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms `stats.hits` equals `2`.
    /// - Confirms `stats.misses` equals `1`.
    /// - Confirms `stats.fetch_errors` equals `1`.
    #[test]
    fn test_collector_record_operations() {
        let collector = StatsCollector::new();

        collector.record_hit();
        collector.record_hit();
        collector.record_miss();
        collector.record_fetch_error();

        let stats = collector.snapshot();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.fetch_errors, 1);
    }

    /// Validates `StatsCollector::new` behavior for the shared clone
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms both handles see the same counts.
    #[test]
    fn test_collector_clone_shares_counts() {
        let collector1 = StatsCollector::new();
        collector1.record_hit();

        let collector2 = collector1.clone();
        collector2.record_hit();

        // Both should see the same counts (shared Arc)
        assert_eq!(collector1.snapshot().hits, 2);
        assert_eq!(collector2.snapshot().hits, 2);
    }
}
