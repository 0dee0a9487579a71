//! Integration tests for the instrumented cache.
//!
//! These tests drive the full store → count → history → replay lifecycle
//! against the in-memory backend, including the failure path that leaves a
//! dangling input record behind.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use kvscribe_core::{InstrumentedCache, KeyValueStore, MemoryStore};
use kvscribe_domain::{Result, ScribeError};

/// Store whose `set` always fails, for exercising the dangling-input path.
struct FailingSetStore {
    inner: MemoryStore,
}

impl FailingSetStore {
    fn new() -> Self {
        Self { inner: MemoryStore::new() }
    }
}

#[async_trait]
impl KeyValueStore for FailingSetStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.inner.get(key).await
    }

    async fn set(&self, _key: &str, _value: Vec<u8>) -> Result<()> {
        Err(ScribeError::StoreUnavailable("injected set failure".to_string()))
    }

    async fn set_ex(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        self.inner.set_ex(key, value, ttl).await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        self.inner.expire(key, ttl).await
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        self.inner.incr(key).await
    }

    async fn rpush(&self, key: &str, value: Vec<u8>) -> Result<u64> {
        self.inner.rpush(key, value).await
    }

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>> {
        self.inner.lrange(key, start, stop).await
    }

    async fn flush_db(&self) -> Result<()> {
        self.inner.flush_db().await
    }
}

/// Runs N tracked stores and checks the counter, both history lists, and the
/// pairing between recorded outputs and returned keys.
#[tokio::test]
async fn test_store_lifecycle_tracks_everything() {
    let store = Arc::new(MemoryStore::new());
    let cache = InstrumentedCache::new(store.clone());

    let mut keys = Vec::new();
    for value in ["first", "second", "third"] {
        keys.push(cache.store(value).await.unwrap());
    }

    assert_eq!(cache.call_count("cache.store").await.unwrap(), 3);

    let inputs = store.lrange("cache.store:inputs", 0, -1).await.unwrap();
    let outputs = store.lrange("cache.store:outputs", 0, -1).await.unwrap();
    assert_eq!(inputs.len(), 3);
    assert_eq!(outputs.len(), 3);
    assert_eq!(inputs[0], b"\"first\"".to_vec());

    for (output, key) in outputs.iter().zip(&keys) {
        assert_eq!(output, key.as_bytes());
    }

    for (key, value) in keys.iter().zip(["first", "second", "third"]) {
        assert_eq!(cache.retrieve(key).await.unwrap(), Some(value.as_bytes().to_vec()));
    }
}

/// Checks the rendered replay report against the exact expected text.
#[tokio::test]
async fn test_replay_report_rendering() {
    let cache = InstrumentedCache::new(Arc::new(MemoryStore::new()));

    let key = cache.store("42").await.unwrap();
    let report = cache.replay("cache.store").await.unwrap();

    let expected = format!("cache.store was called 1 times:\ncache.store(\"42\") -> {key}");
    assert_eq!(report.to_string(), expected);
}

/// Replaying an operation that was never called yields a zero-call headline
/// and no records.
#[tokio::test]
async fn test_replay_never_called_operation() {
    let cache = InstrumentedCache::new(Arc::new(MemoryStore::new()));

    let report = cache.replay("cache.store").await.unwrap();
    assert_eq!(report.calls, 0);
    assert!(report.records.is_empty());
    assert_eq!(report.to_string(), "cache.store was called 0 times:");
}

/// A store whose backing write fails still bumps the counter and records the
/// input; replay tolerates the missing output.
#[tokio::test]
async fn test_failed_store_leaves_dangling_input() {
    let cache = InstrumentedCache::new(Arc::new(FailingSetStore::new()));

    let err = cache.store("doomed").await.unwrap_err();
    assert!(matches!(err, ScribeError::StoreUnavailable(_)));

    assert_eq!(cache.call_count("cache.store").await.unwrap(), 1);

    let report = cache.replay("cache.store").await.unwrap();
    assert_eq!(report.calls, 1);
    assert!(report.records.is_empty());
}

/// Resetting wipes counters and history; the cache keeps working afterwards.
#[tokio::test]
async fn test_reset_then_reuse() {
    let cache = InstrumentedCache::new(Arc::new(MemoryStore::new()));

    cache.store("before").await.unwrap();
    cache.reset().await.unwrap();

    assert_eq!(cache.call_count("cache.store").await.unwrap(), 0);
    assert_eq!(cache.replay("cache.store").await.unwrap().calls, 0);

    let key = cache.store("after").await.unwrap();
    assert_eq!(cache.retrieve_string(&key).await.unwrap(), Some("after".to_string()));
    assert_eq!(cache.call_count("cache.store").await.unwrap(), 1);
}
