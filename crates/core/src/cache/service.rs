//! Instrumented cache service - core business logic

use std::sync::Arc;

use kvscribe_domain::constants::STORE_OP;
use kvscribe_domain::{CacheValue, ReplayReport, Result, ScribeError};
use tracing::{debug, warn};
use uuid::Uuid;

use super::hooks::{CallCounter, CallHook, HistoryRecorder};
use super::replay::ReplayReporter;
use crate::store::ports::KeyValueStore;

fn default_hooks() -> Vec<Arc<dyn CallHook>> {
    vec![Arc::new(CallCounter), Arc::new(HistoryRecorder)]
}

/// Store-backed cache that tracks every `store` call.
///
/// Each tracked call runs the hook chain (counter bump, history append)
/// around the actual write. The bump and the appends are separate store
/// round trips, not one transaction: concurrent callers of the same
/// operation can interleave them and mis-pair history indexes. Callers that
/// need strictly paired records serialize their calls.
pub struct InstrumentedCache {
    store: Arc<dyn KeyValueStore>,
    hooks: Vec<Arc<dyn CallHook>>,
}

impl InstrumentedCache {
    /// Create a new instrumented cache with the default hook chain
    /// (call counter first, history recorder second).
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store, hooks: default_hooks() }
    }

    /// Start building an instrumented cache with non-default options.
    pub fn builder(store: Arc<dyn KeyValueStore>) -> InstrumentedCacheBuilder {
        InstrumentedCacheBuilder::new(store)
    }

    /// Store `value` under a fresh random key and return the key.
    ///
    /// The key is a v4 UUID in its hyphenated form. Store connectivity
    /// failure propagates; by then the call counter has already been
    /// bumped and the input recorded.
    pub async fn store(&self, value: impl Into<CacheValue>) -> Result<String> {
        let value = value.into();
        let key = Uuid::new_v4().to_string();
        let input = value.repr();

        for hook in &self.hooks {
            hook.before(self.store.as_ref(), STORE_OP, &input).await?;
        }

        self.store.set(&key, value.into_bytes()).await?;

        for hook in &self.hooks {
            hook.after(self.store.as_ref(), STORE_OP, &input, &key).await?;
        }

        debug!(operation = STORE_OP, key = %key, "stored value");
        Ok(key)
    }

    /// Fetch the raw bytes stored under `key`. Missing keys are `Ok(None)`.
    pub async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.store.get(key).await
    }

    /// Fetch the value stored under `key` and convert it with `convert`.
    ///
    /// The conversion only runs when the key is present; a missing key is
    /// `Ok(None)`.
    pub async fn retrieve_with<T, F>(&self, key: &str, convert: F) -> Result<Option<T>>
    where
        F: FnOnce(&[u8]) -> Result<T>,
    {
        match self.store.get(key).await? {
            Some(bytes) => convert(&bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Fetch the value stored under `key` as UTF-8 text.
    pub async fn retrieve_string(&self, key: &str) -> Result<Option<String>> {
        self.retrieve_with(key, |bytes| {
            String::from_utf8(bytes.to_vec())
                .map_err(|err| ScribeError::Conversion(err.to_string()))
        })
        .await
    }

    /// Fetch the value stored under `key` as a base-10 signed integer.
    pub async fn retrieve_int(&self, key: &str) -> Result<Option<i64>> {
        self.retrieve_with(key, |bytes| {
            std::str::from_utf8(bytes)
                .map_err(|err| ScribeError::Conversion(err.to_string()))?
                .parse::<i64>()
                .map_err(|err| ScribeError::Conversion(err.to_string()))
        })
        .await
    }

    /// Number of tracked calls recorded for `operation` (0 when never
    /// called).
    pub async fn call_count(&self, operation: &str) -> Result<u64> {
        match self.store.get(operation).await? {
            Some(bytes) => std::str::from_utf8(&bytes)
                .map_err(|err| ScribeError::Conversion(err.to_string()))?
                .parse::<u64>()
                .map_err(|err| ScribeError::Conversion(err.to_string())),
            None => Ok(0),
        }
    }

    /// Clear the whole backing store, counters and history included.
    ///
    /// Destructive: every key in the store's namespace is removed, not just
    /// the ones this cache wrote.
    pub async fn reset(&self) -> Result<()> {
        warn!("flushing the backing store");
        self.store.flush_db().await
    }

    /// Build the replay report for `operation`.
    pub async fn replay(&self, operation: &str) -> Result<ReplayReport> {
        ReplayReporter::new(Arc::clone(&self.store)).replay(operation).await
    }
}

/// Builder for [`InstrumentedCache`].
pub struct InstrumentedCacheBuilder {
    store: Arc<dyn KeyValueStore>,
    hooks: Vec<Arc<dyn CallHook>>,
    flush_on_init: bool,
}

impl InstrumentedCacheBuilder {
    fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store, hooks: default_hooks(), flush_on_init: false }
    }

    /// Append a hook to run after the default chain.
    pub fn hook(mut self, hook: Arc<dyn CallHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Flush the backing store when the cache is built.
    ///
    /// Destructive: removes every key in the store's namespace. Off by
    /// default; meant for demos and tests that want a fresh store.
    pub fn flush_on_init(mut self, enabled: bool) -> Self {
        self.flush_on_init = enabled;
        self
    }

    /// Build the cache, flushing the backing store first when requested.
    pub async fn build(self) -> Result<InstrumentedCache> {
        if self.flush_on_init {
            warn!("flushing the backing store before first use");
            self.store.flush_db().await?;
        }
        Ok(InstrumentedCache { store: self.store, hooks: self.hooks })
    }
}
