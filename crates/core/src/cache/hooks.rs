//! Call-recording hooks applied around tracked cache operations.
//!
//! A tracked call runs every hook's `before` in chain order, then the
//! wrapped store write, then every hook's `after` in chain order. When the
//! wrapped write fails the `after` pass never runs, which can leave an
//! input record without a matching output; replay tolerates that.

use async_trait::async_trait;
use kvscribe_domain::constants::{INPUTS_SUFFIX, OUTPUTS_SUFFIX};
use kvscribe_domain::Result;
use tracing::debug;

use crate::store::ports::KeyValueStore;

/// Backing-store key of the input-history list for `operation`.
pub fn inputs_key(operation: &str) -> String {
    format!("{operation}{INPUTS_SUFFIX}")
}

/// Backing-store key of the output-history list for `operation`.
pub fn outputs_key(operation: &str) -> String {
    format!("{operation}{OUTPUTS_SUFFIX}")
}

/// Trait for hooks that observe tracked cache operations
#[async_trait]
pub trait CallHook: Send + Sync {
    /// Runs before the wrapped operation
    async fn before(&self, store: &dyn KeyValueStore, operation: &str, input: &str)
        -> Result<()>;

    /// Runs after the wrapped operation has succeeded
    async fn after(
        &self,
        store: &dyn KeyValueStore,
        operation: &str,
        input: &str,
        output: &str,
    ) -> Result<()>;
}

/// Hook that counts invocations per operation.
///
/// The counter lives in the backing store under the operation name itself
/// and is bumped atomically before the wrapped operation runs, so failed
/// calls still count.
pub struct CallCounter;

#[async_trait]
impl CallHook for CallCounter {
    async fn before(
        &self,
        store: &dyn KeyValueStore,
        operation: &str,
        _input: &str,
    ) -> Result<()> {
        let count = store.incr(operation).await?;
        debug!(%operation, count, "bumped call counter");
        Ok(())
    }

    async fn after(
        &self,
        _store: &dyn KeyValueStore,
        _operation: &str,
        _input: &str,
        _output: &str,
    ) -> Result<()> {
        Ok(())
    }
}

/// Hook that appends call inputs and outputs to per-operation history lists.
pub struct HistoryRecorder;

#[async_trait]
impl CallHook for HistoryRecorder {
    async fn before(
        &self,
        store: &dyn KeyValueStore,
        operation: &str,
        input: &str,
    ) -> Result<()> {
        store.rpush(&inputs_key(operation), input.as_bytes().to_vec()).await?;
        Ok(())
    }

    async fn after(
        &self,
        store: &dyn KeyValueStore,
        operation: &str,
        _input: &str,
        output: &str,
    ) -> Result<()> {
        store.rpush(&outputs_key(operation), output.as_bytes().to_vec()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for cache::hooks.
    use super::*;
    use crate::store::memory::MemoryStore;

    /// Validates the history key helpers scenario.
    ///
    /// Assertions:
    /// - Confirms `inputs_key("cache.store")` equals `"cache.store:inputs"`.
    /// - Confirms `outputs_key("cache.store")` equals `"cache.store:outputs"`.
    #[test]
    fn test_history_keys() {
        assert_eq!(inputs_key("cache.store"), "cache.store:inputs");
        assert_eq!(outputs_key("cache.store"), "cache.store:outputs");
    }

    /// Validates `CallCounter` behavior for the repeated before scenario.
    ///
    /// Assertions:
    /// - Confirms the backing counter holds `b"2"` after two invocations.
    #[tokio::test]
    async fn test_call_counter_increments() {
        let store = MemoryStore::new();
        let hook = CallCounter;

        hook.before(&store, "cache.store", "\"x\"").await.unwrap();
        hook.before(&store, "cache.store", "\"y\"").await.unwrap();

        assert_eq!(store.get("cache.store").await.unwrap(), Some(b"2".to_vec()));
    }

    /// Validates `HistoryRecorder` behavior for the paired before/after
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms the inputs list holds the rendered input.
    /// - Confirms the outputs list holds the produced key.
    #[tokio::test]
    async fn test_history_recorder_appends() {
        let store = MemoryStore::new();
        let hook = HistoryRecorder;

        hook.before(&store, "cache.store", "\"42\"").await.unwrap();
        hook.after(&store, "cache.store", "\"42\"", "key-1").await.unwrap();

        let inputs = store.lrange("cache.store:inputs", 0, -1).await.unwrap();
        let outputs = store.lrange("cache.store:outputs", 0, -1).await.unwrap();
        assert_eq!(inputs, vec![b"\"42\"".to_vec()]);
        assert_eq!(outputs, vec![b"key-1".to_vec()]);
    }
}
