//! Port interface for the backing key-value store
//!
//! This trait defines the boundary between the caching logic and the
//! store adapters (the wire-protocol client in the infra crate, or the
//! in-memory backend for tests and embedded use).

use std::time::Duration;

use async_trait::async_trait;
use kvscribe_domain::Result;

/// Trait for the subset of store verbs the caching layer relies on.
///
/// Values are raw byte strings; interpretation is left to callers.
/// Implementations map backend failures to
/// [`ScribeError::StoreUnavailable`](kvscribe_domain::ScribeError::StoreUnavailable)
/// and malformed replies to
/// [`ScribeError::Protocol`](kvscribe_domain::ScribeError::Protocol).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored at `key`, or `None` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Set `key` to `value`, replacing any previous value.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Set `key` to `value` with a time-to-live.
    async fn set_ex(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()>;

    /// Set a time-to-live on an existing key.
    ///
    /// Returns `true` when the key existed and the timeout was set.
    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool>;

    /// Increment the integer value at `key` by one, creating it at zero
    /// first when absent. Returns the new value.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Append `value` to the list at `key`, creating the list when absent.
    /// Returns the new list length.
    async fn rpush(&self, key: &str, value: Vec<u8>) -> Result<u64>;

    /// Get the elements of the list at `key` between `start` and `stop`
    /// (inclusive; negative indexes count from the end, `-1` being the
    /// last element). Absent keys yield an empty list.
    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>>;

    /// Remove every key in the store.
    async fn flush_db(&self) -> Result<()>;
}
