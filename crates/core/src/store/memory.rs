//! In-memory key-value store backend with TTL support.
//!
//! This module provides a reference implementation of [`KeyValueStore`] that
//! uses `tokio::sync::RwLock` for concurrent access in async contexts. It
//! mirrors the semantics of the wire-protocol backend closely enough that the
//! caching layer behaves identically on either: wrong-type and non-integer
//! operations fail with the same [`ScribeError::Protocol`] messages the wire
//! backend surfaces, and expiry is lazy.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use kvscribe_domain::{Result, ScribeError};
use tokio::sync::RwLock;

use super::ports::KeyValueStore;
use crate::time::{Clock, SystemClock};

const WRONG_TYPE: &str = "WRONGTYPE Operation against a key holding the wrong kind of value";
const NOT_AN_INTEGER: &str = "value is not an integer or out of range";

/// Value stored under a key: a byte string or a list of byte strings.
#[derive(Debug, Clone)]
enum Slot {
    Bytes(Vec<u8>),
    List(Vec<Vec<u8>>),
}

/// Internal storage entry with its optional expiry deadline.
#[derive(Debug, Clone)]
struct Entry {
    slot: Slot,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Removes `key` when its entry has an elapsed expiry deadline.
fn purge_expired(entries: &mut HashMap<String, Entry>, key: &str, now: Instant) {
    if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
        entries.remove(key);
    }
}

/// Clamps Redis-style list indexes and returns the selected slice.
///
/// Negative indexes count from the end of the list, `-1` being the last
/// element; both bounds are inclusive.
fn slice_range(items: &[Vec<u8>], start: i64, stop: i64) -> Vec<Vec<u8>> {
    let len = items.len() as i64;
    if len == 0 {
        return Vec::new();
    }

    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };
    if start > stop || start >= len {
        return Vec::new();
    }

    items[start as usize..=stop as usize].to_vec()
}

/// In-memory store backend with per-key TTL support.
///
/// Uses `tokio::sync::RwLock` for async concurrent access. Expired entries
/// are purged lazily, on the first access after their deadline.
///
/// # Type Parameters
///
/// * `C` - Clock type for time operations (defaults to `SystemClock`)
///
/// # Examples
///
/// ```
/// use kvscribe_core::{KeyValueStore, MemoryStore};
///
/// #[tokio::main]
/// async fn main() -> kvscribe_domain::Result<()> {
///     let store = MemoryStore::new();
///
///     store.set("key", b"value".to_vec()).await?;
///     assert_eq!(store.get("key").await?, Some(b"value".to_vec()));
///     Ok(())
/// }
/// ```
pub struct MemoryStore<C = SystemClock>
where
    C: Clock,
{
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    clock: C,
}

impl MemoryStore<SystemClock> {
    /// Creates a new empty store backed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for MemoryStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> MemoryStore<C>
where
    C: Clock,
{
    /// Creates a new empty store with the specified clock.
    pub fn with_clock(clock: C) -> Self {
        Self { entries: Arc::new(RwLock::new(HashMap::new())), clock }
    }

    /// Returns the number of stored keys, counting entries whose expiry has
    /// passed but which have not yet been purged.
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.len()
    }

    /// Returns `true` when the store holds no keys.
    pub async fn is_empty(&self) -> bool {
        let entries = self.entries.read().await;
        entries.is_empty()
    }
}

impl<C> Clone for MemoryStore<C>
where
    C: Clock + Clone,
{
    fn clone(&self) -> Self {
        // Clones share the same backing map
        Self { entries: Arc::clone(&self.entries), clock: self.clock.clone() }
    }
}

#[async_trait]
impl<C> KeyValueStore for MemoryStore<C>
where
    C: Clock,
{
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let now = self.clock.now();

        // Serve live entries under the read lock
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if entry.is_expired(now) => {}
                Some(entry) => match &entry.slot {
                    Slot::Bytes(bytes) => return Ok(Some(bytes.clone())),
                    Slot::List(_) => return Err(ScribeError::Protocol(WRONG_TYPE.to_string())),
                },
            }
        }

        // Expired: re-acquire as a writer to purge
        let mut entries = self.entries.write().await;
        purge_expired(&mut entries, key, now);
        Ok(None)
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut entries = self.entries.write().await;
        // A plain set discards any previous TTL
        entries.insert(key.to_string(), Entry { slot: Slot::Bytes(value), expires_at: None });
        Ok(())
    }

    async fn set_ex(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        let expires_at = self.clock.now() + ttl;
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            Entry { slot: Slot::Bytes(value), expires_at: Some(expires_at) },
        );
        Ok(())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;
        purge_expired(&mut entries, key, now);

        match entries.get_mut(key) {
            Some(entry) => {
                entry.expires_at = Some(now + ttl);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;
        purge_expired(&mut entries, key, now);

        match entries.get_mut(key) {
            None => {
                entries.insert(
                    key.to_string(),
                    Entry { slot: Slot::Bytes(b"1".to_vec()), expires_at: None },
                );
                Ok(1)
            }
            Some(entry) => match &mut entry.slot {
                Slot::Bytes(bytes) => {
                    let current = std::str::from_utf8(bytes)
                        .ok()
                        .and_then(|text| text.parse::<i64>().ok())
                        .ok_or_else(|| ScribeError::Protocol(NOT_AN_INTEGER.to_string()))?;
                    let next = current
                        .checked_add(1)
                        .ok_or_else(|| ScribeError::Protocol(NOT_AN_INTEGER.to_string()))?;
                    // The counter keeps its TTL across increments
                    *bytes = next.to_string().into_bytes();
                    Ok(next)
                }
                Slot::List(_) => Err(ScribeError::Protocol(WRONG_TYPE.to_string())),
            },
        }
    }

    async fn rpush(&self, key: &str, value: Vec<u8>) -> Result<u64> {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;
        purge_expired(&mut entries, key, now);

        match entries.get_mut(key) {
            None => {
                entries.insert(
                    key.to_string(),
                    Entry { slot: Slot::List(vec![value]), expires_at: None },
                );
                Ok(1)
            }
            Some(entry) => match &mut entry.slot {
                Slot::List(items) => {
                    items.push(value);
                    Ok(items.len() as u64)
                }
                Slot::Bytes(_) => Err(ScribeError::Protocol(WRONG_TYPE.to_string())),
            },
        }
    }

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>> {
        let now = self.clock.now();

        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(Vec::new()),
                Some(entry) if entry.is_expired(now) => {}
                Some(entry) => match &entry.slot {
                    Slot::List(items) => return Ok(slice_range(items, start, stop)),
                    Slot::Bytes(_) => return Err(ScribeError::Protocol(WRONG_TYPE.to_string())),
                },
            }
        }

        let mut entries = self.entries.write().await;
        purge_expired(&mut entries, key, now);
        Ok(Vec::new())
    }

    async fn flush_db(&self) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.clear();
        Ok(())
    }
}
