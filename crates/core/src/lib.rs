//! # Kvscribe Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The key-value store port and its in-memory reference backend
//! - The instrumented cache with its call-tracking hooks
//! - The page cache and its fetcher port
//!
//! ## Architecture Principles
//! - Only depends on `kvscribe-domain`
//! - No network or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod cache;
pub mod page;
pub mod store;
pub mod time;

// Re-export specific items to avoid ambiguity
pub use cache::hooks::{CallCounter, CallHook, HistoryRecorder};
pub use cache::replay::ReplayReporter;
pub use cache::{InstrumentedCache, InstrumentedCacheBuilder};
pub use page::ports::PageFetcher;
pub use page::stats::FetchStats;
pub use page::PageCache;
pub use store::memory::MemoryStore;
pub use store::ports::KeyValueStore;
pub use time::{Clock, MockClock, SystemClock};
