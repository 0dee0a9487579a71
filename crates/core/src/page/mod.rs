//! TTL page cache over a fetcher port.

pub mod ports;
pub mod service;
pub mod stats;

pub use service::PageCache;
pub use stats::FetchStats;
