//! HTTP page fetching.

pub mod fetcher;

pub use fetcher::HttpPageFetcher;
