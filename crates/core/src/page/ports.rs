//! Port interface for fetching remote pages
//!
//! This trait defines the boundary between the page cache and the HTTP
//! adapter in the infra crate.

use async_trait::async_trait;
use kvscribe_domain::Result;

/// Trait for fetching the body of a remote page
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the response body as text.
    ///
    /// Transport failure maps to
    /// [`ScribeError::Fetch`](kvscribe_domain::ScribeError::Fetch). The
    /// status code is not interpreted: the body text comes back for any
    /// status.
    async fn fetch(&self, url: &str) -> Result<String>;
}
