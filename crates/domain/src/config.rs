//! Configuration structures
//!
//! Typed configuration for the backing store connection and the page
//! fetcher. Values are loaded from environment variables by the infra
//! layer; every field has a default suitable for a local store instance.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COMMAND_TIMEOUT_MS, DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_FETCH_TIMEOUT_SECS,
    DEFAULT_PAGE_TTL_SECS, DEFAULT_STORE_HOST, DEFAULT_STORE_PORT,
};

/// Connection settings for the backing key-value store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Host name or address of the store.
    pub host: String,
    /// TCP port of the store.
    pub port: u16,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Per-command timeout in milliseconds.
    pub command_timeout_ms: u64,
}

impl StoreConfig {
    /// Socket address in `host:port` form.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Connect timeout as a [`Duration`].
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Per-command timeout as a [`Duration`].
    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_STORE_HOST.to_string(),
            port: DEFAULT_STORE_PORT,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            command_timeout_ms: DEFAULT_COMMAND_TIMEOUT_MS,
        }
    }
}

/// Settings for fetching and caching external pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Time-to-live for cached page content, in seconds.
    pub page_ttl_secs: u64,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
    /// User agent sent with page fetches.
    pub user_agent: String,
}

impl FetchConfig {
    /// Page TTL as a [`Duration`].
    pub fn page_ttl(&self) -> Duration {
        Duration::from_secs(self.page_ttl_secs)
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_ttl_secs: DEFAULT_PAGE_TTL_SECS,
            request_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            user_agent: format!("kvscribe/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backing store connection settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Page fetch settings.
    #[serde(default)]
    pub fetch: FetchConfig,
}
