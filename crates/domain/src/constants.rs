//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Backing store connection defaults
pub const DEFAULT_STORE_HOST: &str = "127.0.0.1";
pub const DEFAULT_STORE_PORT: u16 = 6379;
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_COMMAND_TIMEOUT_MS: u64 = 5_000;

// Page cache defaults
pub const DEFAULT_PAGE_TTL_SECS: u64 = 10;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Fully-qualified name of the tracked store operation.
pub const STORE_OP: &str = "cache.store";

// Key scheme for call history lists
pub const INPUTS_SUFFIX: &str = ":inputs";
pub const OUTPUTS_SUFFIX: &str = ":outputs";

// Key scheme for the page cache
pub const PAGE_CONTENT_PREFIX: &str = "cached:";
pub const PAGE_COUNT_PREFIX: &str = "count:";
