//! Configuration loader
//!
//! Loads application configuration from environment variables.
//!
//! ## Environment Variables
//! - `KVSCRIBE_STORE_HOST`: Store host name or address
//! - `KVSCRIBE_STORE_PORT`: Store TCP port
//! - `KVSCRIBE_STORE_CONNECT_TIMEOUT_MS`: Connect timeout in milliseconds
//! - `KVSCRIBE_STORE_COMMAND_TIMEOUT_MS`: Per-command timeout in milliseconds
//! - `KVSCRIBE_PAGE_TTL_SECS`: Cached page lifetime in seconds
//! - `KVSCRIBE_FETCH_TIMEOUT_SECS`: HTTP request timeout in seconds
//!
//! Every variable is optional. Unset variables keep the defaults from
//! [`Config::default`]; set but malformed variables are an error.

use std::fmt::Display;
use std::str::FromStr;

use kvscribe_domain::{Config, FetchConfig, Result, ScribeError, StoreConfig};

/// Load configuration from the environment
///
/// # Errors
/// Returns `ScribeError::Config` if a variable is set to a value that
/// cannot be parsed.
pub fn load() -> Result<Config> {
    let config = load_from_env()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from environment variables on top of the defaults
///
/// # Environment Variables
/// See module documentation for the complete list.
///
/// # Errors
/// Returns `ScribeError::Config` if a variable is set but has an invalid
/// value.
pub fn load_from_env() -> Result<Config> {
    let defaults = Config::default();

    Ok(Config {
        store: StoreConfig {
            host: env_string("KVSCRIBE_STORE_HOST", defaults.store.host),
            port: env_parse("KVSCRIBE_STORE_PORT", defaults.store.port)?,
            connect_timeout_ms: env_parse(
                "KVSCRIBE_STORE_CONNECT_TIMEOUT_MS",
                defaults.store.connect_timeout_ms,
            )?,
            command_timeout_ms: env_parse(
                "KVSCRIBE_STORE_COMMAND_TIMEOUT_MS",
                defaults.store.command_timeout_ms,
            )?,
        },
        fetch: FetchConfig {
            page_ttl_secs: env_parse("KVSCRIBE_PAGE_TTL_SECS", defaults.fetch.page_ttl_secs)?,
            request_timeout_secs: env_parse(
                "KVSCRIBE_FETCH_TIMEOUT_SECS",
                defaults.fetch.request_timeout_secs,
            )?,
            user_agent: defaults.fetch.user_agent,
        },
    })
}

/// Get environment variable with a fallback
fn env_string(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

/// Parse environment variable with a fallback
///
/// # Errors
/// Returns `ScribeError::Config` if the variable is set but does not parse
/// as `T`.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| ScribeError::Config(format!("Invalid value for {}: {}", key, e))),
        Err(_) => Ok(default),
    }
}
