//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for kvscribe
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ScribeError {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for kvscribe operations
pub type Result<T> = std::result::Result<T, ScribeError>;
