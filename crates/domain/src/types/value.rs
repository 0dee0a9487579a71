//! Values accepted by the instrumented cache.

use serde::{Deserialize, Serialize};

/// A value that can be stored in the backing store.
///
/// Text and raw bytes are written verbatim; integers and floats are written
/// as their decimal string, matching how the backing store itself represents
/// numbers. The original value is therefore recoverable from the stored
/// payload with the matching conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheValue {
    /// UTF-8 text.
    Text(String),
    /// Opaque byte blob.
    Bytes(Vec<u8>),
    /// Signed integer, stored as its decimal string.
    Int(i64),
    /// Floating point number, stored as its decimal string.
    Float(f64),
}

impl CacheValue {
    /// The byte payload written to the backing store.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.into_bytes(),
            Self::Bytes(bytes) => bytes,
            Self::Int(value) => value.to_string().into_bytes(),
            Self::Float(value) => value.to_string().into_bytes(),
        }
    }

    /// Stable string representation used for call-history input records.
    ///
    /// Deterministic for a given value: text renders quoted, bytes render as
    /// a byte-string literal with non-printable bytes escaped, numbers render
    /// as their decimal form.
    pub fn repr(&self) -> String {
        match self {
            Self::Text(text) => format!("{text:?}"),
            Self::Bytes(bytes) => format!("b\"{}\"", bytes.escape_ascii()),
            Self::Int(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
        }
    }
}

impl From<&str> for CacheValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CacheValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<u8>> for CacheValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<&[u8]> for CacheValue {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<i64> for CacheValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for CacheValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}
