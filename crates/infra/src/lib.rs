//! # Kvscribe Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The RESP wire client for the backing key-value store
//! - The reqwest-based page fetcher
//! - The environment configuration loader
//!
//! ## Architecture
//! - Implements traits defined in `kvscribe-core`
//! - Depends on `kvscribe-domain` and `kvscribe-core`
//! - Contains all "impure" code (network I/O)

pub mod config;
pub mod errors;
pub mod http;
pub mod resp;

// Re-export commonly used items
pub use errors::*;
pub use http::*;
pub use resp::{Command, RespStore, RespValue};
