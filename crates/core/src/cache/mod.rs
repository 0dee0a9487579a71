//! Instrumented cache: tracked writes, call counting, history replay.

pub mod hooks;
pub mod replay;
pub mod service;

pub use replay::ReplayReporter;
pub use service::{InstrumentedCache, InstrumentedCacheBuilder};
