//! Key-value store port and the in-memory reference backend.

pub mod memory;
pub mod ports;

pub use memory::MemoryStore;
pub use ports::KeyValueStore;
