//! Client for an external RESP2 key-value store.

pub mod codec;
pub mod connection;
pub mod store;

pub use codec::{Command, RespValue};
pub use connection::Connection;
pub use store::RespStore;
