//! Domain types and models

pub mod record;
pub mod value;

pub use record::{CallRecord, ReplayReport};
pub use value::CacheValue;
