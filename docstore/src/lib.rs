#[macro_use]
extern crate log;

pub mod clock;
pub mod codec;
pub mod document;
pub mod memory_store;
pub mod shell;
pub mod store;

#[cfg(test)]
mod mock;

pub use clock::{Clock, ManualClock, SetableClock, SystemClock};
pub use codec::{Codec, JsonCodec};
pub use document::document::GetResult;
pub use document::error::{is_key_not_found_error, Result, StoreError};
pub use store::builder::StoreConfig;
pub use store::VersionedStore;
