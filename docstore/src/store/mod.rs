use crate::clock::{Clock, SystemClock};
use crate::codec::{Codec, JsonCodec};
use crate::document::document::{DocumentMap, Encoded, GetResult};
use crate::document::error::{Result, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

pub mod builder;

use builder::{StoreBuilder, StoreConfig};

/// Typed, versioned document store.
///
/// Values pass through a [`Codec`] on their way in and out; the underlying
/// [`DocumentMap`] only ever sees encoded payloads. Every mutation returns
/// the version the document holds afterwards, which callers hand back to
/// `replace`, `remove` and `touch` to prove they saw the latest state.
///
/// TTLs below 30 days (2,592,000 seconds) are relative to the store clock,
/// larger values are absolute Unix timestamps and 0 never expires. Expired
/// documents are evicted lazily by whichever operation finds them first.
#[derive(Clone)]
pub struct VersionedStore<C = JsonCodec> {
    documents: Arc<dyn DocumentMap + Send + Sync>,
    codec: C,
}

impl VersionedStore<JsonCodec> {
    /// JSON store on the default engine reading the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock::new()))
    }

    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self::from_config(&StoreConfig::default(), clock, JsonCodec)
    }
}

impl Default for VersionedStore<JsonCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Codec> VersionedStore<C> {
    pub fn from_config(config: &StoreConfig, clock: Arc<dyn Clock + Send + Sync>, codec: C) -> Self {
        Self::from_document_map(StoreBuilder::from_config(config, clock), codec)
    }

    pub fn from_document_map(documents: Arc<dyn DocumentMap + Send + Sync>, codec: C) -> Self {
        debug!("Creating versioned store");
        VersionedStore { documents, codec }
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Encoded {
        self.codec.encode(value).map_err(StoreError::Encode)
    }

    /// Creates a document, fails with `KeyExists` if a live one is present.
    /// Returns version 1.
    pub fn insert<T: Serialize + ?Sized>(&self, key: &str, value: &T, ttl: u32) -> Result<u64> {
        self.documents.insert(key, self.encode(value), ttl)
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<GetResult<T>> {
        let document = self.documents.get(key)?;
        let value = self
            .codec
            .decode(&document.payload)
            .map_err(StoreError::Decode)?;
        Ok(GetResult {
            version: document.version,
            value,
        })
    }

    /// Decodes the document into `out`, which is left untouched on error.
    pub fn get_into<T: DeserializeOwned>(&self, key: &str, out: &mut T) -> Result<u64> {
        let GetResult { version, value } = self.get(key)?;
        *out = value;
        Ok(version)
    }

    /// Last write wins. An existing document keeps its expiry, `ttl` only
    /// applies when the document gets created.
    pub fn upsert<T: Serialize + ?Sized>(&self, key: &str, value: &T, ttl: u32) -> Result<u64> {
        self.documents.upsert(key, self.encode(value), ttl)
    }

    pub fn replace<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        version: u64,
        ttl: u32,
    ) -> Result<u64> {
        self.documents.replace(key, self.encode(value), version, ttl)
    }

    /// Returns the version of the removed document
    pub fn remove(&self, key: &str, version: u64) -> Result<u64> {
        self.documents.remove(key, version)
    }

    // Bumps the version even though the value is unchanged.
    pub fn touch(&self, key: &str, version: u64, ttl: u32) -> Result<u64> {
        self.documents.touch(key, version, ttl)
    }

    pub fn is_key_not_found_error(&self, err: &StoreError) -> bool {
        err.is_key_not_found()
    }

    pub fn flush(&self) {
        self.documents.flush()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn evict_expired(&self) -> usize {
        self.documents.evict_expired()
    }
}

#[cfg(test)]
mod flush_tests;
#[cfg(test)]
mod remove_tests;
