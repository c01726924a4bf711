use super::error::Result;
use bytes::Bytes;

/// Document key type
pub type KeyType = String;

/// Codec-encoded document body
pub type PayloadType = Bytes;

/// Outcome of encoding a value, consumed by a backend at the point where
/// the operation reaches its encode step.
pub type Encoded = Result<PayloadType>;

/// Version and expiry stored together with a payload.
///
/// `version` starts at 1 and grows by one on every successful mutation.
/// `expires_at` is an absolute Unix timestamp in seconds; 0 or negative
/// means the document never expires.
#[derive(Clone, Debug)]
pub struct StoredDocument {
    pub(crate) version: u64,
    pub(crate) expires_at: i64,
    pub(crate) payload: PayloadType,
}

impl StoredDocument {
    pub fn new(payload: PayloadType, expires_at: i64) -> StoredDocument {
        StoredDocument {
            version: 1,
            expires_at,
            payload,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    pub fn payload(&self) -> &PayloadType {
        &self.payload
    }

    /// Replaces the payload and bumps the version, leaving expiry untouched.
    pub(crate) fn set(&mut self, payload: PayloadType) -> u64 {
        self.version += 1;
        self.payload = payload;
        self.version
    }

    /// Sets a new expiry and bumps the version.
    pub(crate) fn touch(&mut self, expires_at: i64) -> u64 {
        self.version += 1;
        self.expires_at = expires_at;
        self.version
    }

    pub fn len(&self) -> usize {
        std::mem::size_of::<StoredDocument>() + self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PartialEq for StoredDocument {
    fn eq(&self, other: &Self) -> bool {
        self.payload == other.payload
    }
}

/// Decoded value returned by a read together with its version
#[derive(Debug, Clone, PartialEq)]
pub struct GetResult<T> {
    pub version: u64,
    pub value: T,
}

// An abstraction over a versioned key <=> document map
pub trait DocumentMap {
    /// Returns the live document stored under a key.
    ///
    /// - if the key is absent NotFound (`KeyNotExist`) is returned
    /// - an expired document is evicted and reported as `KeyNotExist`
    fn get(&self, key: &str) -> Result<StoredDocument>;

    /// Stores a new document with version 1, failing with `KeyExists`
    /// if a live document is already stored under the key.
    fn insert(&self, key: &str, payload: Encoded, ttl: u32) -> Result<u64>;

    /// Overwrites the payload of a live document (version + 1, expiry kept)
    /// or behaves like `insert` when there is none. Never fails on CAS grounds.
    fn upsert(&self, key: &str, payload: Encoded, ttl: u32) -> Result<u64>;

    /// Replaces payload and expiry of a live document whose version equals
    /// `version`:
    ///
    /// - if the key is absent or expired `KeyNotExist` is returned
    /// - if versions differ `CasMismatch` is returned
    fn replace(&self, key: &str, payload: Encoded, version: u64, ttl: u32) -> Result<u64>;

    /// Deletes a live document whose version equals `version` and returns
    /// the deleted version.
    fn remove(&self, key: &str, version: u64) -> Result<u64>;

    /// Recomputes the expiry of a live document whose version equals
    /// `version`. The version is incremented.
    fn touch(&self, key: &str, version: u64, ttl: u32) -> Result<u64>;

    /// Removes all documents
    fn flush(&self);

    /// Number of stored entries, including expired ones not yet evicted
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evicts every expired document, returns how many were removed
    fn evict_expired(&self) -> usize;
}
