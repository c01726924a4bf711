use crate::clock::Clock;
use crate::document::document::StoredDocument;
use std::sync::Arc;

/// Seconds in 30 days. A TTL below this is relative to now, anything at or
/// above it is an absolute Unix timestamp.
pub const THIRTY_DAYS_IN_SECONDS: u32 = 2_592_000;

/// Computes the absolute expiry for a raw TTL observed at `now`.
pub fn expiration_for(ttl: u32, now: i64) -> i64 {
    match ttl {
        0 => 0,
        relative if relative < THIRTY_DAYS_IN_SECONDS => now + i64::from(relative),
        absolute => i64::from(absolute),
    }
}

#[inline]
pub fn is_expired(expires_at: i64, now: i64) -> bool {
    expires_at > 0 && expires_at < now
}

pub struct SharedStoreState {
    clock: Arc<dyn Clock + Send + Sync>,
}

impl SharedStoreState {
    pub fn new(clock: Arc<dyn Clock + Send + Sync>) -> SharedStoreState {
        SharedStoreState { clock }
    }

    #[inline]
    pub fn cas_mismatch(document: &StoredDocument, version: u64) -> bool {
        document.version != version
    }

    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    pub fn expires_at(&self, ttl: u32) -> i64 {
        expiration_for(ttl, self.now())
    }

    pub fn check_if_expired(&self, key: &str, document: &StoredDocument) -> bool {
        let expired = is_expired(document.expires_at, self.now());
        if expired {
            trace!("Evicting expired document: {}", key);
        }
        expired
    }

    pub fn reject_version(&self, key: &str, document: &StoredDocument, version: u64) -> bool {
        let mismatch = Self::cas_mismatch(document, version);
        if mismatch {
            trace!(
                "Cas mismatch for {}: stored {}, requested {}",
                key,
                document.version,
                version
            );
        }
        mismatch
    }
}
