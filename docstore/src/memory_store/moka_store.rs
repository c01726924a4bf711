use crate::clock::Clock;
use crate::document::document::{DocumentMap, Encoded, KeyType, StoredDocument};
use crate::document::error::{Result, StoreError};
use crate::memory_store::shared_store_state::{is_expired, SharedStoreState};
use moka::ops::compute::Op;
use moka::sync::Cache as MokaCache;
use std::sync::Arc;

type MokaStorage = MokaCache<KeyType, StoredDocument>;

/// Document map backed by an unbounded moka cache. Documents only leave it
/// through `remove`, `flush` or expiry.
pub struct MokaMemoryStore {
    memory: MokaStorage,
    store_state: SharedStoreState,
}

impl MokaMemoryStore {
    pub fn new(clock: Arc<dyn Clock + Send + Sync>) -> MokaMemoryStore {
        debug!("Creating moka document store");
        MokaMemoryStore {
            memory: MokaCache::builder().build(),
            store_state: SharedStoreState::new(clock),
        }
    }

    /// Runs the shared lookup steps of every CAS-gated write: evicts an
    /// expired document and rejects a version mismatch. Returns the live
    /// document or the operation result with the op to apply.
    fn live_document(
        &self,
        key: &str,
        maybe_entry: Option<moka::Entry<KeyType, StoredDocument>>,
        version: u64,
    ) -> std::result::Result<StoredDocument, (StoreError, Op<StoredDocument>)> {
        match maybe_entry {
            Some(entry) => {
                let document = entry.into_value();
                if self.store_state.check_if_expired(key, &document) {
                    return Err((StoreError::KeyNotExist, Op::Remove));
                }
                if self.store_state.reject_version(key, &document, version) {
                    return Err((StoreError::CasMismatch, Op::Nop));
                }
                Ok(document)
            }
            None => Err((StoreError::KeyNotExist, Op::Nop)),
        }
    }
}

impl DocumentMap for MokaMemoryStore {
    fn get(&self, key: &str) -> Result<StoredDocument> {
        let mut result = Err(StoreError::KeyNotExist);
        let _entry = self
            .memory
            .entry(key.to_owned())
            .and_compute_with(|maybe_entry| match maybe_entry {
                Some(entry) => {
                    if self.store_state.check_if_expired(key, entry.value()) {
                        return Op::Remove;
                    }
                    result = Ok(entry.into_value());
                    Op::Nop
                }
                None => Op::Nop,
            });
        result
    }

    fn insert(&self, key: &str, payload: Encoded, ttl: u32) -> Result<u64> {
        let mut result = Err(StoreError::KeyExists);
        let _entry = self
            .memory
            .entry(key.to_owned())
            .and_compute_with(|maybe_entry| {
                let mut stale = false;
                if let Some(entry) = maybe_entry {
                    if !self.store_state.check_if_expired(key, entry.value()) {
                        return Op::Nop;
                    }
                    stale = true;
                }
                match payload {
                    Ok(payload) => {
                        let document =
                            StoredDocument::new(payload, self.store_state.expires_at(ttl));
                        result = Ok(document.version);
                        Op::Put(document)
                    }
                    Err(err) => {
                        result = Err(err);
                        if stale {
                            return Op::Remove;
                        }
                        Op::Nop
                    }
                }
            });
        result
    }

    fn upsert(&self, key: &str, payload: Encoded, ttl: u32) -> Result<u64> {
        let payload = payload?;
        let mut version = 1;
        let _entry = self
            .memory
            .entry(key.to_owned())
            .and_compute_with(|maybe_entry| {
                if let Some(entry) = maybe_entry {
                    let mut document = entry.into_value();
                    if !self.store_state.check_if_expired(key, &document) {
                        version = document.set(payload);
                        return Op::Put(document);
                    }
                }
                Op::Put(StoredDocument::new(payload, self.store_state.expires_at(ttl)))
            });
        Ok(version)
    }

    fn replace(&self, key: &str, payload: Encoded, version: u64, ttl: u32) -> Result<u64> {
        let mut result = Err(StoreError::KeyNotExist);
        let _entry = self
            .memory
            .entry(key.to_owned())
            .and_compute_with(|maybe_entry| {
                if let Err((err, op)) = self.live_document(key, maybe_entry, version) {
                    result = Err(err);
                    return op;
                }
                match payload {
                    Ok(payload) => {
                        result = Ok(version + 1);
                        Op::Put(StoredDocument {
                            version: version + 1,
                            expires_at: self.store_state.expires_at(ttl),
                            payload,
                        })
                    }
                    Err(err) => {
                        result = Err(err);
                        Op::Nop
                    }
                }
            });
        result
    }

    fn remove(&self, key: &str, version: u64) -> Result<u64> {
        let mut result = Err(StoreError::KeyNotExist);
        let _entry = self
            .memory
            .entry(key.to_owned())
            .and_compute_with(|maybe_entry| {
                match self.live_document(key, maybe_entry, version) {
                    Ok(document) => {
                        result = Ok(document.version);
                        Op::Remove
                    }
                    Err((err, op)) => {
                        result = Err(err);
                        op
                    }
                }
            });
        result
    }

    fn touch(&self, key: &str, version: u64, ttl: u32) -> Result<u64> {
        let mut result = Err(StoreError::KeyNotExist);
        let _entry = self
            .memory
            .entry(key.to_owned())
            .and_compute_with(|maybe_entry| {
                match self.live_document(key, maybe_entry, version) {
                    Ok(mut document) => {
                        result = Ok(document.touch(self.store_state.expires_at(ttl)));
                        Op::Put(document)
                    }
                    Err((err, op)) => {
                        result = Err(err);
                        op
                    }
                }
            });
        result
    }

    fn flush(&self) {
        self.memory.invalidate_all();
        self.memory.run_pending_tasks();
    }

    fn len(&self) -> usize {
        self.memory.run_pending_tasks();
        self.memory.entry_count() as usize
    }

    fn evict_expired(&self) -> usize {
        let now = self.store_state.now();
        let expired: Vec<Arc<KeyType>> = self
            .memory
            .iter()
            .filter(|(_key, document)| is_expired(document.expires_at, now))
            .map(|(key, _document)| key)
            .collect();

        let mut evicted = 0;
        for key in expired {
            let _entry = self
                .memory
                .entry(KeyType::clone(&key))
                .and_compute_with(|maybe_entry| match maybe_entry {
                    Some(entry) if is_expired(entry.value().expires_at, now) => {
                        trace!("Evicting expired document: {}", key);
                        evicted += 1;
                        Op::Remove
                    }
                    _ => Op::Nop,
                });
        }
        self.memory.run_pending_tasks();
        evicted
    }
}
