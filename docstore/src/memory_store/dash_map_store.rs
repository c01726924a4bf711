use crate::clock::Clock;
use crate::document::document::{DocumentMap, Encoded, KeyType, StoredDocument};
use crate::document::error::{Result, StoreError};
use crate::memory_store::shared_store_state::{is_expired, SharedStoreState};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

type Storage = DashMap<KeyType, StoredDocument>;

/// Document map sharded with dashmap. Every operation holds the shard lock
/// of its key from the expiry check until the write.
pub struct DashMapMemoryStore {
    memory: Storage,
    store_state: SharedStoreState,
}

impl DashMapMemoryStore {
    pub fn new(clock: Arc<dyn Clock + Send + Sync>) -> DashMapMemoryStore {
        let parallelism = std::thread::available_parallelism().map_or(1, usize::from);
        let shards = Self::get_number_of_shards(parallelism);
        debug!("Creating dashmap document store, number of shards: {}", shards);
        DashMapMemoryStore {
            memory: DashMap::with_shard_amount(shards),
            store_state: SharedStoreState::new(clock),
        }
    }

    // Number of shards is the square of the parallelism divided by 4,
    // rounded down to a power of 2 and never less than 2.
    fn get_number_of_shards(parallelism: usize) -> usize {
        let parallelism = parallelism.clamp(2, 192);

        let optimal_number_shards = parallelism.pow(2) / 4;
        if optimal_number_shards < 2 {
            return 2;
        }

        let closest_power_of_2 = optimal_number_shards.ilog2();
        let shards_power_of_2 = 2usize.pow(closest_power_of_2);
        info!("Available parallelism: {}", parallelism);
        info!("Optimal number of shards: {}", optimal_number_shards);

        shards_power_of_2.max(2)
    }
}

impl DocumentMap for DashMapMemoryStore {
    fn get(&self, key: &str) -> Result<StoredDocument> {
        match self.memory.entry(key.to_owned()) {
            Entry::Occupied(entry) => {
                if self.store_state.check_if_expired(key, entry.get()) {
                    entry.remove();
                    return Err(StoreError::KeyNotExist);
                }
                Ok(entry.get().clone())
            }
            Entry::Vacant(_) => Err(StoreError::KeyNotExist),
        }
    }

    fn insert(&self, key: &str, payload: Encoded, ttl: u32) -> Result<u64> {
        match self.memory.entry(key.to_owned()) {
            Entry::Occupied(mut entry) => {
                if !self.store_state.check_if_expired(key, entry.get()) {
                    return Err(StoreError::KeyExists);
                }
                let payload = match payload {
                    Ok(payload) => payload,
                    Err(err) => {
                        entry.remove();
                        return Err(err);
                    }
                };
                entry.insert(StoredDocument::new(payload, self.store_state.expires_at(ttl)));
                Ok(1)
            }
            Entry::Vacant(entry) => {
                let document = StoredDocument::new(payload?, self.store_state.expires_at(ttl));
                Ok(entry.insert(document).version)
            }
        }
    }

    fn upsert(&self, key: &str, payload: Encoded, ttl: u32) -> Result<u64> {
        let payload = payload?;
        match self.memory.entry(key.to_owned()) {
            Entry::Occupied(mut entry) => {
                if self.store_state.check_if_expired(key, entry.get()) {
                    entry.insert(StoredDocument::new(payload, self.store_state.expires_at(ttl)));
                    return Ok(1);
                }
                Ok(entry.get_mut().set(payload))
            }
            Entry::Vacant(entry) => {
                let document = StoredDocument::new(payload, self.store_state.expires_at(ttl));
                Ok(entry.insert(document).version)
            }
        }
    }

    fn replace(&self, key: &str, payload: Encoded, version: u64, ttl: u32) -> Result<u64> {
        match self.memory.entry(key.to_owned()) {
            Entry::Occupied(mut entry) => {
                if self.store_state.check_if_expired(key, entry.get()) {
                    entry.remove();
                    return Err(StoreError::KeyNotExist);
                }
                if self.store_state.reject_version(key, entry.get(), version) {
                    return Err(StoreError::CasMismatch);
                }
                let document = StoredDocument {
                    version: version + 1,
                    expires_at: self.store_state.expires_at(ttl),
                    payload: payload?,
                };
                entry.insert(document);
                Ok(version + 1)
            }
            Entry::Vacant(_) => Err(StoreError::KeyNotExist),
        }
    }

    fn remove(&self, key: &str, version: u64) -> Result<u64> {
        match self.memory.entry(key.to_owned()) {
            Entry::Occupied(entry) => {
                if self.store_state.check_if_expired(key, entry.get()) {
                    entry.remove();
                    return Err(StoreError::KeyNotExist);
                }
                if self.store_state.reject_version(key, entry.get(), version) {
                    return Err(StoreError::CasMismatch);
                }
                Ok(entry.remove().version)
            }
            Entry::Vacant(_) => Err(StoreError::KeyNotExist),
        }
    }

    fn touch(&self, key: &str, version: u64, ttl: u32) -> Result<u64> {
        match self.memory.entry(key.to_owned()) {
            Entry::Occupied(mut entry) => {
                if self.store_state.check_if_expired(key, entry.get()) {
                    entry.remove();
                    return Err(StoreError::KeyNotExist);
                }
                if self.store_state.reject_version(key, entry.get(), version) {
                    return Err(StoreError::CasMismatch);
                }
                let expires_at = self.store_state.expires_at(ttl);
                Ok(entry.get_mut().touch(expires_at))
            }
            Entry::Vacant(_) => Err(StoreError::KeyNotExist),
        }
    }

    fn flush(&self) {
        self.memory.clear();
    }

    fn len(&self) -> usize {
        self.memory.len()
    }

    fn evict_expired(&self) -> usize {
        let now = self.store_state.now();
        let mut evicted = 0;
        self.memory.retain(|key, document| {
            if is_expired(document.expires_at, now) {
                trace!("Evicting expired document: {}", key);
                evicted += 1;
                return false;
            }
            true
        });
        evicted
    }
}
