use crate::clock::ManualClock;
use crate::codec::JsonCodec;
use crate::memory_store::StoreEngine;
use crate::store::builder::StoreConfig;
use crate::store::VersionedStore;
use std::sync::Arc;

/// Fixed starting point of every mock clock
pub const NOW: i64 = 1_700_000_000;

pub struct MockStore {
    pub clock: Arc<ManualClock>,
    pub storage: VersionedStore<JsonCodec>,
}

impl MockStore {
    pub fn new(engine: StoreEngine) -> Self {
        let clock = Arc::new(ManualClock::new(NOW));
        let storage = VersionedStore::from_config(&StoreConfig::new(engine), clock.clone(), JsonCodec);
        MockStore { clock, storage }
    }
}

pub fn create_dash_map_store() -> MockStore {
    MockStore::new(StoreEngine::DashMap)
}

pub fn create_moka_store() -> MockStore {
    MockStore::new(StoreEngine::Moka)
}
