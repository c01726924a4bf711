use crate::clock::Clock;
use crate::document::document::DocumentMap;
use crate::memory_store::dash_map_store::DashMapMemoryStore;
use crate::memory_store::moka_store::MokaMemoryStore;
use crate::memory_store::StoreEngine;
use serde_derive::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub engine: StoreEngine,
}

impl StoreConfig {
    pub fn new(engine: StoreEngine) -> StoreConfig {
        StoreConfig { engine }
    }
}

pub struct StoreBuilder {}

impl StoreBuilder {
    pub fn from_config(
        config: &StoreConfig,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Arc<dyn DocumentMap + Send + Sync> {
        info!("Document store engine: {}", config.engine.as_str());
        match config.engine {
            StoreEngine::DashMap => Arc::new(DashMapMemoryStore::new(clock)),
            StoreEngine::Moka => Arc::new(MokaMemoryStore::new(clock)),
        }
    }
}
