use clap::ValueEnum;
use serde_derive::{Deserialize, Serialize};

pub mod dash_map_store;
pub mod moka_store;
pub mod shared_store_state;

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum StoreEngine {
    /// store based on dashmap library
    #[default]
    DashMap,
    /// store based on moka library
    Moka,
}

impl StoreEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreEngine::DashMap => "DashMap backend",
            StoreEngine::Moka => "Moka backend",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_engine_as_str() {
        assert_eq!(StoreEngine::DashMap.as_str(), "DashMap backend");
        assert_eq!(StoreEngine::Moka.as_str(), "Moka backend");
    }

    #[test]
    fn test_store_engine_value_enum() {
        assert_eq!(
            StoreEngine::from_str("dash-map", true).unwrap(),
            StoreEngine::DashMap
        );
        assert_eq!(StoreEngine::from_str("moka", true).unwrap(), StoreEngine::Moka);
    }

    #[test]
    fn test_store_engine_default() {
        assert_eq!(StoreEngine::default(), StoreEngine::DashMap);
    }
}
