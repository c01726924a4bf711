use serde::ser::{Error, Serializer};
use serde_derive::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Profile {
    pub name: String,
    pub visits: u32,
}

impl Profile {
    pub fn new(name: &str, visits: u32) -> Profile {
        Profile {
            name: String::from(name),
            visits,
        }
    }
}

/// Value whose serialization always fails
pub struct Unserializable;

impl serde::Serialize for Unserializable {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(S::Error::custom("value cannot be encoded"))
    }
}
