use crate::document::error::CodecError;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Turns typed values into document payloads and back
pub trait Codec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Bytes, CodecError>;
    fn decode<T: DeserializeOwned>(&self, payload: &[u8]) -> Result<T, CodecError>;
}

/// Stores values as JSON text
#[derive(Default, Debug, Clone, Copy)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Bytes, CodecError> {
        let payload = serde_json::to_vec(value)?;
        Ok(Bytes::from(payload))
    }

    fn decode<T: DeserializeOwned>(&self, payload: &[u8]) -> Result<T, CodecError> {
        Ok(serde_json::from_slice(payload)?)
    }
}
