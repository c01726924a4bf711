use std::mem;
use thiserror::Error;

/// Error produced by a [`Codec`](crate::codec::Codec), carried verbatim.
pub type CodecError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document key exists")]
    KeyExists,
    #[error("document key does not exist")]
    KeyNotExist,
    #[error("cas mismatch")]
    CasMismatch,
    #[error("encode error")]
    Encode(#[source] CodecError),
    #[error("decode error")]
    Decode(#[source] CodecError),
}

impl StoreError {
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, StoreError::KeyNotExist)
    }
}

/// Errors compare by kind, codec errors included.
impl PartialEq for StoreError {
    fn eq(&self, other: &Self) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }
}

impl Eq for StoreError {}

pub fn is_key_not_found_error(err: &StoreError) -> bool {
    err.is_key_not_found()
}

pub type Result<T> = std::result::Result<T, StoreError>;
