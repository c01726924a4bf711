use super::command::Command;
use crate::codec::{Codec, JsonCodec};
use crate::document::error::StoreError;
use crate::store::VersionedStore;
use serde_json::Value;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Stored(u64),
    Value(u64, Value),
    Count(usize),
    Done,
    Error(String),
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Stored(version) => write!(f, "OK {}", version),
            Response::Value(version, value) => write!(f, "VALUE {} {}", version, value),
            Response::Count(count) => write!(f, "COUNT {}", count),
            Response::Done => write!(f, "OK"),
            Response::Error(message) => write!(f, "ERROR {}", message),
        }
    }
}

impl From<StoreError> for Response {
    fn from(err: StoreError) -> Self {
        match err.source() {
            Some(source) => Response::Error(format!("{}: {}", err, source)),
            None => Response::Error(err.to_string()),
        }
    }
}

/// Runs shell commands against a store holding JSON values
pub struct Session<C = JsonCodec> {
    store: VersionedStore<C>,
}

impl<C: Codec> Session<C> {
    pub fn new(store: VersionedStore<C>) -> Self {
        Session { store }
    }

    pub fn execute(&self, command: Command) -> Response {
        let result = match command {
            Command::Insert { key, ttl, value } => {
                self.store.insert(&key, &value, ttl).map(Response::Stored)
            }
            Command::Get { key } => self
                .store
                .get::<Value>(&key)
                .map(|found| Response::Value(found.version, found.value)),
            Command::Upsert { key, ttl, value } => {
                self.store.upsert(&key, &value, ttl).map(Response::Stored)
            }
            Command::Replace {
                key,
                version,
                ttl,
                value,
            } => self
                .store
                .replace(&key, &value, version, ttl)
                .map(Response::Stored),
            Command::Remove { key, version } => {
                self.store.remove(&key, version).map(Response::Stored)
            }
            Command::Touch { key, version, ttl } => {
                self.store.touch(&key, version, ttl).map(Response::Stored)
            }
            Command::Flush => {
                self.store.flush();
                Ok(Response::Done)
            }
            Command::Len => Ok(Response::Count(self.store.len())),
            Command::Evict => Ok(Response::Count(self.store.evict_expired())),
        };
        result.unwrap_or_else(Response::from)
    }

    /// Parses and runs one input line, blank lines yield no response
    pub fn handle_line(&self, line: &str) -> Option<Response> {
        if line.trim().is_empty() {
            return None;
        }
        let response = match line.parse::<Command>() {
            Ok(command) => {
                debug!("Executing: {:?}", command);
                self.execute(command)
            }
            Err(err) => Response::Error(err.to_string()),
        };
        Some(response)
    }
}
