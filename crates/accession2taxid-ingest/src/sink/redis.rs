//! Redis sink
//!
//! Every record becomes one field of a single hash: `HSET <hash_key>
//! <accession> <taxid>`. Redis makes each write durable on its own terms, so
//! there is no batching and `flush` does nothing. `accession_version` and `gi`
//! are not stored.

use super::RecordSink;
use crate::config::RedisConfig;
use accession2taxid_common::{Accession2TaxidError, AccessionRecord, Result};
use std::collections::HashMap;
use tracing::info;

/// The subset of hash commands the sink needs (dependency injection)
pub trait HashStore {
    /// Liveness check
    fn ping(&mut self) -> Result<()>;

    fn hset(&mut self, key: &str, field: &str, value: &str) -> Result<()>;

    fn hget(&mut self, key: &str, field: &str) -> Result<Option<String>>;

    fn hlen(&mut self, key: &str) -> Result<u64>;
}

fn store_error(err: redis::RedisError) -> Accession2TaxidError {
    Accession2TaxidError::store(err.to_string())
}

impl HashStore for redis::Connection {
    fn ping(&mut self) -> Result<()> {
        redis::cmd("PING")
            .query::<String>(self)
            .map(|_| ())
            .map_err(store_error)
    }

    fn hset(&mut self, key: &str, field: &str, value: &str) -> Result<()> {
        let _: () = redis::Commands::hset(self, key, field, value).map_err(store_error)?;
        Ok(())
    }

    fn hget(&mut self, key: &str, field: &str) -> Result<Option<String>> {
        redis::Commands::hget(self, key, field).map_err(store_error)
    }

    fn hlen(&mut self, key: &str) -> Result<u64> {
        redis::Commands::hlen(self, key).map_err(store_error)
    }
}

/// In-process stand-in for a Redis server
#[derive(Debug, Default)]
pub struct MemoryHashStore {
    hashes: HashMap<String, HashMap<String, String>>,
    down: bool,
}

impl MemoryHashStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose liveness check always fails
    pub fn unavailable() -> Self {
        Self {
            hashes: HashMap::new(),
            down: true,
        }
    }

    /// Total number of fields across all hashes
    pub fn field_count(&self) -> usize {
        self.hashes.values().map(HashMap::len).sum()
    }
}

impl HashStore for MemoryHashStore {
    fn ping(&mut self) -> Result<()> {
        if self.down {
            return Err(Accession2TaxidError::store("Connection refused"));
        }
        Ok(())
    }

    fn hset(&mut self, key: &str, field: &str, value: &str) -> Result<()> {
        self.hashes
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
        Ok(())
    }

    fn hget(&mut self, key: &str, field: &str) -> Result<Option<String>> {
        Ok(self
            .hashes
            .get(key)
            .and_then(|hash| hash.get(field))
            .cloned())
    }

    fn hlen(&mut self, key: &str) -> Result<u64> {
        Ok(self.hashes.get(key).map_or(0, |hash| hash.len() as u64))
    }
}

/// Key-value sink writing into one Redis hash
pub struct RedisSink<S: HashStore = redis::Connection> {
    store: S,
    hash_key: String,
}

impl RedisSink<redis::Connection> {
    /// Connect to the configured server and check it is alive
    pub fn open(config: &RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str()).map_err(|e| {
            Accession2TaxidError::config(format!("Invalid Redis URL '{}': {}", config.url, e))
        })?;

        let conn = client
            .get_connection()
            .map_err(|e| Accession2TaxidError::service_unavailable(&config.url, e.to_string()))?;

        let sink = Self::with_store(conn, config)?;
        info!(url = %config.url, hash_key = %config.hash_key, "Connected to Redis");
        Ok(sink)
    }
}

impl<S: HashStore> RedisSink<S> {
    /// Wrap an already-connected store, failing if it does not answer a ping
    pub fn with_store(mut store: S, config: &RedisConfig) -> Result<Self> {
        store
            .ping()
            .map_err(|e| Accession2TaxidError::service_unavailable(&config.url, e.to_string()))?;

        Ok(Self {
            store,
            hash_key: config.hash_key.clone(),
        })
    }

    pub fn hash_key(&self) -> &str {
        &self.hash_key
    }

    /// Give the underlying store back, ending the sink's ownership of it
    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: HashStore> RecordSink for RedisSink<S> {
    fn write(&mut self, record: &AccessionRecord, _sequence_id: u64, _line: u64) -> Result<()> {
        self.store
            .hset(&self.hash_key, &record.accession, &record.taxid)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn lookup(&mut self, accession: &str) -> Result<Option<String>> {
        self.store.hget(&self.hash_key, accession)
    }

    fn count(&mut self) -> Result<u64> {
        self.store.hlen(&self.hash_key)
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
