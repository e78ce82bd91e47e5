//! `a2t redis` command

use accession2taxid_common::Result;
use accession2taxid_ingest::config::{ImportConfig, RedisConfig};
use accession2taxid_ingest::pipeline::import_to_redis;
use std::path::Path;
use tracing::debug;

/// Import an accession2taxid file into the Redis hash
pub fn run(infile: &Path, store: &RedisConfig, config: ImportConfig) -> Result<()> {
    debug!(url = %store.url, hash = %store.hash_key, "Importing into Redis");

    let summary = import_to_redis(infile, store, config)?;
    println!("{}", summary.report());
    Ok(())
}
