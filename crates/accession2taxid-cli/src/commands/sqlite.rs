//! `a2t sqlite` command

use accession2taxid_common::Result;
use accession2taxid_ingest::config::{ImportConfig, SqliteConfig};
use accession2taxid_ingest::pipeline::import_to_sqlite;
use std::path::Path;
use tracing::debug;

/// Import an accession2taxid file into the SQLite store
pub fn run(infile: &Path, store: &SqliteConfig, config: ImportConfig) -> Result<()> {
    debug!(db = %store.db_path().display(), "Importing into SQLite");

    let summary = import_to_sqlite(infile, store, config)?;
    println!("{}", summary.report());
    Ok(())
}
