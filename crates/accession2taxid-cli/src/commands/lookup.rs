//! `a2t lookup` command

use accession2taxid_common::{Accession2TaxidError, Result};
use accession2taxid_ingest::config::{RedisConfig, SqliteConfig};
use accession2taxid_ingest::sink::{RecordSink, RedisSink, SqliteSink};

/// Print the taxid stored in SQLite for `accession`
pub fn run_sqlite(accession: &str, store: &SqliteConfig) -> Result<()> {
    let db_path = store.db_path();
    // opening would create an empty store
    if !db_path.exists() {
        return Err(Accession2TaxidError::PathNotFound(db_path));
    }

    let mut sink = SqliteSink::open(store)?;
    print_taxid(&mut sink, accession)
}

/// Print the taxid stored in Redis for `accession`
pub fn run_redis(accession: &str, store: &RedisConfig) -> Result<()> {
    let mut sink = RedisSink::open(store)?;
    print_taxid(&mut sink, accession)
}

fn print_taxid<S: RecordSink>(sink: &mut S, accession: &str) -> Result<()> {
    match sink.lookup(accession)? {
        Some(taxid) => {
            println!("{}", taxid);
            Ok(())
        },
        None => Err(Accession2TaxidError::AccessionNotFound(accession.to_string())),
    }
}
