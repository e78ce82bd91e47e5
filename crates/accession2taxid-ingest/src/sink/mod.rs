//! Destination stores for parsed records
//!
//! Each sink owns its connection for the duration of one import and releases
//! it when dropped, on success and on every error path.

pub mod redis;
pub mod sqlite;

pub use self::redis::{HashStore, MemoryHashStore, RedisSink};
pub use self::sqlite::SqliteSink;

use accession2taxid_common::{AccessionRecord, Result};

/// A store that persists accession records
pub trait RecordSink {
    /// Stage one record
    ///
    /// `sequence_id` is the 1-based position of the record among those written
    /// in this import. `line` is the input line it came from, for errors.
    fn write(&mut self, record: &AccessionRecord, sequence_id: u64, line: u64) -> Result<()>;

    /// Make every staged record durable. Flushing with nothing staged is a no-op.
    fn flush(&mut self) -> Result<()>;

    /// Look up the taxid stored for an accession
    fn lookup(&mut self, accession: &str) -> Result<Option<String>>;

    /// Number of accessions currently stored
    fn count(&mut self) -> Result<u64>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}
