//! accession2taxid Ingest Library
//!
//! Loads NCBI `*.accession2taxid` mapping files into SQLite or Redis for
//! accession → taxid lookup.
//!
//! # Pipeline
//!
//! - [`reader`]: opens plain or gzip input, drops the header, yields lines
//! - [`accession2taxid_common::RecordFormat`]: splits lines into records
//! - [`sink`]: SQLite (batched transactions) or Redis (one hash field per record)
//! - [`pipeline`]: drives the three and reports an [`ImportSummary`]
//!
//! # Example
//!
//! ```no_run
//! use accession2taxid_ingest::config::{ImportConfig, SqliteConfig};
//! use accession2taxid_ingest::pipeline::import_to_sqlite;
//! use std::path::Path;
//!
//! fn main() -> accession2taxid_common::Result<()> {
//!     let store = SqliteConfig::new()?;
//!     let summary = import_to_sqlite(
//!         Path::new("nucl_gb.accession2taxid.gz"),
//!         &store,
//!         ImportConfig::default(),
//!     )?;
//!     println!("{}", summary.report());
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod pipeline;
pub mod progress;
pub mod reader;
pub mod sink;

pub use config::{ImportConfig, MalformedLinePolicy, RedisConfig, SqliteConfig};
pub use pipeline::{import_to_redis, import_to_sqlite, ImportSummary, Importer};
pub use sink::{RecordSink, RedisSink, SqliteSink};
