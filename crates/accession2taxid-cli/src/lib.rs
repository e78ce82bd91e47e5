//! accession2taxid CLI Library
//!
//! Grouped command-line interface for loading NCBI accession2taxid files:
//!
//! - **SQLite import**: `a2t sqlite -i <FILE>`
//! - **Redis import**: `a2t redis -i <FILE>`
//! - **Lookup**: `a2t lookup <ACCESSION> [--store sqlite|redis]`

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod commands;

use accession2taxid_common::{FormatSelection, Result};
use accession2taxid_ingest::config::{
    ImportConfig, MalformedLinePolicy, RedisConfig, SqliteConfig, DEFAULT_BATCH_SIZE,
    DEFAULT_HASH_KEY, DEFAULT_REDIS_URL,
};
use accession2taxid_ingest::reader::existing_path;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// a2t - load NCBI accession2taxid files into SQLite or Redis
#[derive(Parser, Debug)]
#[command(name = "a2t")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print the command reference as Markdown
    #[arg(long, hide = true)]
    pub markdown_help: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Saving to SQLite
    Sqlite {
        #[command(flatten)]
        import: ImportArgs,

        #[command(flatten)]
        store: SqliteArgs,
    },

    /// Saving to Redis
    Redis {
        #[command(flatten)]
        import: ImportArgs,

        #[command(flatten)]
        store: RedisArgs,
    },

    /// Print the taxid stored for an accession
    Lookup {
        /// Accession to look up (without version suffix)
        accession: String,

        /// Store to read from
        #[arg(long, value_enum, default_value_t = Store::Sqlite)]
        store: Store,

        #[command(flatten)]
        sqlite: SqliteArgs,

        #[command(flatten)]
        redis: RedisArgs,
    },
}

/// Backing store selector
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Store {
    Sqlite,
    Redis,
}

/// Options shared by the import subcommands
#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// The accession2taxid file downloaded from the NCBI FTP site (.gz accepted)
    #[arg(short, long, value_parser = existing_path)]
    pub infile: PathBuf,

    /// Column layout of the input: auto, legacy or extended
    #[arg(long, default_value = "auto")]
    pub format: FormatSelection,

    /// Records per committed batch (SQLite only)
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Log and skip lines with the wrong number of fields instead of aborting
    #[arg(long)]
    pub skip_malformed: bool,
}

impl ImportArgs {
    pub fn import_config(&self) -> ImportConfig {
        ImportConfig::new()
            .with_batch_size(self.batch_size)
            .with_format(self.format)
            .with_malformed_policy(if self.skip_malformed {
                MalformedLinePolicy::Skip
            } else {
                MalformedLinePolicy::Abort
            })
    }
}

/// SQLite store location
#[derive(Args, Debug, Clone)]
pub struct SqliteArgs {
    /// Directory holding accession2taxid.db (defaults to ~/.accession2taxid)
    #[arg(long, env = "ACCESSION2TAXID_DIR")]
    pub db_dir: Option<PathBuf>,
}

impl SqliteArgs {
    pub fn store_config(&self) -> Result<SqliteConfig> {
        match self.db_dir {
            Some(ref dir) => Ok(SqliteConfig::in_dir(dir)),
            None => SqliteConfig::new(),
        }
    }
}

/// Redis store location
#[derive(Args, Debug, Clone)]
pub struct RedisArgs {
    /// Redis server URL
    #[arg(long, env = "ACCESSION2TAXID_REDIS_URL", default_value = DEFAULT_REDIS_URL)]
    pub redis_url: String,

    /// Name of the hash holding accession fields
    #[arg(long, default_value = DEFAULT_HASH_KEY)]
    pub hash_key: String,
}

impl RedisArgs {
    pub fn store_config(&self) -> RedisConfig {
        RedisConfig::new()
            .with_url(&self.redis_url)
            .with_hash_key(&self.hash_key)
    }
}
