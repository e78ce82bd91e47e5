//! Import configuration
//!
//! Store locations and batching knobs are explicit values with defaults
//! matching the NCBI-style setup: a SQLite file under `~/.accession2taxid`, a
//! local Redis on its default port, and commits every 100,000 rows.

use accession2taxid_common::{Accession2TaxidError, FormatSelection, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Defaults
// ============================================================================

/// Directory name created under the user's home directory
pub const DEFAULT_DIR_NAME: &str = ".accession2taxid";

/// SQLite database file name inside the data directory
pub const DEFAULT_DB_FILE: &str = "accession2taxid.db";

/// Redis endpoint used when none is given
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379/";

/// Name of the Redis hash holding accession → taxid fields
pub const DEFAULT_HASH_KEY: &str = "accession2taxid";

/// Rows per SQLite transaction
pub const DEFAULT_BATCH_SIZE: usize = 100_000;

/// Resolve the default data directory (`~/.accession2taxid`)
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_DIR_NAME))
        .ok_or_else(|| Accession2TaxidError::config("Could not determine home directory"))
}

/// Location of the SQLite store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqliteConfig {
    /// Directory holding the database; created on open if absent
    pub data_dir: PathBuf,

    pub db_file: String,
}

impl SqliteConfig {
    /// Config rooted at the user's default data directory
    pub fn new() -> Result<Self> {
        Ok(Self::in_dir(default_data_dir()?))
    }

    /// Config rooted at an explicit directory
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            db_file: DEFAULT_DB_FILE.to_string(),
        }
    }

    pub fn with_db_file(mut self, db_file: impl Into<String>) -> Self {
        self.db_file = db_file.into();
        self
    }

    /// Full path of the database file
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Location of the Redis store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedisConfig {
    pub url: String,

    pub hash_key: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REDIS_URL.to_string(),
            hash_key: DEFAULT_HASH_KEY.to_string(),
        }
    }
}

impl RedisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_hash_key(mut self, hash_key: impl Into<String>) -> Self {
        self.hash_key = hash_key.into();
        self
    }
}

/// What to do with a line that has the wrong number of fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLinePolicy {
    /// Stop the import with a format error
    #[default]
    Abort,
    /// Log a warning, count the line as skipped, keep going
    Skip,
}

/// Settings for one import run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Records per commit; the sink is also flushed once at end of input
    pub batch_size: usize,

    pub format: FormatSelection,

    pub on_malformed: MalformedLinePolicy,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            format: FormatSelection::Auto,
            on_malformed: MalformedLinePolicy::Abort,
        }
    }
}

impl ImportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_format(mut self, format: FormatSelection) -> Self {
        self.format = format;
        self
    }

    pub fn with_malformed_policy(mut self, policy: MalformedLinePolicy) -> Self {
        self.on_malformed = policy;
        self
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Accession2TaxidError::config("batch size must be at least 1"));
        }
        Ok(())
    }
}
