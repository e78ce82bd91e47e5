//! Error types for accession2taxid
//!
//! Every variant is fatal to an import. Messages are user-facing and carry the
//! input line number where one applies.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for accession2taxid operations
pub type Result<T> = std::result::Result<T, Accession2TaxidError>;

/// Main error type for accession2taxid
#[derive(Error, Debug)]
pub enum Accession2TaxidError {
    /// Input file does not exist
    #[error("Path not found: '{}'. Verify the file path exists and you have read permissions.", .0.display())]
    PathNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A line did not split into the number of fields the active format expects
    #[error("Malformed line {line}: expected {expected} tab-separated fields, got {actual}")]
    Format {
        line: u64,
        expected: usize,
        actual: usize,
    },

    /// The header under automatic format detection matched no known layout
    #[error("Unrecognized header on line 1: expected 2 (legacy) or 4 (extended) tab-separated columns, got {0}")]
    UnknownHeader(usize),

    /// Duplicate value for a unique column in the relational store
    #[error("Constraint violation on line {line}: {message}. Row id, accession, accession.version and gi must be unique in the store.")]
    Constraint { line: u64, message: String },

    /// Key-value server unreachable when opening the sink
    #[error("Redis server is not available at {url} ({reason}). Start it first, e.g. 'redis-server', then rerun the import.")]
    ServiceUnavailable { url: String, reason: String },

    /// Lookup of an accession the store does not hold
    #[error("Accession not found: '{0}'")]
    AccessionNotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Key-value store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Accession2TaxidError {
    /// Create a format error for a line with the wrong number of fields
    pub fn format(line: u64, expected: usize, actual: usize) -> Self {
        Self::Format {
            line,
            expected,
            actual,
        }
    }

    /// Create a constraint violation error
    pub fn constraint(line: u64, message: impl Into<String>) -> Self {
        Self::Constraint {
            line,
            message: message.into(),
        }
    }

    /// Create a service unavailable error
    pub fn service_unavailable(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
