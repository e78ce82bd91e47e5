//! SQLite sink
//!
//! One table, `accession2taxid`, shared by both record formats. The
//! extended-only columns are nullable; SQLite lets any number of NULLs sit in
//! a UNIQUE column, so legacy rows never collide on them.

use super::RecordSink;
use crate::config::SqliteConfig;
use accession2taxid_common::{Accession2TaxidError, AccessionRecord, Result};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::path::PathBuf;
use tracing::{debug, info, warn};

const TABLE: &str = "accession2taxid";

const INSERT: &str = r#"
    INSERT INTO accession2taxid (id, accession, accession_version, taxid, gi)
    VALUES (?1, ?2, ?3, ?4, ?5)
"#;

/// Create the table and indexes if they do not exist yet
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS accession2taxid (
            id INTEGER PRIMARY KEY,
            accession TEXT NOT NULL UNIQUE,
            accession_version TEXT UNIQUE,
            taxid TEXT NOT NULL,
            gi TEXT UNIQUE
        );
        CREATE INDEX IF NOT EXISTS ix_accession2taxid_taxid ON accession2taxid(taxid);
        "#,
    )
    .map_err(|e| Accession2TaxidError::database(format!("Failed to create schema: {}", e)))
}

/// Relational sink backed by a SQLite file
///
/// Writes are staged in a transaction that is opened lazily and committed by
/// [`RecordSink::flush`]. Dropping the sink rolls back whatever is still
/// staged.
pub struct SqliteSink {
    conn: Connection,
    path: Option<PathBuf>,
    pending: u64,
}

impl SqliteSink {
    /// Open (and if needed create) the database described by `config`
    pub fn open(config: &SqliteConfig) -> Result<Self> {
        std::fs::create_dir_all(config.data_dir())?;

        let path = config.db_path();
        let conn = Connection::open(&path).map_err(|e| {
            Accession2TaxidError::database(format!(
                "Failed to open {}: {}",
                path.display(),
                e
            ))
        })?;
        init_schema(&conn)?;

        info!(path = %path.display(), "Opened SQLite store");

        Ok(Self {
            conn,
            path: Some(path),
            pending: 0,
        })
    }

    /// In-memory store (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            Accession2TaxidError::database(format!("Failed to create in-memory database: {}", e))
        })?;
        init_schema(&conn)?;

        Ok(Self {
            conn,
            path: None,
            pending: 0,
        })
    }

    /// Path of the database file, `None` when in memory
    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    /// Records staged since the last flush
    pub fn pending(&self) -> u64 {
        self.pending
    }

    fn begin_if_needed(&mut self) -> Result<()> {
        if self.conn.is_autocommit() {
            self.conn
                .execute_batch("BEGIN")
                .map_err(|e| Accession2TaxidError::database(format!("Failed to begin transaction: {}", e)))?;
        }
        Ok(())
    }

    fn rollback(&mut self) {
        if self.conn.is_autocommit() {
            return;
        }
        match self.conn.execute_batch("ROLLBACK") {
            Ok(()) => debug!(discarded = self.pending, "Rolled back pending batch"),
            Err(e) => warn!(error = %e, "Failed to roll back pending batch"),
        }
        self.pending = 0;
    }
}

fn insert_error(err: rusqlite::Error, line: u64) -> Accession2TaxidError {
    match err {
        rusqlite::Error::SqliteFailure(ref failure, ref message)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            let message = message.clone().unwrap_or_else(|| failure.to_string());
            Accession2TaxidError::constraint(line, message)
        },
        other => Accession2TaxidError::database(format!("Insert failed on line {}: {}", line, other)),
    }
}

impl RecordSink for SqliteSink {
    fn write(&mut self, record: &AccessionRecord, sequence_id: u64, line: u64) -> Result<()> {
        let id = i64::try_from(sequence_id).map_err(|_| {
            Accession2TaxidError::database(format!("Row id {} out of range", sequence_id))
        })?;

        self.begin_if_needed()?;

        let result = self
            .conn
            .prepare_cached(INSERT)
            .and_then(|mut stmt| {
                stmt.execute(params![
                    id,
                    record.accession,
                    record.accession_version,
                    record.taxid,
                    record.gi,
                ])
            });

        match result {
            Ok(_) => {
                self.pending += 1;
                Ok(())
            },
            Err(e) => {
                // a failed batch is never partially committed
                self.rollback();
                Err(insert_error(e, line))
            },
        }
    }

    fn flush(&mut self) -> Result<()> {
        if self.conn.is_autocommit() {
            return Ok(());
        }

        self.conn
            .execute_batch("COMMIT")
            .map_err(|e| Accession2TaxidError::database(format!("Commit failed: {}", e)))?;

        debug!(rows = self.pending, "Committed batch");
        self.pending = 0;
        Ok(())
    }

    fn lookup(&mut self, accession: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT taxid FROM accession2taxid WHERE accession = ?1",
                params![accession],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|e| Accession2TaxidError::database(format!("Lookup failed: {}", e)))
    }

    fn count(&mut self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", TABLE), [], |row| {
                row.get(0)
            })
            .map_err(|e| Accession2TaxidError::database(format!("Count failed: {}", e)))?;
        Ok(count.max(0) as u64)
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}

impl Drop for SqliteSink {
    fn drop(&mut self) {
        self.rollback();
    }
}
