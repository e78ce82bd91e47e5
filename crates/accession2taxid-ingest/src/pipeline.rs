//! Import pipeline: line reader → record parser → sink
//!
//! One pipeline serves both record formats and both sinks. The sink is flushed
//! after every `batch_size` written records and once more at end of input.

use crate::config::{ImportConfig, MalformedLinePolicy, RedisConfig, SqliteConfig};
use crate::progress::create_import_spinner;
use crate::reader::{open_input, LineReader};
use crate::sink::{RecordSink, RedisSink, SqliteSink};
use accession2taxid_common::{Accession2TaxidError, RecordFormat, Result};
use indicatif::ProgressBar;
use serde::Serialize;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info, warn};

/// Outcome of a completed import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Records handed to the sink
    pub written: u64,
    /// Malformed lines passed over under [`MalformedLinePolicy::Skip`]
    pub skipped: u64,
    /// Flushes issued, including the final one
    pub commits: u64,
    pub format: RecordFormat,
}

impl ImportSummary {
    /// The line printed when an import finishes
    pub fn report(&self) -> String {
        format!("{} accession2taxid saved.", self.written)
    }
}

/// Drives one import run
pub struct Importer {
    config: ImportConfig,
    progress: Option<ProgressBar>,
}

impl Importer {
    pub fn new(config: ImportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            progress: None,
        })
    }

    /// Report written records on a progress bar
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Import the file at `path` into `sink`
    pub fn import_path<S: RecordSink>(&self, path: &Path, sink: &mut S) -> Result<ImportSummary> {
        info!(path = %path.display(), sink = sink.name(), "Starting import");
        self.import(open_input(path)?, sink)
    }

    /// Import from any buffered reader into `sink`
    ///
    /// The first error stops the run. Batches flushed before it stay in the
    /// store; nothing already written is undone.
    pub fn import<R: BufRead, S: RecordSink>(&self, input: R, sink: &mut S) -> Result<ImportSummary> {
        let lines = LineReader::new(input)?;
        let format = self.config.format.resolve(lines.header())?;
        debug!(%format, selection = %self.config.format, "Resolved record format");

        let batch_size = self.config.batch_size as u64;
        let mut summary = ImportSummary {
            written: 0,
            skipped: 0,
            commits: 0,
            format,
        };

        for line in lines {
            let line = line?;

            let record = match format.parse_line(&line.text, line.number) {
                Ok(record) => record,
                Err(e @ Accession2TaxidError::Format { .. })
                    if self.config.on_malformed == MalformedLinePolicy::Skip =>
                {
                    warn!(line = line.number, error = %e, "Skipping malformed line");
                    summary.skipped += 1;
                    continue;
                },
                Err(e) => return Err(e),
            };

            let sequence_id = summary.written + 1;
            sink.write(&record, sequence_id, line.number)?;
            summary.written = sequence_id;

            if let Some(ref progress) = self.progress {
                progress.inc(1);
            }

            if summary.written % batch_size == 0 {
                sink.flush()?;
                summary.commits += 1;
                debug!(written = summary.written, "Batch committed");
            }
        }

        sink.flush()?;
        summary.commits += 1;

        if let Some(ref progress) = self.progress {
            progress.finish_and_clear();
        }

        info!(
            written = summary.written,
            skipped = summary.skipped,
            commits = summary.commits,
            sink = sink.name(),
            "Import finished"
        );

        Ok(summary)
    }
}

fn spinner_for(path: &Path) -> ProgressBar {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    create_import_spinner(&format!("Importing {}", name))
}

/// Import a file into the SQLite store described by `store`
///
/// The connection lives only for this call and is released on every exit
/// path when the sink drops.
pub fn import_to_sqlite(
    path: &Path,
    store: &SqliteConfig,
    config: ImportConfig,
) -> Result<ImportSummary> {
    let importer = Importer::new(config)?;
    let mut sink = SqliteSink::open(store)?;
    importer
        .with_progress(spinner_for(path))
        .import_path(path, &mut sink)
}

/// Import a file into the Redis hash described by `store`
///
/// Fails with a service-unavailable error before reading any input when the
/// server does not answer.
pub fn import_to_redis(
    path: &Path,
    store: &RedisConfig,
    config: ImportConfig,
) -> Result<ImportSummary> {
    let importer = Importer::new(config)?;
    let mut sink = RedisSink::open(store)?;
    importer
        .with_progress(spinner_for(path))
        .import_path(path, &mut sink)
}
