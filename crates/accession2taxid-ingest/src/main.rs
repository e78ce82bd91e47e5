//! accession2taxid - save an NCBI accession2taxid file to SQLite

use accession2taxid_common::logging::{init_logging, LogConfig};
use accession2taxid_common::FormatSelection;
use accession2taxid_ingest::config::{
    ImportConfig, MalformedLinePolicy, SqliteConfig, DEFAULT_BATCH_SIZE,
};
use accession2taxid_ingest::pipeline::import_to_sqlite;
use accession2taxid_ingest::reader::existing_path;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "accession2taxid")]
#[command(author, version, about = "Saving to SQLite")]
struct Cli {
    /// The accession2taxid file downloaded from the NCBI FTP site
    #[arg(short, long, value_parser = existing_path)]
    infile: PathBuf,

    /// Column layout of the input: auto, legacy or extended
    #[arg(long, default_value = "legacy")]
    format: FormatSelection,

    /// Directory holding accession2taxid.db (defaults to ~/.accession2taxid)
    #[arg(long, env = "ACCESSION2TAXID_DIR")]
    db_dir: Option<PathBuf>,

    /// Rows per committed transaction
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Log and skip lines with the wrong number of fields instead of aborting
    #[arg(long)]
    skip_malformed: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let base = LogConfig::for_cli(cli.verbose, "accession2taxid");
    let log_config = LogConfig::from_env_or(base.clone()).unwrap_or_else(|e| {
        eprintln!("Warning: ignoring logging environment: {:#}", e);
        base
    });
    // the import works without logging
    let guard = init_logging(&log_config).ok().flatten();

    if let Err(e) = run(&cli) {
        error!(error = %e, "Import failed");
        eprintln!("Error: {}", e);
        // process::exit skips destructors; flush the file writer first
        drop(guard);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> accession2taxid_common::Result<()> {
    let store = match cli.db_dir {
        Some(ref dir) => SqliteConfig::in_dir(dir),
        None => SqliteConfig::new()?,
    };

    let config = ImportConfig::new()
        .with_batch_size(cli.batch_size)
        .with_format(cli.format)
        .with_malformed_policy(if cli.skip_malformed {
            MalformedLinePolicy::Skip
        } else {
            MalformedLinePolicy::Abort
        });

    let summary = import_to_sqlite(&cli.infile, &store, config)?;
    println!("{}", summary.report());
    Ok(())
}
