//! a2t - Main entry point

use accession2taxid_cli::{Cli, Commands, Store};
use accession2taxid_common::logging::{init_logging, LogConfig};
use clap::Parser;
use std::process;
use tracing::error;

fn main() {
    let cli = Cli::parse();

    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    if cli.command.is_none() {
        eprintln!("Error: A subcommand is required");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    }

    // Environment variables take precedence over the verbose flag
    let base = LogConfig::for_cli(cli.verbose, "a2t");
    let log_config = LogConfig::from_env_or(base.clone()).unwrap_or_else(|e| {
        eprintln!("Warning: ignoring logging environment: {:#}", e);
        base
    });
    let guard = init_logging(&log_config).ok().flatten();

    if let Err(e) = execute_command(&cli) {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        // process::exit skips destructors; flush the file writer first
        drop(guard);
        process::exit(1);
    }
}

fn execute_command(cli: &Cli) -> accession2taxid_common::Result<()> {
    let Some(ref command) = cli.command else {
        unreachable!("Command should have been validated in main");
    };

    match command {
        Commands::Sqlite { import, store } => accession2taxid_cli::commands::sqlite::run(
            &import.infile,
            &store.store_config()?,
            import.import_config(),
        ),
        Commands::Redis { import, store } => accession2taxid_cli::commands::redis::run(
            &import.infile,
            &store.store_config(),
            import.import_config(),
        ),
        Commands::Lookup {
            accession,
            store,
            sqlite,
            redis,
        } => match store {
            Store::Sqlite => {
                accession2taxid_cli::commands::lookup::run_sqlite(accession, &sqlite.store_config()?)
            },
            Store::Redis => {
                accession2taxid_cli::commands::lookup::run_redis(accession, &redis.store_config())
            },
        },
    }
}
