//! End-to-end tests for the `a2t` command
//!
//! Redis-backed runs only exercise the unreachable-server path; no test
//! assumes a local redis-server.

use assert_cmd::Command;
use predicates::prelude::*;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const EXTENDED: &str = "accession\taccession.version\ttaxid\tgi\n\
                        NP_000001\tNP_000001.2\t9606\t4501841\n\
                        NP_000002\tNP_000002.1\t10090\t4501842\n";

fn write_input(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("prot.accession2taxid");
    fs::write(&path, body).unwrap();
    path
}

fn a2t(db_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("a2t").unwrap();
    cmd.env("ACCESSION2TAXID_DIR", db_dir);
    cmd
}

#[test]
fn test_sqlite_import_detects_extended_format() {
    let dir = TempDir::new().unwrap();
    let infile = write_input(&dir, EXTENDED);
    let db_dir = dir.path().join("store");

    a2t(&db_dir)
        .args(["sqlite", "-i"])
        .arg(&infile)
        .assert()
        .success()
        .stdout("2 accession2taxid saved.\n");

    let conn = Connection::open(db_dir.join("accession2taxid.db")).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM accession2taxid WHERE gi IS NOT NULL", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(count, 2);
}

#[test]
fn test_lookup_after_import() {
    let dir = TempDir::new().unwrap();
    let infile = write_input(&dir, EXTENDED);
    let db_dir = dir.path().join("store");

    a2t(&db_dir).args(["sqlite", "-i"]).arg(&infile).assert().success();

    a2t(&db_dir)
        .args(["lookup", "NP_000002"])
        .assert()
        .success()
        .stdout("10090\n");

    a2t(&db_dir)
        .args(["lookup", "NP_999999"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Accession not found: 'NP_999999'"));
}

#[test]
fn test_lookup_without_store_fails() {
    let dir = TempDir::new().unwrap();
    let db_dir = dir.path().join("never-created");

    a2t(&db_dir)
        .args(["lookup", "NP_000001"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Path not found"));

    assert!(!db_dir.exists());
}

#[test]
fn test_failed_command_flushes_file_log() {
    let dir = TempDir::new().unwrap();
    let log_dir = dir.path().join("logs");

    a2t(&dir.path().join("never-created"))
        .env_remove("RUST_LOG")
        .env("LOG_OUTPUT", "file")
        .env("LOG_DIR", &log_dir)
        .args(["lookup", "NP_000001"])
        .assert()
        .failure()
        .code(1);

    let logged: String = fs::read_dir(&log_dir)
        .unwrap()
        .map(|entry| fs::read_to_string(entry.unwrap().path()).unwrap())
        .collect();
    assert!(logged.contains("Command failed"), "log was: {logged:?}");
}

#[test]
fn test_redis_unreachable_server() {
    let dir = TempDir::new().unwrap();
    let infile = write_input(&dir, EXTENDED);

    Command::cargo_bin("a2t")
        .unwrap()
        .args(["redis", "--redis-url", "redis://127.0.0.1:1/", "-i"])
        .arg(&infile)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Redis server is not available"));
}

#[test]
fn test_missing_infile() {
    let dir = TempDir::new().unwrap();

    a2t(dir.path())
        .args(["sqlite", "-i"])
        .arg(dir.path().join("missing.accession2taxid"))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Path not found"));
}

#[test]
fn test_subcommand_required() {
    Command::cargo_bin("a2t")
        .unwrap()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("A subcommand is required"));
}

#[test]
fn test_markdown_help_lists_commands() {
    Command::cargo_bin("a2t")
        .unwrap()
        .arg("--markdown-help")
        .assert()
        .success()
        .stdout(predicate::str::contains("a2t sqlite"))
        .stdout(predicate::str::contains("a2t lookup"));
}
