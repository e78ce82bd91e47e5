//! End-to-end tests for the `accession2taxid` command and the import functions
//!
//! Every test works in its own temporary directory; nothing touches
//! `~/.accession2taxid`.

use accession2taxid_common::Accession2TaxidError;
use accession2taxid_ingest::config::{ImportConfig, RedisConfig, SqliteConfig};
use accession2taxid_ingest::pipeline::{import_to_redis, import_to_sqlite};
use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;
use predicates::prelude::*;
use rusqlite::Connection;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SCENARIO: &str = "acc\ttaxid\nABC123\t9606\nXYZ789\t10090\n";

fn write_input(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).unwrap();
    path
}

fn rows(db_dir: &Path) -> Vec<(i64, String, String)> {
    let conn = Connection::open(db_dir.join("accession2taxid.db")).unwrap();
    let mut stmt = conn
        .prepare("SELECT id, accession, taxid FROM accession2taxid ORDER BY id")
        .unwrap();
    stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn command(db_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("accession2taxid").unwrap();
    cmd.arg("--db-dir").arg(db_dir);
    cmd
}

// ============================================================================
// Command Tests
// ============================================================================

#[test]
fn test_legacy_scenario() {
    let dir = TempDir::new().unwrap();
    let infile = write_input(&dir, "sample.accession2taxid", SCENARIO);
    let db_dir = dir.path().join("store");

    command(&db_dir)
        .arg("-i")
        .arg(&infile)
        .assert()
        .success()
        .stdout("2 accession2taxid saved.\n");

    assert_eq!(
        rows(&db_dir),
        vec![
            (1, "ABC123".to_string(), "9606".to_string()),
            (2, "XYZ789".to_string(), "10090".to_string()),
        ]
    );
}

#[test]
fn test_header_only_file() {
    let dir = TempDir::new().unwrap();
    let infile = write_input(&dir, "empty.accession2taxid", "accession\ttaxid\n");
    let db_dir = dir.path().join("store");

    command(&db_dir)
        .arg("--infile")
        .arg(&infile)
        .assert()
        .success()
        .stdout("0 accession2taxid saved.\n");

    assert!(rows(&db_dir).is_empty());
}

#[test]
fn test_missing_infile_is_rejected_before_import() {
    let dir = TempDir::new().unwrap();
    let db_dir = dir.path().join("store");

    command(&db_dir)
        .arg("-i")
        .arg(dir.path().join("nope.accession2taxid"))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Path not found"));

    assert!(!db_dir.exists());
}

#[test]
fn test_malformed_line_aborts_and_keeps_committed_batches() {
    let dir = TempDir::new().unwrap();
    let infile = write_input(
        &dir,
        "bad.accession2taxid",
        "accession\ttaxid\nA\t1\nB\t2\nC\tC.1\t3\nD\t4\n",
    );
    let db_dir = dir.path().join("store");

    command(&db_dir)
        .arg("-i")
        .arg(&infile)
        .arg("--batch-size")
        .arg("1")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Malformed line 4"));

    let accessions: Vec<String> = rows(&db_dir).into_iter().map(|(_, acc, _)| acc).collect();
    assert_eq!(accessions, vec!["A".to_string(), "B".to_string()]);
}

#[test]
fn test_skip_malformed_continues() {
    let dir = TempDir::new().unwrap();
    let infile = write_input(
        &dir,
        "bad.accession2taxid",
        "accession\ttaxid\nA\t1\nC\tC.1\t3\nD\t4\n",
    );
    let db_dir = dir.path().join("store");

    command(&db_dir)
        .arg("-i")
        .arg(&infile)
        .arg("--skip-malformed")
        .assert()
        .success()
        .stdout("2 accession2taxid saved.\n");

    assert_eq!(rows(&db_dir).len(), 2);
}

#[test]
fn test_duplicate_accession_fails_with_constraint_error() {
    let dir = TempDir::new().unwrap();
    let infile = write_input(
        &dir,
        "dup.accession2taxid",
        "accession\ttaxid\nA\t1\nA\t2\n",
    );
    let db_dir = dir.path().join("store");

    command(&db_dir)
        .arg("-i")
        .arg(&infile)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Constraint violation on line 3"));

    assert!(rows(&db_dir).is_empty());
}

#[test]
fn test_db_dir_from_environment() {
    let dir = TempDir::new().unwrap();
    let infile = write_input(&dir, "sample.accession2taxid", SCENARIO);
    let db_dir = dir.path().join("from-env");

    Command::cargo_bin("accession2taxid")
        .unwrap()
        .env("ACCESSION2TAXID_DIR", &db_dir)
        .arg("-i")
        .arg(&infile)
        .assert()
        .success();

    assert_eq!(rows(&db_dir).len(), 2);
}

#[test]
fn test_extended_file_with_explicit_format() {
    let dir = TempDir::new().unwrap();
    let infile = write_input(
        &dir,
        "prot.accession2taxid",
        "accession\taccession.version\ttaxid\tgi\nA0A001\tA0A001.1\t9606\t11\nA0A002\tA0A002.3\t10090\t12\n",
    );
    let db_dir = dir.path().join("store");

    command(&db_dir)
        .arg("-i")
        .arg(&infile)
        .arg("--format")
        .arg("extended")
        .assert()
        .success()
        .stdout("2 accession2taxid saved.\n");

    let conn = Connection::open(db_dir.join("accession2taxid.db")).unwrap();
    let (version, gi): (String, String) = conn
        .query_row(
            "SELECT accession_version, gi FROM accession2taxid WHERE accession = 'A0A002'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(version, "A0A002.3");
    assert_eq!(gi, "12");
}

#[test]
fn test_failed_import_flushes_file_log() {
    let dir = TempDir::new().unwrap();
    let infile = write_input(
        &dir,
        "bad.accession2taxid",
        "accession\ttaxid\nA\t1\nB\tB.1\t2\n",
    );
    let log_dir = dir.path().join("logs");

    command(&dir.path().join("store"))
        .env_remove("RUST_LOG")
        .env("LOG_OUTPUT", "file")
        .env("LOG_DIR", &log_dir)
        .arg("-i")
        .arg(&infile)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Malformed line 3"));

    let logged: String = fs::read_dir(&log_dir)
        .unwrap()
        .map(|entry| fs::read_to_string(entry.unwrap().path()).unwrap())
        .collect();
    assert!(logged.contains("Import failed"), "log was: {logged:?}");
}

#[test]
fn test_invalid_log_environment_warns_and_continues() {
    let dir = TempDir::new().unwrap();
    let infile = write_input(&dir, "sample.accession2taxid", SCENARIO);

    command(&dir.path().join("store"))
        .env("LOG_LEVEL", "loudest")
        .arg("-i")
        .arg(&infile)
        .assert()
        .success()
        .stdout("2 accession2taxid saved.\n")
        .stderr(predicate::str::contains("Warning: ignoring logging environment"));
}

// ============================================================================
// Library Tests
// ============================================================================

#[test]
fn test_gzip_input_imports_like_plain_input() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nucl_wgs.accession2taxid.gz");
    let mut encoder = GzEncoder::new(fs::File::create(&path).unwrap(), Compression::fast());
    encoder.write_all(SCENARIO.as_bytes()).unwrap();
    encoder.finish().unwrap();

    let db_dir = dir.path().join("store");
    let summary =
        import_to_sqlite(&path, &SqliteConfig::in_dir(&db_dir), ImportConfig::default()).unwrap();

    assert_eq!(summary.written, 2);
    assert_eq!(rows(&db_dir).len(), 2);
}

#[test]
fn test_second_run_collides_on_row_ids() {
    let dir = TempDir::new().unwrap();
    let db_dir = dir.path().join("store");
    let store = SqliteConfig::in_dir(&db_dir);

    let first = write_input(&dir, "a.accession2taxid", "accession\ttaxid\nA\t1\n");
    import_to_sqlite(&first, &store, ImportConfig::default()).unwrap();

    // ids restart at 1, so a second file collides on the primary key
    let second = write_input(&dir, "b.accession2taxid", "accession\ttaxid\nB\t2\n");
    let err = import_to_sqlite(&second, &store, ImportConfig::default()).unwrap_err();
    assert!(matches!(err, Accession2TaxidError::Constraint { line: 2, .. }));
}

#[test]
fn test_redis_unreachable_is_service_unavailable() {
    let dir = TempDir::new().unwrap();
    let infile = write_input(&dir, "sample.accession2taxid", SCENARIO);
    let store = RedisConfig::new().with_url("redis://127.0.0.1:1/");

    let err = import_to_redis(&infile, &store, ImportConfig::default()).unwrap_err();
    assert!(
        matches!(err, Accession2TaxidError::ServiceUnavailable { .. }),
        "unexpected error: {err:?}"
    );
}
