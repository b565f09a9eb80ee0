use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/membership.json");

// ============================================================================
// Usage
// ============================================================================

#[test]
fn test_help_flag() {
    cargo_bin_cmd!("clientgen")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--file"))
        .stdout(predicate::str::contains("--collection-format"));
}

#[test]
fn test_missing_file_is_a_usage_error() {
    cargo_bin_cmd!("clientgen")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--file"));
}

#[test]
fn test_unknown_collection_format_is_rejected() {
    cargo_bin_cmd!("clientgen")
        .args(["-f", FIXTURE, "--collection-format", "pipes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pipes"));
}

// ============================================================================
// Generation
// ============================================================================

#[test]
fn test_generates_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("client.ts");

    cargo_bin_cmd!("clientgen")
        .args(["-f", FIXTURE, "-o"])
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Generated"))
        .stderr(predicate::str::contains("7 functions"));

    let code = fs::read_to_string(&output).unwrap();
    assert!(code.starts_with("// This code was automatically generated by clientgen."));
    assert!(code.contains("export function getCard("));
}

#[test]
fn test_default_output_path() {
    let temp_dir = TempDir::new().unwrap();

    cargo_bin_cmd!("clientgen")
        .current_dir(temp_dir.path())
        .args(["--file", FIXTURE])
        .assert()
        .success();

    assert!(temp_dir.path().join("output.ts").exists());
}

#[test]
fn test_dry_run_prints_code() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("client.ts");

    cargo_bin_cmd!("clientgen")
        .args(["-f", FIXTURE, "--dry-run", "--collection-format", "csv", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"= "csv";"#))
        .stdout(predicate::str::contains("export enum CardValidity"));

    assert!(!output.exists());
}

#[test]
fn test_envelope_flag() {
    cargo_bin_cmd!("clientgen")
        .args(["-f", FIXTURE, "--dry-run", "--envelope", "full-body"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ApiResult<{ card?: Card }>"));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_malformed_schema_fails_without_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("broken.json");
    let output = temp_dir.path().join("client.ts");
    fs::write(&input, r#"{"paths": ["not", "an", "object"]}"#).unwrap();

    cargo_bin_cmd!("clientgen")
        .arg("-f")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse API schema"));

    assert!(!output.exists());
}

#[test]
fn test_missing_schema_file_fails() {
    let temp_dir = TempDir::new().unwrap();

    cargo_bin_cmd!("clientgen")
        .current_dir(temp_dir.path())
        .args(["-f", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.json"));

    assert!(!temp_dir.path().join("output.ts").exists());
}

#[test]
fn test_path_mismatch_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("mismatch.json");
    let output = temp_dir.path().join("client.ts");
    fs::write(
        &input,
        r#"{"paths": {"/cards/{id}": {"get": {"operationId": "getCard"}}}}"#,
    )
    .unwrap();

    cargo_bin_cmd!("clientgen")
        .arg("-f")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("getCard"))
        .stderr(predicate::str::contains("/cards/{id}"));

    assert!(!output.exists());
}
