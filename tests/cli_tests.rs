//! CLI integration tests
//!
//! These tests verify the CLI works correctly by running the binary.

#![cfg(feature = "cli")]

use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn xsdgen_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_xsdgen"))
}

fn fixtures_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path
}

#[test]
fn test_cli_writes_json_per_schema() {
    let out = TempDir::new().unwrap();
    let output = Command::new(xsdgen_bin())
        .args([
            "-i",
            fixtures_dir().join("cross").to_str().unwrap(),
            "-o",
            out.path().to_str().unwrap(),
            "-l",
            "rust",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "run should succeed");
    let a = std::fs::read_to_string(out.path().join("a.xsd.json")).unwrap();
    assert!(a.contains("\"Order\""));
    assert!(a.contains("\"String\""), "builtins map to the target language");
    assert!(out.path().join("b.xsd.json").exists());
}

#[test]
fn test_cli_dump() {
    let out = TempDir::new().unwrap();
    let output = Command::new(xsdgen_bin())
        .args([
            "-i",
            fixtures_dir().join("person.xsd").to_str().unwrap(),
            "-o",
            out.path().to_str().unwrap(),
            "--dump",
        ])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 7);
}

#[test]
fn test_cli_missing_input() {
    let output = Command::new(xsdgen_bin())
        .args(["-i", "/nonexistent/schema.xsd"])
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("/nonexistent/schema.xsd"));
}

#[test]
fn test_cli_unknown_language() {
    let output = Command::new(xsdgen_bin())
        .args(["-i", fixtures_dir().join("person.xsd").to_str().unwrap(), "-l", "cobol"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}
