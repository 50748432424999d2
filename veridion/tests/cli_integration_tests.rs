// veridion/tests/cli_integration_tests.rs
//! Command-line integration tests for the `veridion` binary.
//!
//! Each test writes OCR output (and optionally a rule file) to temp files,
//! runs the binary with `assert_cmd`, and checks the audit report, the
//! rectangle file, and the exit status. ANSI escapes are stripped from
//! stderr before matching.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

use strip_ansi_escapes::strip as strip_ansi_escapes_fn;

const NAME_JSON: &str = r#"{
    "level": [5, 5, 5, 5],
    "conf": [96, 95, 97, 90],
    "text": ["Name", "John", "Smith", ""],
    "left": [0, 45, 90, 150],
    "top": [0, 0, 0, 0],
    "width": [40, 40, 50, 5],
    "height": [10, 10, 10, 10]
}"#;

fn veridion() -> Command {
    let mut cmd = Command::cargo_bin("veridion").unwrap();
    cmd.env_remove("VERIDION_RULES");
    cmd.env("RUST_LOG", "debug");
    cmd
}

fn ocr_file(content: &str, suffix: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

fn strip_ansi(s: &[u8]) -> String {
    String::from_utf8_lossy(&strip_ansi_escapes_fn(s)).to_string()
}

#[test]
fn test_redact_json_writes_report_to_stdout() -> Result<()> {
    let ocr = ocr_file(NAME_JSON, ".json")?;
    let output = veridion()
        .args(["redact", "--ocr"])
        .arg(ocr.path())
        .arg("--no-redaction-summary")
        .output()?;
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["redaction_count"], 1);
    assert_eq!(report["findings"][0]["text"], "Name John Smith");
    assert_eq!(report["findings"][0]["action"], "REDACTED");
    assert_eq!(report["findings"][0]["coordinates"], "(0,0,140,10)");
    assert_eq!(report["input_hash"].as_str().map(str::len), Some(64));
    Ok(())
}

#[test]
fn test_redact_tsv_with_boxes_file() -> Result<()> {
    let tsv = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext\n\
               1\t1\t0\t0\t0\t0\t0\t0\t800\t600\t-1\t\n\
               5\t1\t1\t1\t1\t1\t20\t40\t60\t14\t92\tPAN\n\
               5\t1\t1\t1\t1\t2\t90\t40\t120\t14\t91\tABCDE1234F\n\
               5\t1\t1\t1\t2\t1\t20\t70\t150\t14\t90\t2341 2341 2346\n";
    let ocr = ocr_file(tsv, ".tsv")?;
    let dir = TempDir::new()?;
    let boxes = dir.path().join("boxes.json");
    let report_path = dir.path().join("audit.json");

    veridion()
        .args(["redact", "--ocr"])
        .arg(ocr.path())
        .arg("--boxes")
        .arg(&boxes)
        .arg("--output")
        .arg(&report_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("Redaction summary: 2 region(s) redacted."));

    let rects: Value = serde_json::from_str(&fs::read_to_string(&boxes)?)?;
    assert_eq!(
        rects,
        serde_json::json!([
            { "x": 90, "y": 40, "w": 120, "h": 14 },
            { "x": 20, "y": 70, "w": 150, "h": 14 }
        ])
    );

    let report: Value = serde_json::from_str(&fs::read_to_string(&report_path)?)?;
    assert_eq!(report["findings"][1]["text"], "2341 2341 2346");
    Ok(())
}

#[test]
fn test_no_pii_reports_sentinel() -> Result<()> {
    let json = r#"{"text": ["Invoice", "42"], "left": [0, 50], "top": [0, 0], "width": [40, 20], "height": [10, 10]}"#;
    let ocr = ocr_file(json, ".json")?;
    let output = veridion()
        .args(["redact", "-q", "--ocr"])
        .arg(ocr.path())
        .output()?;
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["redaction_count"], 0);
    assert_eq!(
        report["findings"]["status"],
        "No PII found matching the configured patterns."
    );
    Ok(())
}

#[test]
fn test_malformed_input_fails_closed() -> Result<()> {
    let json = r#"{"text": ["Name", "John", "Smith"], "left": [0, 45], "top": [0, 0, 0], "width": [40, 40, 50], "height": [10, 10, 10]}"#;
    let ocr = ocr_file(json, ".json")?;
    let dir = TempDir::new()?;
    let boxes = dir.path().join("boxes.json");
    let report_path = dir.path().join("audit.json");

    let output = veridion()
        .args(["redact", "--ocr"])
        .arg(ocr.path())
        .arg("--boxes")
        .arg(&boxes)
        .arg("--output")
        .arg(&report_path)
        .output()?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(strip_ansi(&output.stderr).contains("Malformed OCR input"));
    assert!(!boxes.exists());
    assert!(!report_path.exists());
    Ok(())
}

#[test]
fn test_failed_report_write_leaves_no_boxes_file() -> Result<()> {
    let ocr = ocr_file(NAME_JSON, ".json")?;
    let dir = TempDir::new()?;
    let boxes = dir.path().join("boxes.json");

    // The report path is a directory, so writing it fails after the plan exists.
    let output = veridion()
        .args(["redact", "--ocr"])
        .arg(ocr.path())
        .arg("--boxes")
        .arg(&boxes)
        .arg("--output")
        .arg(dir.path())
        .output()?;

    assert!(!output.status.success());
    assert!(strip_ansi(&output.stderr).contains("Failed to write audit report"));
    assert!(!boxes.exists());
    Ok(())
}

#[test]
fn test_unknown_rule_name_warns() -> Result<()> {
    let ocr = ocr_file(NAME_JSON, ".json")?;
    let output = veridion()
        .args(["redact", "--no-redaction-summary", "--disable", "NO_SUCH_RULE", "--ocr"])
        .arg(ocr.path())
        .output()?;
    assert!(output.status.success());
    assert!(strip_ansi(&output.stderr).contains("warning: --disable names unknown rule 'NO_SUCH_RULE'"));
    let report: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["redaction_count"], 1);
    Ok(())
}

#[test]
fn test_custom_rule_file_and_disable() -> Result<()> {
    let json = r#"{"text": ["EMP-004211", "ABCDE1234F"], "left": [0, 100], "top": [0, 0], "width": [90, 90], "height": [12, 12]}"#;
    let ocr = ocr_file(json, ".json")?;
    let mut rules = NamedTempFile::new()?;
    rules.write_all(b"rules:\n  - name: EMPLOYEE_ID\n    pattern: 'EMP-[0-9]{6}'\n")?;

    let output = veridion()
        .args(["redact", "-q", "--disable", "TAX_ID", "--ocr"])
        .arg(ocr.path())
        .arg("--config")
        .arg(rules.path())
        .output()?;
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["redaction_count"], 1);
    assert_eq!(report["findings"][0]["text"], "EMP-004211");
    Ok(())
}

#[test]
fn test_invalid_rule_file_is_rejected() -> Result<()> {
    let ocr = ocr_file(NAME_JSON, ".json")?;
    let mut rules = NamedTempFile::new()?;
    rules.write_all(b"rules:\n  - name: W\n    kind: token_window\n    window_size: 0\n    pattern: 'a'\n")?;

    let output = veridion()
        .args(["redact", "--ocr"])
        .arg(ocr.path())
        .arg("--config")
        .arg(rules.path())
        .output()?;
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(strip_ansi(&output.stderr).contains("Invalid rule configuration"));
    Ok(())
}

#[test]
fn test_rules_command_lists_defaults() {
    veridion()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("NATIONAL_ID"))
        .stdout(predicate::str::contains("TAX_ID"))
        .stdout(predicate::str::contains("PERSON_NAME"));
}

#[test]
fn test_rules_command_lists_only_active_rules() -> Result<()> {
    let mut rules = NamedTempFile::new()?;
    rules.write_all(
        b"rules:\n  - name: OPTIN_RULE\n    pattern: 'X-[0-9]+'\n    opt_in: true\n  - name: TAX_ID\n    pattern: '[A-Z]{5}[0-9]{4}[A-Z]'\n    enabled: false\n",
    )?;

    let output = veridion().arg("rules").arg("--config").arg(rules.path()).output()?;
    assert!(output.status.success());
    let listed = String::from_utf8_lossy(&output.stdout).to_string();
    assert!(listed.contains("NATIONAL_ID"));
    assert!(listed.contains("PERSON_NAME"));
    assert!(!listed.contains("OPTIN_RULE"));
    assert!(!listed.contains("TAX_ID"));

    veridion()
        .args(["rules", "--enable", "OPTIN_RULE", "--config"])
        .arg(rules.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("OPTIN_RULE"));
    Ok(())
}
