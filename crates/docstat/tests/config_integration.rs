//! Configuration integration tests.
//!
//! These tests verify config discovery, format parsing, and precedence
//! from an end-to-end perspective using the compiled binary. Tests use
//! `info --json` to assert actual config values, not just process success.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env_remove("DOCSTAT_DEFAULT_STRATEGY")
        .env_remove("DOCSTAT_DEFAULT_WORD")
        .env_remove("DOCSTAT_LOG_LEVEL");
    cmd
}

/// Run `info --json` from a directory and parse the JSON output.
fn info_json(dir: &std::path::Path) -> Value {
    let output = cmd()
        .args(["-C", dir.to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

// =============================================================================
// Config File Discovery
// =============================================================================

#[test]
fn runs_without_config_file() {
    let tmp = TempDir::new().unwrap();
    let json = info_json(tmp.path());

    assert_eq!(
        json["config"]["log_level"], "info",
        "should use default log level"
    );
    assert!(
        json["config"]["config_file"].is_null(),
        "no config file should be reported"
    );
    assert!(json["config"]["default_strategy"].is_null());
    assert_eq!(json["config"]["max_input_bytes"], 5 * 1024 * 1024);
}

#[test]
fn discovers_dotfile_config_in_current_dir() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join(".docstat.toml");
    fs::write(&config_path, r#"log_level = "debug""#).unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["log_level"], "debug");
    assert!(
        json["config"]["config_file"]
            .as_str()
            .unwrap()
            .ends_with(".docstat.toml")
    );
}

#[test]
fn discovers_plain_config_name() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("docstat.yaml"),
        "default_strategy: punctuation-count\n",
    )
    .unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["default_strategy"], "punctuation-count");
}

#[test]
fn discovers_config_in_parent_directory() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join(".git")).unwrap();
    fs::write(
        tmp.path().join(".docstat.json"),
        r#"{"default_word": "the"}"#,
    )
    .unwrap();
    let nested = tmp.path().join("drafts").join("2024");
    fs::create_dir_all(&nested).unwrap();

    let json = info_json(&nested);

    assert_eq!(json["config"]["default_word"], "the");
}

#[test]
fn disable_input_limit_is_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".docstat.toml"),
        "disable_input_limit = true\n",
    )
    .unwrap();

    let json = info_json(tmp.path());

    assert!(json["config"]["max_input_bytes"].is_null());
}

// =============================================================================
// Precedence
// =============================================================================

#[test]
fn explicit_config_flag_overrides_discovery() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".docstat.toml"), r#"log_level = "debug""#).unwrap();
    let explicit = tmp.path().join("custom.toml");
    fs::write(&explicit, r#"log_level = "error""#).unwrap();

    let output = cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--config",
            explicit.to_str().unwrap(),
            "info",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(json["config"]["log_level"], "error");
    assert!(
        json["config"]["config_file"]
            .as_str()
            .unwrap()
            .ends_with("custom.toml")
    );
}

#[test]
fn env_var_overrides_config_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".docstat.toml"),
        r#"default_strategy = "word-frequency""#,
    )
    .unwrap();

    let output = cmd()
        .env("DOCSTAT_DEFAULT_STRATEGY", "sentence-count")
        .args(["-C", tmp.path().to_str().unwrap(), "info", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(json["config"]["default_strategy"], "sentence-count");
}

#[test]
fn invalid_config_value_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".docstat.toml"), r#"log_level = "loud""#).unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

// =============================================================================
// Config Drives Commands
// =============================================================================

#[test]
fn analyze_uses_configured_defaults() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".docstat.toml"),
        "default_strategy = \"word-frequency\"\ndefault_word = \"hello\"\n",
    )
    .unwrap();
    fs::write(tmp.path().join("doc.txt"), "Hello world. Hello!").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "analyze", "doc.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Relative frequency of 'hello': 0.6667"));
}

#[test]
fn command_line_strategy_beats_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".docstat.toml"),
        r#"default_strategy = "word-frequency""#,
    )
    .unwrap();
    fs::write(tmp.path().join("doc.txt"), "One. Two.").unwrap();

    cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "analyze",
            "doc.txt",
            "-s",
            "sentence-count",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Number of sentences: 2"));
}

#[test]
fn input_limit_rejects_large_documents() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".docstat.toml"), "max_input_bytes = 8\n").unwrap();
    fs::write(tmp.path().join("doc.txt"), "This is longer than eight bytes.").unwrap();

    cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "analyze",
            "doc.txt",
            "-s",
            "sentence-count",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open"));
}

#[test]
fn unknown_configured_strategy_prompts() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".docstat.toml"),
        r#"default_strategy = "vowels""#,
    )
    .unwrap();
    fs::write(tmp.path().join("doc.txt"), "One. Two.").unwrap();

    cmd()
        .args([
            "--color",
            "never",
            "-C",
            tmp.path().to_str().unwrap(),
            "analyze",
            "doc.txt",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Choose an analysis strategy"));

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "shell", "doc.txt"])
        .write_stdin("analyze\nstrategy sentence-count\nanalyze\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Choose an analysis strategy"))
        .stdout(predicate::str::contains("Number of sentences: 2"));
}
