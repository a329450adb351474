use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cmd(temp: &Path) -> Command {
    let mut cmd = Command::cargo_bin("prompt-reviewer").unwrap();
    cmd.env_remove("PROMPT_REVIEWER_CONFIG")
        .arg("--config")
        .arg(temp.join("config.toml"));
    cmd
}

fn write_input(temp: &Path, content: &str) -> std::path::PathBuf {
    let path = temp.join("prompts.json");
    fs::write(&path, content).unwrap();
    path
}

const THREE: &str = r#"[{"prompt":"A"},{"prompt":"B"},{"prompt":"C"}]"#;

#[test]
fn help_lists_commands() {
    let temp = TempDir::new().unwrap();
    cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("review"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn review_missing_input_fails() {
    let temp = TempDir::new().unwrap();
    cmd(temp.path())
        .args(["review", "--no-tui"])
        .arg(temp.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn review_rejects_invalid_json() {
    let temp = TempDir::new().unwrap();
    let input = write_input(temp.path(), "{ not json");
    cmd(temp.path())
        .args(["review", "--no-tui"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load records"));
}

#[test]
fn review_rejects_empty_input() {
    let temp = TempDir::new().unwrap();
    let input = write_input(temp.path(), "[]");
    cmd(temp.path())
        .args(["review", "--no-tui"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no records"));
}

#[test]
fn review_rejects_out_of_range_start() {
    let temp = TempDir::new().unwrap();
    let input = write_input(temp.path(), THREE);
    cmd(temp.path())
        .args(["review", "--no-tui", "--start", "5", "--output-dir"])
        .arg(temp.path())
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid starting index 5"));

    // Nothing is written before a session starts
    assert!(!temp.path().join("kept_prompts.json").exists());
}

#[test]
fn status_reports_bucket_counts() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("kept_prompts.json"),
        r#"[{"prompt":"A"},{"prompt":"C"}]"#,
    )
    .unwrap();
    fs::write(temp.path().join("discarded_prompts.json"), "[]").unwrap();

    cmd(temp.path())
        .args(["status", "--json", "--output-dir"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""bucket": "kept_prompts""#))
        .stdout(predicate::str::contains(r#""records": 2"#))
        .stdout(predicate::str::contains(r#""records": null"#));
}

#[test]
fn status_fails_on_corrupt_bucket() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("skipped_prompts.json"), "oops").unwrap();

    cmd(temp.path())
        .args(["status", "--output-dir"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Corrupt bucket file"));
}

#[test]
fn config_path_prints_override() {
    let temp = TempDir::new().unwrap();
    cmd(temp.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_reset_then_validate() {
    let temp = TempDir::new().unwrap();
    cmd(temp.path())
        .args(["config", "reset", "--force"])
        .assert()
        .success();
    assert!(temp.path().join("config.toml").exists());

    cmd(temp.path())
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn invalid_config_is_reported() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("config.toml"), "[store]\nnamespace = \"galaxy\"\n").unwrap();
    cmd(temp.path())
        .args(["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}
