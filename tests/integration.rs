#![allow(deprecated)]

// Integration tests for the repohealth CLI.
//
// These invoke the binary with assert_cmd and never touch the network:
// invalid identities fail before any request, and `score` works offline
// on snapshot files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Binary command isolated from any real user or project config.
fn repohealth(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("repohealth").expect("binary should exist");
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("GITHUB_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

fn commit_days() -> String {
    (1..=30)
        .map(|day| {
            let commits = if day == 30 { 4 } else { 0 };
            format!(r#"{{"date": "2024-06-{day:02}", "commits": {commits}}}"#)
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn snapshot_json() -> String {
    format!(
        r#"{{
  "owner": "acme",
  "name": "widget",
  "full_name": "acme/widget",
  "description": "Widgets for everyone",
  "primary_language": "Rust",
  "topics": ["cli"],
  "license_name": "MIT License",
  "homepage": null,
  "html_url": "https://github.com/acme/widget",
  "clone_url": "https://github.com/acme/widget.git",
  "default_branch": "main",
  "size_kb": 2048,
  "created_at": "2020-01-01T00:00:00Z",
  "updated_at": "2024-06-28T00:00:00Z",
  "fetched_at": "2024-06-30T12:00:00Z",
  "stargazers_count": 1000,
  "forks_count": 100,
  "watchers_count": 500,
  "open_issues_count": 0,
  "open_prs_count": 2,
  "contributors_count": 50,
  "has_issues": false,
  "has_wiki": false,
  "has_pages": false,
  "has_projects": false,
  "archived": false,
  "is_fork": false,
  "commit_activity": [{}],
  "recent_issues": [],
  "recent_prs": []
}}"#,
        commit_days()
    )
}

#[test]
fn cli_version_flag() {
    let home = TempDir::new().expect("temp dir should be created");
    repohealth(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("repohealth"));
}

#[test]
fn cli_help_flag() {
    let home = TempDir::new().expect("temp dir should be created");
    repohealth(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Repository health scoring"));
}

#[test]
fn analyze_requires_repository() {
    let home = TempDir::new().expect("temp dir should be created");
    repohealth(&home)
        .arg("analyze")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn analyze_rejects_invalid_identity_without_fetching() {
    let home = TempDir::new().expect("temp dir should be created");
    repohealth(&home)
        .args(["analyze", "https://example.org/not/a/repo"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid repository identity"));
}

#[test]
fn analyze_rejects_host_without_repository() {
    let home = TempDir::new().expect("temp dir should be created");
    repohealth(&home)
        .args(["analyze", "github.com/torvalds"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid repository identity"));
}

#[test]
fn compare_rejects_invalid_right_identity() {
    let home = TempDir::new().expect("temp dir should be created");
    repohealth(&home)
        .args(["compare", "rust-lang/rust", "???"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid repository identity"));
}

#[test]
fn invalid_project_config_is_reported() {
    let home = TempDir::new().expect("temp dir should be created");
    fs::write(home.path().join("repohealth.toml"), "[weights]\nactivity = 0.9\n")
        .expect("config should write");
    repohealth(&home)
        .args(["analyze", "rust-lang/rust"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("weights must sum to 1.0"));
}

#[test]
fn score_renders_markdown_for_snapshot_file() {
    let home = TempDir::new().expect("temp dir should be created");
    let path = home.path().join("snapshot.json");
    fs::write(&path, snapshot_json()).expect("snapshot should write");

    repohealth(&home)
        .arg("score")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("# acme/widget"))
        .stdout(predicate::str::contains("Overall score:"))
        .stdout(predicate::str::contains("- Total commits: 4"));
}

#[test]
fn score_emits_json_with_total() {
    let home = TempDir::new().expect("temp dir should be created");
    let path = home.path().join("snapshot.json");
    fs::write(&path, snapshot_json()).expect("snapshot should write");

    let output = repohealth(&home)
        .args(["score", "--format", "json"])
        .arg(&path)
        .output()
        .expect("command should run");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be json");
    let total = report["score"]["total_score"]
        .as_f64()
        .expect("total should be a number");
    assert!((0.0..=100.0).contains(&total));
    assert_eq!(report["grade"], "good");
}

#[test]
fn score_fail_under_exits_with_warning_code() {
    let home = TempDir::new().expect("temp dir should be created");
    let path = home.path().join("snapshot.json");
    fs::write(&path, snapshot_json()).expect("snapshot should write");

    repohealth(&home)
        .args(["score", "--fail-under", "99"])
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("below the required"));
}

#[test]
fn score_missing_file_is_runtime_failure() {
    let home = TempDir::new().expect("temp dir should be created");
    repohealth(&home)
        .args(["score", "does-not-exist.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("snapshot file does not exist"));
}
