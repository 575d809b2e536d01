//! End-to-end CLI tests for the pdfgrab binary.

mod support;

use assert_cmd::Command;
use predicates::prelude::*;
use support::socket_guard::start_mock_server_or_skip;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

/// Command with an isolated config home so a developer's own config is never read.
fn pdfgrab(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pdfgrab").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_binary_help_displays_usage() {
    let home = TempDir::new().unwrap();
    pdfgrab(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Download the PDF files linked"));
}

#[test]
fn test_binary_version_displays_version() {
    let home = TempDir::new().unwrap();
    pdfgrab(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pdfgrab"));
}

#[test]
fn test_binary_missing_url_returns_error() {
    let home = TempDir::new().unwrap();
    pdfgrab(&home)
        .assert()
        .failure()
        .stderr(predicate::str::contains("URL"));
}

#[test]
fn test_binary_invalid_pattern_reported_exit_zero() {
    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let folder = out.path().join("pdfs");
    pdfgrab(&home)
        .args(["http://127.0.0.1:9/", "-k", "dis("])
        .arg("-o")
        .arg(&folder)
        .assert()
        .success()
        .stdout(predicate::str::contains("invalid keyword pattern 'dis('"));
    assert!(!folder.exists());
}

#[test]
fn test_binary_invalid_config_file_fails() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("bad.toml");
    std::fs::write(&config, "unknown_key = 1\n").unwrap();
    pdfgrab(&home)
        .args(["https://example.com/", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[tokio::test]
async fn test_binary_downloads_matching_pdfs() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/course/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<a href="hw1.pdf">HW1</a><a href="notes.pdf">Lecture Notes</a>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/course/hw1.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF hw1".to_vec()))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let url = format!("{}/course/", server.uri());

    // The binary blocks, so run it off the async test thread that drives the mock server.
    let mut cmd = pdfgrab(&home);
    cmd.args([url.as_str(), "-k", "hw"]).arg("-o").arg(out.path());
    let assert = tokio::task::spawn_blocking(move || cmd.assert())
        .await
        .unwrap();

    assert.success().stdout(predicate::str::contains("saved"));
    assert_eq!(std::fs::read(out.path().join("hw1.pdf")).unwrap(), b"%PDF hw1");
    assert!(!out.path().join("notes.pdf").exists());
}

#[tokio::test]
async fn test_binary_page_fetch_failure_exits_zero() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let url = format!("{}/missing/", server.uri());

    let mut cmd = pdfgrab(&home);
    cmd.arg(url.as_str()).arg("-o").arg(out.path());
    let assert = tokio::task::spawn_blocking(move || cmd.assert())
        .await
        .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("cannot access page"));
}
