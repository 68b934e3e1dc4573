//! Argument handling of the `adminpanel` binary; none of these reach the network

use assert_cmd::Command;
use predicates::prelude::*;

fn adminpanel() -> Command {
    let mut cmd = Command::cargo_bin("adminpanel").unwrap();
    cmd.env_remove("ADMIN_SERVER_URL")
        .env_remove("VITE_APP_SERVER_URL")
        .env_remove("ADMIN_TIMEOUT_SECS")
        .env_remove("ADMIN_ERROR_POLICY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_commands() {
    adminpanel()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("summary"))
        .stdout(predicate::str::contains("create"));
}

#[test]
fn unknown_collection_is_rejected() {
    adminpanel()
        .args(["list", "order"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn non_http_base_url_is_rejected() {
    adminpanel()
        .args(["--base-url", "ftp://example.com", "list", "brand"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must start with http"));
}

#[test]
fn create_without_body_fails() {
    adminpanel()
        .args(["--base-url", "http://127.0.0.1:9", "create", "brand"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to send"));
}

#[test]
fn json_conflicts_with_multipart_flags() {
    adminpanel()
        .args(["create", "product", "--json", "{}", "--field", "a=b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn missing_config_file_is_reported() {
    adminpanel()
        .args(["--config", "/nonexistent/adminpanel.toml", "summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn summary_against_unreachable_backend_reports_fallback() {
    adminpanel()
        .args(["--base-url", "http://127.0.0.1:9", "summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("An error occurred"));
}
