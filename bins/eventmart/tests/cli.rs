//! Smoke tests for the `eventmart` binary. None of these reach a backend.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn eventmart(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("eventmart").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("EVENTMART_API_URL")
        .env_remove("EVENTMART_PASSWORD")
        .env("EVENTMART_SESSION_FILE", dir.path().join("session.json"))
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    eventmart(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("vendors"))
        .stdout(predicate::str::contains("create-event"));
}

#[test]
fn test_status_without_sessions() {
    let dir = TempDir::new().unwrap();
    eventmart(&dir)
        .args(["status", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"signedIn\": false"))
        .stdout(predicate::str::contains("\"role\": \"admin\""));
}

#[test]
fn test_admin_command_requires_session() {
    let dir = TempDir::new().unwrap();
    eventmart(&dir)
        .arg("vendors")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("No admin session found"));
}

#[test]
fn test_invalid_login_fails_before_network() {
    let dir = TempDir::new().unwrap();
    eventmart(&dir)
        .args(["login", "--role", "vendor", "--email", "not-an-email", "--password", "Str0ng!Pass"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("email:"));
}

#[test]
fn test_unknown_role_is_rejected() {
    let dir = TempDir::new().unwrap();
    eventmart(&dir)
        .args(["logout", "--role", "superuser"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown role"));
}

#[test]
fn test_missing_config_file_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    eventmart(&dir)
        .args(["--config", "missing.toml", "status"])
        .assert()
        .code(3);
}

#[test]
fn test_logout_then_status() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("session.json"),
        r#"{"clientId":"c-42","clientAccessToken":"tok"}"#,
    )
    .unwrap();

    eventmart(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("c-42"));

    eventmart(&dir)
        .args(["logout", "--role", "client"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Logged out"));

    eventmart(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("c-42").not());
}

#[test]
fn test_bad_api_url_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    eventmart(&dir)
        .args(["--api-url", "localhost:3000", "--format", "json", "status"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"code\":\"E3004\""))
        .stderr(predicate::str::contains("base_url must start with http"));
}
