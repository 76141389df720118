//! Binary-level tests: argument surface, configuration errors and full
//! request/render cycles against a mock payments API.

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

/// `dwolla` isolated from the caller's home, working directory and environment.
fn dwolla(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("dwolla");
    cmd.current_dir(home)
        .env("HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("DWOLLA_API_KEY")
        .env_remove("DWOLLA_API_SECRET")
        .env_remove("DWOLLA_ENVIRONMENT")
        .env_remove("DWOLLA_BASE_URL");
    cmd
}

fn mock_token(server: &MockServer) {
    server.mock(|when, then| {
        when.method(POST).path("/token");
        then.status(200)
            .json_body(json!({"access_token": "tok", "token_type": "bearer", "expires_in": 3600}));
    });
}

// ============================================================
// Argument surface
// ============================================================

#[test]
fn given_help_flag_when_running_then_lists_command_groups() {
    let home = TempDir::new().unwrap();

    dwolla(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("account"))
        .stdout(predicate::str::contains("source"))
        .stdout(predicate::str::contains("sandbox"))
        .stdout(predicate::str::contains("completion"));
}

#[test]
fn given_transfer_list_help_when_running_then_shows_filters() {
    let home = TempDir::new().unwrap();

    dwolla(home.path())
        .args(["account", "transfer", "list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--start-amount"))
        .stdout(predicate::str::contains("--correlation-id"));
}

#[test]
fn given_shell_when_generating_completion_then_writes_script() {
    let home = TempDir::new().unwrap();

    dwolla(home.path())
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dwolla"));
}

// ============================================================
// Configuration errors
// ============================================================

#[test]
fn given_no_credentials_when_running_api_command_then_fails_before_network() {
    let home = TempDir::new().unwrap();

    dwolla(home.path())
        .args(["account", "retrieve"])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("error: API key is required"));
}

#[test]
fn given_unknown_environment_flag_when_running_then_reports_error() {
    let home = TempDir::new().unwrap();

    dwolla(home.path())
        .args(["--environment", "staging", "account", "retrieve"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Invalid environment: staging"));
}

#[test]
fn given_missing_required_flags_when_verifying_then_exits_with_failure() {
    let home = TempDir::new().unwrap();

    dwolla(home.path())
        .args(["source", "deposit", "verify", "fs-1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--amount1"));
}

#[test]
fn given_unknown_subcommand_when_running_then_exits_with_failure() {
    let home = TempDir::new().unwrap();

    dwolla(home.path()).arg("payouts").assert().code(1);
}

#[test]
fn given_missing_config_file_when_running_then_reports_config_error() {
    let home = TempDir::new().unwrap();

    dwolla(home.path())
        .args(["--config", "missing.toml", "config", "show"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("config error"));
}

#[test]
fn given_env_credentials_when_showing_config_then_key_is_masked() {
    let home = TempDir::new().unwrap();

    dwolla(home.path())
        .env("DWOLLA_API_KEY", "abcdefghijkl")
        .env("DWOLLA_API_SECRET", "topsecret")
        .env("DWOLLA_ENVIRONMENT", "sandbox")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("abcd********"))
        .stdout(predicate::str::contains("sandbox"))
        .stdout(predicate::str::contains("topsecret").not());
}

#[test]
fn given_home_config_when_listing_paths_then_marks_existing_file() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join(".dwolla.toml"), "environment = \"sandbox\"\n").unwrap();

    dwolla(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓"))
        .stdout(predicate::str::contains(".dwolla.toml"));
}

#[test]
fn given_config_target_when_init_repeatedly_then_requires_force() {
    // Arrange
    let home = TempDir::new().unwrap();
    let target = home.path().join("custom.toml");

    // Act / Assert: first init creates, second refuses, forced init overwrites
    dwolla(home.path())
        .args(["--config"])
        .arg(&target)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));
    assert!(target.exists());

    std::fs::write(&target, "environment = \"production\"\n").unwrap();
    dwolla(home.path())
        .args(["--config"])
        .arg(&target)
        .args(["config", "init"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("--force"));

    dwolla(home.path())
        .args(["--config"])
        .arg(&target)
        .args(["config", "init", "--force"])
        .assert()
        .success();
    assert!(std::fs::read_to_string(&target)
        .unwrap()
        .contains("environment = \"sandbox\""));
}

// ============================================================
// Mock API round trips
// ============================================================

#[test]
fn given_rejected_micro_deposits_when_verifying_then_prints_violation_table() {
    // Arrange
    let home = TempDir::new().unwrap();
    let server = MockServer::start();
    mock_token(&server);
    server.mock(|when, then| {
        when.method(GET).path("/funding-sources/fs-1");
        then.status(200)
            .json_body(json!({"id": "fs-1", "status": "unverified", "name": "Payroll"}));
    });
    let verify = server.mock(|when, then| {
        when.method(POST).path("/funding-sources/fs-1/micro-deposits");
        then.status(400).json_body(json!({
            "code": "ValidationError",
            "message": "Validation error(s) present. See embedded errors list for more details.",
            "_embedded": {"errors": [
                {"code": "Invalid", "message": "must be positive", "path": "amount1"}
            ]}
        }));
    });

    // Act
    let assert = dwolla(home.path())
        .env("DWOLLA_API_KEY", "key")
        .env("DWOLLA_API_SECRET", "secret")
        .env("DWOLLA_BASE_URL", server.base_url())
        .args([
            "source", "deposit", "verify", "fs-1",
            "--amount1", "0.01", "--amount2", "0.03", "--currency", "USD",
        ])
        .assert();

    // Assert
    verify.assert();
    assert
        .code(1)
        .stdout(predicate::str::starts_with("error: Validation error(s) present."))
        .stdout(predicate::str::contains("Field"))
        .stdout(predicate::str::contains("must be positive"))
        .stdout(predicate::str::contains("Total"));
}

#[test]
fn given_transfer_filters_when_listing_then_sends_query_and_renders_total() {
    // Arrange
    let home = TempDir::new().unwrap();
    let server = MockServer::start();
    mock_token(&server);
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .json_body(json!({"_links": {"account": {"href": server.url("/accounts/acc-1")}}}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/accounts/acc-1");
        then.status(200).json_body(json!({"id": "acc-1", "name": "Jane Corp"}));
    });
    let list = server.mock(|when, then| {
        when.method(GET)
            .path("/accounts/acc-1/transfers")
            .query_param("limit", "10")
            .query_param("status", "processed");
        then.status(200).json_body(json!({
            "_embedded": {"transfers": [
                {"id": "t-b", "status": "processed", "amount": {"value": "2.00", "currency": "USD"}},
                {"id": "t-a", "status": "processed", "amount": {"value": "1.00", "currency": "USD"}}
            ]},
            "total": 57
        }));
    });

    // Act
    let output = dwolla(home.path())
        .args(["--key", "key", "--secret", "secret"])
        .env("DWOLLA_BASE_URL", server.base_url())
        .args(["account", "transfer", "list", "--limit", "10", "--status", "processed"])
        .output()
        .unwrap();

    // Assert
    list.assert();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let b = stdout.find("t-b").unwrap();
    let a = stdout.find("t-a").unwrap();
    assert!(b < a);
    assert!(stdout.contains("2.00 USD"));
    let footer = stdout.lines().find(|l| l.contains("Total")).unwrap();
    assert!(footer.contains("57"));
}
