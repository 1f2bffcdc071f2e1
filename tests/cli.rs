#![allow(deprecated)]

//! End-to-end tests for the `reliefdesk` binary
//!
//! Each test gets its own config and session file in a temp directory so
//! the real user data directory is never touched.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

const UNREACHABLE: &str = "http://127.0.0.1:9/api/v1";

fn reliefdesk(config_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("reliefdesk").unwrap();
    cmd.env_remove("RELIEFDESK_API_URL")
        .env_remove("RELIEFDESK_PASSWORD")
        .env_remove("RELIEFDESK_SESSION_BACKEND")
        .env_remove("RELIEFDESK_SESSION_PATH")
        .env_remove("RELIEFDESK_API_TIMEOUT")
        .env_remove("RELIEFDESK_PAGE_SIZE")
        .env_remove("RELIEFDESK_ADMIN_USERNAME")
        .env_remove("RELIEFDESK_ADMIN_PASSWORD")
        .arg("--config")
        .arg(config_path);
    cmd
}

// ---------------------------------------------------------------------------
// Session commands
// ---------------------------------------------------------------------------

#[test]
fn test_whoami_without_session() {
    let (_dir, config, _session) = common::temp_workspace(UNREACHABLE);
    reliefdesk(&config)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn test_login_then_whoami_then_logout() {
    let (_dir, config, session) = common::temp_workspace(UNREACHABLE);

    reliefdesk(&config)
        .args(["login", "--username", "admin", "--password", "admin123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as admin"))
        .stdout(predicate::str::contains("/relief-supplies"));
    assert!(session.exists());

    reliefdesk(&config)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("admin (admin)"));

    reliefdesk(&config).arg("logout").assert().success();
    assert!(!session.exists());

    reliefdesk(&config)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn test_login_with_wrong_password_fails() {
    let (_dir, config, session) = common::temp_workspace(UNREACHABLE);
    reliefdesk(&config)
        .args(["login", "--username", "admin", "--password", "letmein"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password"));
    assert!(!session.exists());
}

#[test]
fn test_ephemeral_session_is_not_persisted() {
    let (_dir, config, session) = common::temp_workspace(UNREACHABLE);
    reliefdesk(&config)
        .args(["--ephemeral", "login", "-u", "admin", "-p", "admin123"])
        .assert()
        .success();
    assert!(!session.exists());
}

// ---------------------------------------------------------------------------
// Guarded views
// ---------------------------------------------------------------------------

#[test]
fn test_open_protected_view_without_session_asks_for_login() {
    let (_dir, config, _session) = common::temp_workspace(UNREACHABLE);
    reliefdesk(&config)
        .args(["open", "/relief-supplies"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reliefdesk login"));
}

#[test]
fn test_open_protected_view_as_non_admin_is_denied() {
    let (_dir, config, session) = common::temp_workspace(UNREACHABLE);
    common::write_session(&session, "field-lead", "user");

    reliefdesk(&config)
        .args(["open", "/rescue-operations"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Access Denied"))
        .stderr(predicate::str::contains("/go /"));
}

#[test]
fn test_delete_on_protected_resource_without_session_fails() {
    let (_dir, config, _session) = common::temp_workspace(UNREACHABLE);
    reliefdesk(&config)
        .args(["delete", "/relief-supplies", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires an admin login"));
}

#[test]
fn test_export_unknown_route_fails() {
    let (_dir, config, _session) = common::temp_workspace(UNREACHABLE);
    reliefdesk(&config)
        .args(["export", "/donations"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid route"));
}

// ---------------------------------------------------------------------------
// Views against a mock backend
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread")]
async fn test_open_help_requests_with_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/help-requests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Nimal", "phone": "077", "location": "Kelaniya", "priority": "high", "status": "pending"},
            {"id": 2, "name": "Saman", "phone": "078", "location": "Colombo", "priority": "low", "status": "completed"}
        ])))
        .mount(&server)
        .await;

    let (_dir, config, _session) = common::temp_workspace(&format!("{}/api/v1", server.uri()));
    reliefdesk(&config)
        .args(["open", "/help-requests", "--filter", "status=pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nimal"))
        .stdout(predicate::str::contains("Saman").not())
        .stdout(predicate::str::contains("Showing 1-1 of 1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_open_unknown_path_renders_home() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/help-requests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Nimal", "phone": "077", "location": "Kelaniya", "status": "pending"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/volunteers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let (_dir, config, _session) = common::temp_workspace(&format!("{}/api/v1", server.uri()));
    reliefdesk(&config)
        .args(["open", "/no-such-page"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Disaster Relief Coordination"))
        .stdout(predicate::str::contains("Help requests:        1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_admin_exports_relief_supplies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/relief-supplies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 9, "item_name": "Rice", "category": "Food", "quantity": 50, "unit": "kg", "location": "Gampaha", "status": "available"}
        ])))
        .mount(&server)
        .await;

    let (dir, config, session) = common::temp_workspace(&format!("{}/api/v1", server.uri()));
    common::write_session(&session, "admin", "admin");
    let output = dir.path().join("supplies.csv");

    reliefdesk(&config)
        .args(["export", "/relief-supplies", "--output"])
        .arg(&output)
        .assert()
        .success();

    let csv = std::fs::read_to_string(&output).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("ID,Item,Category,Quantity,Unit,Donor,Donor Phone,Location,Status,Expiry,Notes")
    );
    assert_eq!(
        lines.next(),
        Some(r#""9","Rice","Food","50","kg","","","Gampaha","available","","""#)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health_command() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "OK", "message": "up"})),
        )
        .mount(&server)
        .await;

    let (_dir, config, _session) = common::temp_workspace(&format!("{}/api/v1", server.uri()));
    reliefdesk(&config)
        .arg("health")
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn test_invalid_page_size_is_rejected() {
    let (_dir, config) = common::temp_config_file("ui:\n  page_size: 0\n");
    reliefdesk(&config)
        .args(["--ephemeral", "whoami"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("page_size"));
}
