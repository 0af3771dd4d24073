//! Integration tests for the `shelf` CLI binary.
//!
//! Offline commands run against an isolated config/data directory;
//! catalog commands run against a wiremock data API.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `shelf` binary with env isolation.
///
/// Points every config and data directory into `home` and clears all
/// `SHELF_*` variables so tests never touch the user's real state.
fn shelf_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("shelf");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("SHELF_STORAGE_PATH", home.join("storage.json"))
        .env("SHELF_LOGIN_DELAY_MS", "0")
        .env_remove("SHELF_API_URL")
        .env_remove("SHELF_TIMEOUT")
        .env_remove("SHELF_INSECURE")
        .env_remove("SHELF_OUTPUT")
        .env_remove("SHELF_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

fn sign_in(home: &Path) {
    shelf_cmd(home)
        .args(["login", "--email", "admin@shelf.dev", "--password", "Admin@123"])
        .assert()
        .success();
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = shelf_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_commands() {
    let home = tempfile::tempdir().unwrap();
    shelf_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("books")
            .and(predicate::str::contains("authors"))
            .and(predicate::str::contains("login"))
            .and(predicate::str::contains("route")),
    );
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();
    shelf_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("shelf"));
}

#[test]
fn test_invalid_output_format() {
    let home = tempfile::tempdir().unwrap();
    shelf_cmd(home.path())
        .args(["--output", "xml", "whoami"])
        .assert()
        .code(2);
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path() {
    let home = tempfile::tempdir().unwrap();
    shelf_cmd(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_applies_env_and_flags() {
    let home = tempfile::tempdir().unwrap();
    let output = shelf_cmd(home.path())
        .env("SHELF_API_URL", "http://catalog.test:8080")
        .args(["config", "show", "-o", "json", "--timeout", "5"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let cfg: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(cfg["api_url"], "http://catalog.test:8080");
    assert_eq!(cfg["timeout"], 5);
    assert_eq!(cfg["login_delay_ms"], 0);
}

// ── Session ─────────────────────────────────────────────────────────

#[test]
fn test_whoami_when_anonymous() {
    let home = tempfile::tempdir().unwrap();
    shelf_cmd(home.path())
        .arg("whoami")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Not signed in"));
}

#[test]
fn test_login_rejects_wrong_password() {
    let home = tempfile::tempdir().unwrap();
    shelf_cmd(home.path())
        .args(["login", "--email", "admin@shelf.dev", "--password", "nope"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid email or password"));

    let raw = std::fs::read_to_string(home.path().join("storage.json")).unwrap_or_default();
    assert!(!raw.contains("auth_user"));
}

#[test]
fn test_session_persists_until_logout() {
    let home = tempfile::tempdir().unwrap();

    shelf_cmd(home.path())
        .args(["login", "--email", "editor@shelf.dev", "--password", "editor123456"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Welcome, Catalog Editor"));

    shelf_cmd(home.path())
        .args(["whoami", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("editor@shelf.dev"));

    shelf_cmd(home.path())
        .arg("logout")
        .assert()
        .success()
        .stderr(predicate::str::contains("Signed out"));

    shelf_cmd(home.path()).arg("whoami").assert().code(3);
}

#[test]
fn test_corrupt_session_is_discarded() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(
        home.path().join("storage.json"),
        r#"{ "auth_user": "{broken" }"#,
    )
    .unwrap();

    shelf_cmd(home.path()).arg("whoami").assert().code(3);

    let raw = std::fs::read_to_string(home.path().join("storage.json")).unwrap();
    assert!(!raw.contains("auth_user"));
}

#[test]
fn test_truncated_storage_file_does_not_block_login() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(home.path().join("storage.json"), r#"{"auth_user": "#).unwrap();

    shelf_cmd(home.path()).arg("whoami").assert().code(3);
    sign_in(home.path());

    shelf_cmd(home.path())
        .args(["whoami", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("admin@shelf.dev"));
}

// ── Route guard ─────────────────────────────────────────────────────

#[test]
fn test_route_admin_redirects_anonymous() {
    let home = tempfile::tempdir().unwrap();
    shelf_cmd(home.path())
        .args(["route", "/admin/books", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::diff("/login?redirect=%2Fadmin%2Fbooks\n"));
}

#[test]
fn test_route_login_redirects_signed_in() {
    let home = tempfile::tempdir().unwrap();
    sign_in(home.path());

    shelf_cmd(home.path())
        .args(["route", "/login", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::diff("/admin\n"));

    shelf_cmd(home.path())
        .args(["route", "/admin/books", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::diff("/admin/books\n"));
}

#[test]
fn test_route_public_proceeds() {
    let home = tempfile::tempdir().unwrap();
    shelf_cmd(home.path())
        .args(["route", "/books/3", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""decision": "proceed""#));
}

// ── Catalog commands ────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_books_list_plain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "title": "Dune" },
            { "id": "2", "title": "Emma" }
        ])))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    shelf_cmd(home.path())
        .args(["--api-url", &server.uri(), "books", "list", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n2\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_books_get_missing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({})))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    shelf_cmd(home.path())
        .args(["--api-url", &server.uri(), "books", "get", "99"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("book '99' not found"));
}

#[test]
fn test_unreachable_api() {
    let home = tempfile::tempdir().unwrap();
    shelf_cmd(home.path())
        .args(["--api-url", "http://127.0.0.1:1", "authors", "list"])
        .assert()
        .code(7);
}

#[test]
fn test_add_requires_sign_in() {
    let home = tempfile::tempdir().unwrap();
    shelf_cmd(home.path())
        .args(["books", "add", "--title", "Dune"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("/login?redirect=%2Fadmin%2Fbooks%2Fnew"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_book_when_signed_in() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/books"))
        .and(body_json(json!({ "title": "Dune", "publishedYear": 1965 })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "id": 7, "title": "Dune", "publishedYear": 1965 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    sign_in(home.path());

    shelf_cmd(home.path())
        .args([
            "--api-url",
            &server.uri(),
            "books",
            "add",
            "--title",
            "Dune",
            "--year",
            "1965",
            "-o",
            "plain",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("7\n"))
        .stderr(predicate::str::contains("Book added"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_author_merges_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/authors/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4, "name": "Octavia Butler", "nationality": "American"
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/authors/4"))
        .and(body_json(json!({
            "id": "4", "name": "Octavia E. Butler", "nationality": "American"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4, "name": "Octavia E. Butler", "nationality": "American"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    sign_in(home.path());

    shelf_cmd(home.path())
        .args([
            "--api-url",
            &server.uri(),
            "authors",
            "update",
            "4",
            "--name",
            "Octavia E. Butler",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Octavia E. Butler"))
        .stderr(predicate::str::contains("Author updated"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_delete_posts_error_notification() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/books/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database locked"))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    sign_in(home.path());

    let output = shelf_cmd(home.path())
        .args(["--api-url", &server.uri(), "books", "delete", "1"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("✗ Could not delete book"), "stderr: {stderr}");
    assert!(!stderr.contains("Book deleted"), "stderr: {stderr}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_author_add_posts_error_notification() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/authors"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    sign_in(home.path());

    shelf_cmd(home.path())
        .args(["--api-url", &server.uri(), "authors", "add", "--name", "Toni Morrison"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("✗ Could not add author"));
}

#[test]
fn test_config_init_writes_once() {
    let home = tempfile::tempdir().unwrap();
    shelf_cmd(home.path())
        .args(["--api-url", "http://catalog.test", "config", "init"])
        .assert()
        .success()
        .stderr(predicate::str::contains("config.toml"));

    shelf_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"api_url = "http://catalog.test""#));

    shelf_cmd(home.path()).args(["config", "init"]).assert().code(2);
}
