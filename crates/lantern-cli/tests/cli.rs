use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;

fn run_raw(temp: &TempDir, args: &[&str]) -> Output {
    let db_path = temp.path().join("lantern.sqlite3");
    cargo_bin_cmd!("lantern")
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .args(["--db-path", db_path.to_str().expect("db path")])
        .args(args)
        .output()
        .expect("run command")
}

fn run_cmd(temp: &TempDir, args: &[&str]) -> String {
    let output = run_raw(temp, args);
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(temp: &TempDir, args: &[&str]) -> Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let output = run_raw(temp, &full);
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("parse json")
}

fn write_config(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write config");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path).expect("metadata").permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms).expect("chmod");
    }
}

#[test]
fn cli_recovery_lookup_ignores_case() {
    let temp = TempDir::new().expect("temp dir");

    let created = run_cmd_json(
        &temp,
        &["user", "add", "--email", "alice@example.com", "--name", "Alice"],
    );
    assert_eq!(created["email"], "alice@example.com");

    let found = run_cmd_json(&temp, &["forgot-password", "lookup", "Alice@Example.COM"]);
    assert_eq!(found["id"], created["id"]);
    assert_eq!(found["display_name"], "Alice");

    let text = run_cmd(&temp, &["forgot-password", "lookup", "ALICE@EXAMPLE.COM"]);
    assert!(text.contains("email: alice@example.com"));
}

#[test]
fn cli_recovery_lookup_missing_user_exits_not_found() {
    let temp = TempDir::new().expect("temp dir");
    run_cmd(&temp, &["user", "add", "--email", "alice@example.com"]);

    let output = run_raw(&temp, &["forgot-password", "lookup", "Bob@Example.com"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("no account for bob@example.com"));
}

#[test]
fn cli_recovery_lookup_store_failure_exits_failure() {
    let temp = TempDir::new().expect("temp dir");
    run_cmd(&temp, &["user", "add", "--email", "alice@example.com"]);

    let conn = rusqlite::Connection::open(temp.path().join("lantern.sqlite3")).expect("open db");
    conn.execute_batch("DROP TABLE users;").expect("drop users");
    drop(conn);

    let output = run_raw(&temp, &["--verbose", "forgot-password", "lookup", "alice@example.com"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("user store unavailable"), "stderr: {stderr}");
}

#[test]
fn cli_completions_emit_bash_script() {
    let temp = TempDir::new().expect("temp dir");
    let script = run_cmd(&temp, &["completions", "bash"]);
    assert!(script.contains("lantern"));
}

#[test]
fn cli_user_add_rejects_duplicate_email() {
    let temp = TempDir::new().expect("temp dir");
    run_cmd(&temp, &["user", "add", "--email", "alice@example.com"]);

    let output = run_raw(&temp, &["user", "add", "--email", "ALICE@example.com"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn cli_site_reads_config_file() {
    let temp = TempDir::new().expect("temp dir");
    let config_path = temp.path().join("lantern.toml");
    write_config(
        &config_path,
        "[site]\napp_name = \"Beacon\"\npublic_url = \"https://beacon.example.com\"\n",
    );

    let site = run_cmd_json(
        &temp,
        &["--config", config_path.to_str().expect("config path"), "site"],
    );
    assert_eq!(site["app_name"], "Beacon");
    assert_eq!(site["public_url"], "https://beacon.example.com/");
}

#[test]
fn cli_site_defaults_without_config() {
    let temp = TempDir::new().expect("temp dir");
    let site = run_cmd_json(&temp, &["site"]);
    assert_eq!(site["app_name"], "Lantern");
}

#[test]
fn cli_consent_banner_only_mounts_in_browser() {
    let temp = TempDir::new().expect("temp dir");

    let browser = run_cmd_json(&temp, &["consent-banner", "--context", "browser"]);
    assert_eq!(browser["context"], "browser");
    assert!(browser["banner"]["message"].is_string());

    let server = run_cmd_json(&temp, &["consent-banner", "--context", "server"]);
    assert_eq!(server["context"], "server");
    assert!(server["banner"].is_null());
}

#[test]
fn cli_missing_config_file_is_invalid_input() {
    let temp = TempDir::new().expect("temp dir");
    let missing = temp.path().join("absent.toml");
    let output = run_raw(
        &temp,
        &["--config", missing.to_str().expect("config path"), "site"],
    );
    assert_eq!(output.status.code(), Some(3));
}
