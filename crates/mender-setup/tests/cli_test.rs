//! Integration tests for the `mender-setup` binary.
//!
//! Every run points the configuration and data directories at a fresh
//! temporary directory and answers prompts through piped stdin. No test
//! reaches the hosted service.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the binary with its directories under `root`.
fn setup_cmd(root: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("mender-setup");
    cmd.env("MENDER_CONF_DIR", root.join("conf"))
        .env("MENDER_DATASTORE_DIR", root.join("data"))
        .env_remove("RUST_LOG");
    cmd
}

fn written_config(root: &Path) -> Value {
    let text = std::fs::read_to_string(root.join("conf/mender.conf")).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn written_device_type(root: &Path) -> String {
    std::fs::read_to_string(root.join("data/device_type")).unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    let dir = tempfile::tempdir().unwrap();
    setup_cmd(dir.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("mender-configuration")
            .and(predicate::str::contains("--hosted-mender"))
            .and(predicate::str::contains("--server-ip")),
    );
}

#[test]
fn test_version_flag() {
    let dir = tempfile::tempdir().unwrap();
    setup_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mender-setup"));
}

#[test]
fn test_empty_flag_value_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    setup_cmd(dir.path())
        .arg("--device-type=")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("non-empty value"));
}

// ── Flag-only runs ──────────────────────────────────────────────────

#[test]
fn test_hosted_with_tenant_token() {
    let dir = tempfile::tempdir().unwrap();
    setup_cmd(dir.path())
        .args([
            "--quiet",
            "--device-type",
            "rpi3",
            "--hosted-mender",
            "--tenant-token",
            "my-tenant-token",
            "--demo-polling",
        ])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let data_store = dir.path().join("data");
    assert_eq!(
        written_config(dir.path()),
        json!({
            "DeviceTypeFile": data_store.join("device_type").to_string_lossy(),
            "UpdateControlMapExpirationTimeSeconds": 90,
            "UpdateControlMapBootExpirationTimeSeconds": 45,
            "UpdatePollIntervalSeconds": 5,
            "InventoryPollIntervalSeconds": 5,
            "RetryPollIntervalSeconds": 30,
            "TenantToken": "my-tenant-token",
            "Servers": [{ "ServerURL": "https://hosted.mender.io" }]
        })
    );
    assert_eq!(written_device_type(dir.path()), "device_type=rpi3\n");
}

#[test]
fn test_self_hosted_with_explicit_intervals() {
    let dir = tempfile::tempdir().unwrap();
    setup_cmd(dir.path())
        .args([
            "--quiet",
            "--device-type",
            "x1",
            "--demo-server=false",
            "--demo-polling=false",
            "--server-url",
            "https://acme.io",
            "--server-cert=",
            "--update-poll",
            "123",
            "--inventory-poll",
            "456",
            "--retry-poll",
            "789",
        ])
        .write_stdin("")
        .assert()
        .success();

    let config = written_config(dir.path());
    assert_eq!(config["Servers"], json!([{ "ServerURL": "https://acme.io" }]));
    assert_eq!(config["UpdatePollIntervalSeconds"], 123);
    assert_eq!(config["InventoryPollIntervalSeconds"], 456);
    assert_eq!(config["RetryPollIntervalSeconds"], 789);
    assert!(config.get("ServerCertificate").is_none());
    assert!(config.get("UpdateControlMapExpirationTimeSeconds").is_none());
    assert_eq!(written_device_type(dir.path()), "device_type=x1\n");
}

#[test]
fn test_existing_config_is_updated_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let conf_dir = dir.path().join("conf");
    std::fs::create_dir_all(&conf_dir).unwrap();
    std::fs::write(
        conf_dir.join("mender.conf"),
        r#"{"RootfsPartA": "/dev/mmcblk0p2", "ServerURL": "https://old.example.com",
            "DeviceTypeFile": "DEVICE_TYPE_FILE"}"#
            .replace("DEVICE_TYPE_FILE", &dir.path().join("identity").to_string_lossy()),
    )
    .unwrap();

    setup_cmd(dir.path())
        .args([
            "--quiet",
            "--device-type",
            "beaglebone",
            "--hosted-mender",
            "--tenant-token",
            "tt",
            "--demo-polling",
        ])
        .write_stdin("")
        .assert()
        .success();

    let config = written_config(dir.path());
    assert_eq!(config["RootfsPartA"], "/dev/mmcblk0p2");
    assert!(config.get("ServerURL").is_none());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("identity")).unwrap(),
        "device_type=beaglebone\n"
    );
}

#[cfg(unix)]
#[test]
fn test_config_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    setup_cmd(dir.path())
        .args([
            "--quiet",
            "--device-type",
            "rpi3",
            "--hosted-mender",
            "--tenant-token",
            "tt",
            "--demo-polling",
        ])
        .write_stdin("")
        .assert()
        .success();

    let mode = std::fs::metadata(dir.path().join("conf/mender.conf"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

// ── Interactive runs ────────────────────────────────────────────────

#[test]
fn test_interactive_self_hosted_defaults() {
    let dir = tempfile::tempdir().unwrap();
    setup_cmd(dir.path())
        .write_stdin("x1\nN\nN\nhttps://acme.mender.io/\n\nN\n\n\n\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Mender Client Setup")
                .and(predicate::str::contains("Mender setup successfully.")),
        );

    let config = written_config(dir.path());
    assert_eq!(
        config["Servers"],
        json!([{ "ServerURL": "https://acme.mender.io/" }])
    );
    assert_eq!(config["UpdatePollIntervalSeconds"], 1800);
    assert_eq!(config["InventoryPollIntervalSeconds"], 28800);
    assert_eq!(config["RetryPollIntervalSeconds"], 300);
    assert_eq!(written_device_type(dir.path()), "device_type=x1\n");
}

#[test]
fn test_quiet_hides_banner_but_still_prompts() {
    let dir = tempfile::tempdir().unwrap();
    setup_cmd(dir.path())
        .args(["--quiet", "--device-type", "x1", "--hosted-mender=false"])
        .write_stdin("n\nhttps://acme.io\n\nY\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Mender Client Setup")
                .not()
                .and(predicate::str::contains("Mender setup successfully.").not())
                .and(predicate::str::contains("demo server")),
        );

    let config = written_config(dir.path());
    assert_eq!(config["UpdatePollIntervalSeconds"], 5);
    assert_eq!(config["UpdateControlMapExpirationTimeSeconds"], 90);
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_url_and_ip_conflict_before_prompting() {
    let dir = tempfile::tempdir().unwrap();
    setup_cmd(dir.path())
        .args(["--server-url", "https://acme.io", "--server-ip", "10.0.0.2"])
        .write_stdin("")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Mender Client Setup").not())
        .stderr(predicate::str::contains("cannot be used together"));

    assert!(!dir.path().join("conf/mender.conf").exists());
}

#[test]
fn test_closed_stdin_fails() {
    let dir = tempfile::tempdir().unwrap();
    setup_cmd(dir.path())
        .args(["--quiet"])
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("standard input"));

    assert!(!dir.path().join("conf/mender.conf").exists());
}

#[test]
fn test_conflicting_verify_keys_in_config() {
    let dir = tempfile::tempdir().unwrap();
    let conf_dir = dir.path().join("conf");
    std::fs::create_dir_all(&conf_dir).unwrap();
    std::fs::write(
        conf_dir.join("mender.conf"),
        r#"{"ArtifactVerifyKey": "/a.pem", "ArtifactVerifyKeys": ["/b.pem"]}"#,
    )
    .unwrap();

    setup_cmd(dir.path())
        .args(["--quiet"])
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("ArtifactVerifyKey"));
}
