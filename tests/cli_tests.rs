mod common;

use std::process::Command;

fn restmapper() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_restmapper"));
    cmd.env_remove("RUST_LOG").env("RESTMAPPER_LOG_LEVEL", "error");
    cmd
}

#[test]
fn test_cli_inspect() {
    let file = common::manifest_file(common::BOOKSTORE_YAML, "yaml");
    let output = restmapper()
        .arg("inspect")
        .arg("--manifest")
        .arg(file.path())
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("[mappings] count=6"), "{stdout}");
    assert!(stdout.contains("-> get_chapter"), "{stdout}");
}

#[test]
fn test_cli_match_json() {
    let file = common::manifest_file(common::BOOKSTORE_YAML, "yaml");
    let output = restmapper()
        .args(["match", "--method", "GET", "--path", "/archive/by-date/2024-06-01", "--json"])
        .arg("--manifest")
        .arg(file.path())
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["handler"], "archive_day");
    assert_eq!(report["bindings"]["year"], "2024");
    assert_eq!(report["bindings"]["day"], "01");
}

#[test]
fn test_cli_match_miss_exits_nonzero() {
    let file = common::manifest_file(common::BOOKSTORE_YAML, "yaml");
    let output = restmapper()
        .args(["match", "--method", "PATCH", "--path", "/books/1"])
        .arg("--manifest")
        .arg(file.path())
        .output()
        .expect("run cli");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_cli_bad_manifest_fails() {
    let file = common::manifest_file("routes: [ {template: '/a/{', method: GET, handler: h} ]", "yaml");
    let output = restmapper()
        .arg("inspect")
        .arg("--manifest")
        .arg(file.path())
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid URL template"), "{stderr}");
}
