#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

/// Command with HOME pointed at `home` and no configured directory.
fn roulette(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("port-roulette").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("config_dir")
        .env_remove("RUST_LOG");
    cmd
}

fn fallback_file(home: &TempDir) -> PathBuf {
    home.path().join(".port-roulette-config.json")
}

fn query(home: &TempDir, input: &str) -> Value {
    let out = roulette(home).args(["query", input]).output().unwrap();
    assert!(out.status.success());
    serde_json::from_slice(&out.stdout).unwrap()
}

fn read_registry(path: &PathBuf) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

// ---------------------------------------------------------------------------
// query
// ---------------------------------------------------------------------------

#[test]
fn query_without_input_shows_usage() {
    let home = TempDir::new().unwrap();
    roulette(&home)
        .arg("query")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: port <project-name> or port reset"));
}

#[test]
fn query_proposes_without_saving() {
    let home = TempDir::new().unwrap();
    let out = query(&home, "api");
    let item = &out["items"][0];
    assert_eq!(item["title"], "Port 1169");
    assert_eq!(item["subtitle"], "New port for 'api'");
    assert_eq!(item["arg"], "save:api:1169");
    assert_eq!(item["valid"], true);
    assert!(!fallback_file(&home).exists());
}

#[test]
fn query_reports_conflicts() {
    let home = TempDir::new().unwrap();
    // "ef" hashes to 1080, a reserved SOCKS port
    let out = query(&home, "ef");
    assert_eq!(out["items"][0]["title"], "Port 10800");
    assert_eq!(out["items"][0]["subtitle"], "New port for 'ef' (conflicts: 1)");
}

#[test]
fn query_invalid_name_is_an_error_row() {
    let home = TempDir::new().unwrap();
    let out = query(&home, "1234");
    assert_eq!(out["items"][0]["title"], "Error");
    assert_eq!(
        out["items"][0]["subtitle"],
        "Invalid project name - no letters found"
    );
}

#[test]
fn query_malformed_token_is_an_error_row() {
    let home = TempDir::new().unwrap();
    let out = query(&home, "save:api:abc");
    assert_eq!(out["items"][0]["title"], "Error");
    assert!(!fallback_file(&home).exists());
}

#[test]
fn query_token_is_shown_not_saved() {
    let home = TempDir::new().unwrap();
    let out = query(&home, "save:foo:1025");
    let item = &out["items"][0];
    assert_eq!(item["title"], "Port 1025");
    assert_eq!(item["subtitle"], "Select to save port for 'foo'");
    assert_eq!(item["arg"], "save:foo:1025");
    assert!(!fallback_file(&home).exists());
}

#[test]
fn colliding_previews_both_save() {
    // "ab" and "l" both hash to 1036
    let home = TempDir::new().unwrap();
    assert_eq!(query(&home, "ab")["items"][0]["arg"], "save:ab:1036");
    assert_eq!(query(&home, "l")["items"][0]["arg"], "save:l:1036");

    roulette(&home).args(["save", "save:ab:1036"]).assert().success().stdout("1036\n");
    roulette(&home).args(["save", "save:l:1036"]).assert().success().stdout("1036\n");

    let registry = read_registry(&fallback_file(&home));
    assert_eq!(registry["projects"]["ab"], 1036);
    assert_eq!(registry["projects"]["l"], 1036);
    assert_eq!(registry["used_ports"], serde_json::json!([1036]));
}

// ---------------------------------------------------------------------------
// save
// ---------------------------------------------------------------------------

#[test]
fn save_then_query_reports_existing() {
    let home = TempDir::new().unwrap();
    roulette(&home)
        .args(["save", "save:api:1169"])
        .assert()
        .success()
        .stdout("1169\n");

    let registry = read_registry(&fallback_file(&home));
    assert_eq!(registry["projects"]["api"], 1169);
    assert_eq!(registry["used_ports"], serde_json::json!([1169]));

    let out = query(&home, "api");
    assert_eq!(out["items"][0]["subtitle"], "Existing port for 'api'");
    assert_eq!(out["items"][0]["arg"], "1169");
}

#[test]
fn save_is_first_wins() {
    let home = TempDir::new().unwrap();
    roulette(&home).args(["save", "save:api:1169"]).assert().success();
    roulette(&home)
        .args(["save", "save:api:2222"])
        .assert()
        .success()
        .stdout("1169\n");
    assert_eq!(read_registry(&fallback_file(&home))["projects"]["api"], 1169);
}

#[test]
fn save_passes_bare_ports_through() {
    let home = TempDir::new().unwrap();
    roulette(&home)
        .args(["save", "4521"])
        .assert()
        .success()
        .stdout("4521\n");
    assert!(!fallback_file(&home).exists());
}

#[test]
fn save_malformed_token() {
    let home = TempDir::new().unwrap();
    roulette(&home)
        .args(["save", "save:api:port"])
        .assert()
        .success()
        .stdout("Invalid argument format\n");
    assert!(!fallback_file(&home).exists());
}

#[test]
fn save_json_outcome() {
    let home = TempDir::new().unwrap();
    let out = roulette(&home)
        .args(["save", "save:myapp:4521", "--json"])
        .output()
        .unwrap();
    let value: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["outcome"], "confirmed");
    assert_eq!(value["port"], 4521);
}

// ---------------------------------------------------------------------------
// reset / list / extract
// ---------------------------------------------------------------------------

#[test]
fn reset_via_query_and_subcommand() {
    let home = TempDir::new().unwrap();
    roulette(&home).args(["save", "save:api:1169"]).assert().success();

    let out = query(&home, "reset");
    assert_eq!(out["items"][0]["title"], "Database Reset");
    assert_eq!(
        read_registry(&fallback_file(&home)),
        serde_json::json!({"projects": {}, "used_ports": []})
    );

    roulette(&home).args(["save", "save:web:2352"]).assert().success();
    roulette(&home)
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("reset to default state"));
    assert_eq!(
        read_registry(&fallback_file(&home)),
        serde_json::json!({"projects": {}, "used_ports": []})
    );
}

#[test]
fn list_shows_assignments() {
    let home = TempDir::new().unwrap();
    roulette(&home).args(["save", "save:web:2352"]).assert().success();
    roulette(&home).args(["save", "save:api:1169"]).assert().success();

    roulette(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("PORT"))
        .stdout(predicate::str::contains("api"))
        .stdout(predicate::str::contains("2352"));

    let out = roulette(&home).args(["list", "--json"]).output().unwrap();
    let value: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["projects"]["web"], 2352);
}

#[test]
fn list_empty_registry() {
    let home = TempDir::new().unwrap();
    roulette(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No ports assigned."));
}

#[test]
fn extract_port_from_token() {
    let home = TempDir::new().unwrap();
    roulette(&home)
        .args(["extract", "save:api:1169"])
        .assert()
        .success()
        .stdout("1169\n");
    roulette(&home)
        .args(["extract", "8080"])
        .assert()
        .success()
        .stdout("8080\n");
}

// ---------------------------------------------------------------------------
// config dir
// ---------------------------------------------------------------------------

#[test]
fn config_dir_env_is_honoured() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("www/_vscode");
    roulette(&home)
        .env("config_dir", &dir)
        .args(["save", "save:api:1169"])
        .assert()
        .success();

    assert!(dir.join("port-roulette-config.json").exists());
    assert!(!fallback_file(&home).exists());
}

#[test]
fn unusable_config_dir_falls_back_to_home() {
    let home = TempDir::new().unwrap();
    let blocker = home.path().join("blocker");
    std::fs::write(&blocker, b"x").unwrap();

    roulette(&home)
        .args(["--config-dir"])
        .arg(blocker.join("sub"))
        .args(["save", "save:api:1169"])
        .assert()
        .success()
        .stdout("1169\n");

    assert_eq!(read_registry(&fallback_file(&home))["projects"]["api"], 1169);
}

#[test]
fn corrupt_registry_does_not_break_query() {
    let home = TempDir::new().unwrap();
    std::fs::write(fallback_file(&home), b"{ definitely not json").unwrap();
    let out = query(&home, "api");
    assert_eq!(out["items"][0]["title"], "Port 1169");
}
