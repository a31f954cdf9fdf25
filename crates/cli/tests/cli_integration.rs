//! CLI integration tests for all subcommands.
//!
//! Uses `assert_cmd` to spawn the `tafweed` binary and verify
//! exit codes, stdout content, and stderr content.
//!
//! Every test runs inside its own temporary directory, which doubles as the
//! data directory, so no state leaks between tests.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper: a `tafweed` command rooted in `dir` with `--data-dir` pointing at it.
fn tafweed(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("tafweed");
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(dir.path().join("data"));
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).expect("stdout is JSON")
}

fn create_license(dir: &TempDir) -> String {
    let v = json_stdout(tafweed(dir).args([
        "--output",
        "json",
        "create",
        "--service",
        "drv-license",
        "--delegate-id",
        "1098765432",
        "--delegate-name",
        "Reem",
        "--phone",
        "0551234567",
    ]));
    v["id"].as_str().unwrap().to_string()
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    let dir = TempDir::new().unwrap();
    tafweed(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Manage time-boxed service delegations"));
}

#[test]
fn version_exits_0() {
    let dir = TempDir::new().unwrap();
    tafweed(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tafweed"));
}

// ──────────────────────────────────────────────
// 2. Services
// ──────────────────────────────────────────────

#[test]
fn services_filtered_by_platform() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(tafweed(&dir).args(["--output", "json", "services", "--platform", "najiz"]));
    let ids: Vec<_> = v
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["court-rep", "notary", "document-drop"]);
}

#[test]
fn services_search_text() {
    let dir = TempDir::new().unwrap();
    tafweed(&dir)
        .args(["services", "--search", "passport"])
        .assert()
        .success()
        .stdout(predicate::str::contains("passport-delivery"))
        .stdout(predicate::str::contains("drv-license").not());
}

#[test]
fn unknown_platform_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    tafweed(&dir)
        .args(["services", "--platform", "tawakkalna"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown platform"));
}

// ──────────────────────────────────────────────
// 3. Listing and seeds
// ──────────────────────────────────────────────

#[test]
fn first_run_lists_seed_set() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(tafweed(&dir).args(["--output", "json", "list"]));
    assert_eq!(v.as_array().unwrap().len(), 5);
    assert!(dir.path().join("data/absher-delegations.json").is_file());
}

#[test]
fn delegate_inbox_hides_archived_seed() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(tafweed(&dir).args([
        "--output", "json", "list", "--as", "delegate", "--view", "inbox",
    ]));
    let ids: Vec<_> = v
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids.len(), 4);
    assert!(!ids.contains(&"del-1004".to_string()));
}

#[test]
fn list_by_status() {
    let dir = TempDir::new().unwrap();
    tafweed(&dir)
        .args(["list", "--status", "expired"])
        .assert()
        .success()
        .stdout(predicate::str::contains("del-1005"))
        .stdout(predicate::str::contains("del-1001").not());
}

#[test]
fn show_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    tafweed(&dir)
        .args(["show", "del-nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn show_json_includes_actions() {
    let dir = TempDir::new().unwrap();
    let id = create_license(&dir);
    let v = json_stdout(tafweed(&dir).args(["--output", "json", "show", &id, "--as", "delegate"]));
    assert_eq!(v["status"], "pending");
    assert_eq!(v["availableActions"]["accept"], true);
}

#[test]
fn show_hides_decisions_once_window_ended() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(tafweed(&dir).args(["--output", "json", "show", "del-1002", "--as", "delegate"]));
    assert_eq!(v["status"], "pending");
    assert_eq!(v["availableActions"]["accept"], false);
    assert_eq!(v["availableActions"]["archive"], true);
}

// ──────────────────────────────────────────────
// 4. Create and decide
// ──────────────────────────────────────────────

#[test]
fn create_then_accept() {
    let dir = TempDir::new().unwrap();
    let id = create_license(&dir);
    assert!(id.starts_with("del-"));

    let v = json_stdout(tafweed(&dir).args(["--output", "json", "accept", &id, "--accept-terms"]));
    assert_eq!(v["status"], "active");
    assert_eq!(v["delegateStatus"], "accepted");
    assert_eq!(v["delegateAcceptedTerms"], true);
    assert!(v["delegateAcceptedAt"].is_string());
}

#[test]
fn accept_without_terms_fails_with_kind() {
    let dir = TempDir::new().unwrap();
    let id = create_license(&dir);
    let out = tafweed(&dir)
        .args(["--output", "json", "accept", &id])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let err: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(err["kind"], "illegal_transition");
}

#[test]
fn reject_twice_fails() {
    let dir = TempDir::new().unwrap();
    let id = create_license(&dir);
    tafweed(&dir).args(["reject", &id]).assert().success();
    tafweed(&dir)
        .args(["reject", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already decided"));
}

#[test]
fn decision_after_window_end_fails() {
    let dir = TempDir::new().unwrap();
    tafweed(&dir)
        .args(["accept", "del-1002", "--accept-terms"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("window ended"));
}

#[test]
fn custom_without_end_is_invalid_input() {
    let dir = TempDir::new().unwrap();
    let out = tafweed(&dir)
        .args([
            "--output",
            "json",
            "create",
            "--service",
            "court-rep",
            "--delegate-id",
            "1098765432",
            "--delegate-name",
            "Reem",
            "--phone",
            "0551234567",
        ])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let err: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(err["kind"], "invalid_input");
}

#[test]
fn create_with_explicit_window() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(tafweed(&dir).args([
        "--output",
        "json",
        "create",
        "--service",
        "vehicle-auth",
        "--delegate-id",
        "1098765432",
        "--delegate-name",
        "Reem",
        "--phone",
        "0551234567",
        "--start",
        "2030-01-01T00:00:00Z",
    ]));
    assert_eq!(v["durationType"], "7d");
    assert_eq!(v["endAt"], "2030-01-08T00:00:00Z");
}

#[test]
fn create_by_platform_preselects_first_service() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(tafweed(&dir).args([
        "--output",
        "json",
        "create",
        "--platform",
        "absherBusiness",
        "--delegate-id",
        "1098765432",
        "--delegate-name",
        "Reem",
        "--phone",
        "0551234567",
    ]));
    assert_eq!(v["serviceId"], "absherbiz-auth");
    assert_eq!(v["durationType"], "7d");
}

#[test]
fn create_needs_service_or_platform() {
    let dir = TempDir::new().unwrap();
    tafweed(&dir)
        .args([
            "create",
            "--delegate-id",
            "1098765432",
            "--delegate-name",
            "Reem",
            "--phone",
            "0551234567",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--service"));
}

#[test]
fn bad_phone_rejected() {
    let dir = TempDir::new().unwrap();
    tafweed(&dir)
        .args([
            "create",
            "--service",
            "drv-license",
            "--delegate-id",
            "1098765432",
            "--delegate-name",
            "Reem",
            "--phone",
            "12345",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("05xxxxxxxx"));
}

// ──────────────────────────────────────────────
// 5. Visibility
// ──────────────────────────────────────────────

#[test]
fn grantor_delete_keeps_delegate_view() {
    let dir = TempDir::new().unwrap();
    tafweed(&dir).args(["delete", "del-1003"]).assert().success();

    tafweed(&dir)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("del-1003").not());
    tafweed(&dir)
        .args(["list", "--as", "delegate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("del-1003"));
}

#[test]
fn archive_and_undo() {
    let dir = TempDir::new().unwrap();
    tafweed(&dir).args(["archive", "del-1001"]).assert().success();
    tafweed(&dir)
        .args(["list", "--view", "archived"])
        .assert()
        .success()
        .stdout(predicate::str::contains("del-1001"));
    tafweed(&dir).args(["archive", "del-1001", "--undo"]).assert().success();
    tafweed(&dir)
        .args(["list", "--view", "archived"])
        .assert()
        .success()
        .stdout(predicate::str::contains("del-1001").not());
}

// ──────────────────────────────────────────────
// 6. Sweep, stats, validate
// ──────────────────────────────────────────────

#[test]
fn sweep_closes_past_windows_once() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(tafweed(&dir).args(["--output", "json", "sweep"]));
    let changed = v["changed"].as_array().unwrap();
    assert_eq!(changed.len(), 2);
    assert_eq!(changed[0]["id"], "del-1001");
    assert_eq!(changed[0]["status"], "completed");
    assert_eq!(changed[1]["status"], "expired");

    let v = json_stdout(tafweed(&dir).args(["--output", "json", "sweep"]));
    assert!(v["changed"].as_array().unwrap().is_empty());
}

#[test]
fn stats_over_seed_set() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(tafweed(&dir).args(["--output", "json", "stats"]));
    assert_eq!(v["summary"]["total"], 5);
    assert_eq!(v["analytics"]["successRate"], 40);
    assert_eq!(v["latest"].as_array().unwrap().len(), 3);
}

#[test]
fn validate_stored_collection() {
    let dir = TempDir::new().unwrap();
    create_license(&dir);
    tafweed(&dir)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn corrupt_collection_reported() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("data/absher-delegations.json"), "{oops").unwrap();
    tafweed(&dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid"));
}

// ──────────────────────────────────────────────
// 7. Assistant
// ──────────────────────────────────────────────

#[test]
fn detect_english_request() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(tafweed(&dir).args([
        "--output",
        "json",
        "detect",
        "24 hour driving license pickup",
    ]));
    assert_eq!(v["serviceId"], "drv-license");
    assert_eq!(v["platform"], "absher");
    assert_eq!(v["durationType"], "24h");
}

#[test]
fn detect_explain_lists_rules() {
    let dir = TempDir::new().unwrap();
    tafweed(&dir)
        .args(["detect", "--explain", "تفويض خدمة في ناجز"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PlatformKeyword"))
        .stdout(predicate::str::contains("=> service=document-drop"));
}

#[test]
fn chat_drafts_and_creates() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(tafweed(&dir).args([
        "--output",
        "json",
        "chat",
        "--lang",
        "en",
        "-m",
        "passport delivery for a week",
        "--delegate-name",
        "Reem",
        "--delegate-id",
        "1098765432",
        "--create",
    ]));
    assert_eq!(v["draft"]["serviceId"], "passport-delivery");
    assert_eq!(v["draft"]["durationType"], "7d");
    assert_eq!(v["created"]["delegatePhone"], "0550000000");
    let last = v["messages"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["text"], "Delegation created and sent to the delegate.");

    let list = json_stdout(tafweed(&dir).args(["--output", "json", "list"]));
    assert_eq!(list.as_array().unwrap().len(), 6);
}

#[test]
fn chat_reads_stdin_and_asks_for_delegate() {
    let dir = TempDir::new().unwrap();
    tafweed(&dir)
        .args(["chat", "--lang", "en"])
        .write_stdin("driving license pickup\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Share delegate name and ID/phone"));
}

#[test]
fn chat_without_input_offers_suggestions() {
    let dir = TempDir::new().unwrap();
    let out = tafweed(&dir)
        .args(["--output", "json", "chat"])
        .write_stdin("")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["suggestions"].as_array().unwrap().len(), 3);
    assert_eq!(v["messages"].as_array().unwrap().len(), 1);

    tafweed(&dir)
        .args(["chat", "-m", "passport"])
        .assert()
        .success()
        .stdout(predicate::str::contains("try:").not());
}

#[test]
fn chat_create_without_delegate_fails() {
    let dir = TempDir::new().unwrap();
    tafweed(&dir)
        .args(["chat", "-m", "passport", "--create"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("delegateName"));
}

// ──────────────────────────────────────────────
// 8. Preferences and config
// ──────────────────────────────────────────────

#[test]
fn prefs_default_then_change() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(tafweed(&dir).args(["--output", "json", "prefs"]));
    assert_eq!(v["language"], "ar");
    assert_eq!(v["largeText"], false);

    tafweed(&dir).args(["prefs", "language", "en"]).assert().success();
    let v = json_stdout(tafweed(&dir).args(["--output", "json", "prefs", "toggle", "high-contrast"]));
    assert_eq!(v["language"], "en");
    assert_eq!(v["highContrast"], true);
    assert!(dir.path().join("data/absher-settings.json").is_file());
}

#[test]
fn prefs_language_without_value_switches() {
    let dir = TempDir::new().unwrap();
    tafweed(&dir)
        .args(["prefs", "language"])
        .assert()
        .success()
        .stdout(predicate::str::contains("language       en (ltr)"));
    tafweed(&dir)
        .args(["prefs", "language"])
        .assert()
        .success()
        .stdout(predicate::str::contains("language       ar (rtl)"));
}

#[test]
fn english_preference_drives_text_labels() {
    let dir = TempDir::new().unwrap();
    tafweed(&dir).args(["prefs", "language", "en"]).assert().success();
    tafweed(&dir)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Driving license pickup"));
}

#[test]
fn config_file_sets_identity() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tafweed.toml"),
        "[identity]\ngrantor_id = \"someone-else\"\n",
    )
    .unwrap();
    let v = json_stdout(tafweed(&dir).args(["--output", "json", "list"]));
    assert!(v.as_array().unwrap().is_empty());
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    tafweed(&dir)
        .args(["--config", "nope.toml", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not read"));
}

#[test]
fn quiet_suppresses_errors() {
    let dir = TempDir::new().unwrap();
    tafweed(&dir)
        .args(["--quiet", "reject", "del-missing"])
        .assert()
        .failure()
        .stderr(predicate::str::is_empty());
}
