//! Integration tests for the `dk` CLI.
//!
//! Each test runs `dk` as a subprocess inside a temp directory, with the
//! config directory pointed into it, and checks stdout, stderr and files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{Local, TimeDelta};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn dk_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_dk"))
}

/// Run `dk` in `dir`, return (stdout, stderr, success).
fn run_dk(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(dk_bin())
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("config"))
        .env("HOME", dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run dk");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `dk` expecting success, return stdout.
fn run_dk_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_dk(dir, args);
    if !success {
        panic!("dk {:?} failed:\nstdout: {}\nstderr: {}", args, stdout, stderr);
    }
    stdout
}

/// Run `dk` expecting failure, return stderr.
fn run_dk_err(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_dk(dir, args);
    if success {
        panic!("dk {:?} unexpectedly succeeded:\nstdout: {}", args, stdout);
    }
    stderr
}

fn json(out: &str) -> serde_json::Value {
    serde_json::from_str(out).expect("stdout is not JSON")
}

// ---------------------------------------------------------------------------
// Deadlines
// ---------------------------------------------------------------------------

#[test]
fn test_deadline_add_and_list() {
    let tmp = TempDir::new().unwrap();
    run_dk_ok(tmp.path(), &["deadline", "add", "Thesis", "2099-12-31", "--days", "30"]);

    let out = run_dk_ok(tmp.path(), &["deadline", "list"]);
    assert!(out.contains("Thesis"));
    assert!(out.contains("31.12.2099 23:59"));
    assert!(out.contains("30d"));
    assert!(tmp.path().join("deadlines.json").exists());
}

#[test]
fn test_deadline_add_with_year_and_time() {
    let tmp = TempDir::new().unwrap();
    run_dk_ok(
        tmp.path(),
        &["deadline", "add", "Taxes", "04-15", "--year", "2099", "--time", "09:30"],
    );
    let out = run_dk_ok(tmp.path(), &["deadline", "--json"]);
    let rows = json(&out);
    assert_eq!(rows[0]["deadline"], "2099-04-15T09:30:00");
    assert_eq!(rows[0]["days_needed"], serde_json::Value::Null);
}

#[test]
fn test_deadline_rejects_past_date() {
    let tmp = TempDir::new().unwrap();
    let err = run_dk_err(tmp.path(), &["deadline", "add", "Old", "2000-01-01"]);
    assert!(err.contains("future"));
    assert!(!tmp.path().join("deadlines.json").exists());
}

#[test]
fn test_deadline_rejects_bad_days_needed() {
    let tmp = TempDir::new().unwrap();
    let err = run_dk_err(tmp.path(), &["deadline", "add", "X", "2099-01-01", "--days", "0"]);
    assert!(err.contains("positive"));
    let err = run_dk_err(tmp.path(), &["deadline", "add", "X", "2099-01-01", "--days", "2.5"]);
    assert!(err.contains("whole number"));
}

#[test]
fn test_deadline_list_is_sorted_and_rm_uses_display_order() {
    let tmp = TempDir::new().unwrap();
    run_dk_ok(tmp.path(), &["deadline", "add", "Later", "2099-06-01"]);
    run_dk_ok(tmp.path(), &["deadline", "add", "Sooner", "2098-06-01"]);

    let rows = json(&run_dk_ok(tmp.path(), &["deadline", "list", "--json"]));
    assert_eq!(rows[0]["name"], "Sooner");
    assert_eq!(rows[1]["name"], "Later");

    let out = run_dk_ok(tmp.path(), &["deadline", "rm", "0"]);
    assert!(out.contains("Sooner"));
    let rows = json(&run_dk_ok(tmp.path(), &["deadline", "list", "--json"]));
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["name"], "Later");
}

#[test]
fn test_deadline_edit_keeps_unspecified_fields() {
    let tmp = TempDir::new().unwrap();
    run_dk_ok(tmp.path(), &["deadline", "add", "Draft", "2099-03-01", "--days", "5"]);
    run_dk_ok(tmp.path(), &["deadline", "edit", "0", "--name", "Final"]);

    let rows = json(&run_dk_ok(tmp.path(), &["deadline", "list", "--json"]));
    assert_eq!(rows[0]["name"], "Final");
    assert_eq!(rows[0]["deadline"], "2099-03-01T23:59:00");
    assert_eq!(rows[0]["days_needed"], 5);

    run_dk_ok(tmp.path(), &["deadline", "edit", "0", "--clear-days"]);
    let rows = json(&run_dk_ok(tmp.path(), &["deadline", "list", "--json"]));
    assert_eq!(rows[0]["days_needed"], serde_json::Value::Null);
}

#[test]
fn test_deadline_edit_short_date_keeps_year() {
    let tmp = TempDir::new().unwrap();
    run_dk_ok(tmp.path(), &["deadline", "add", "Far", "2099-03-01", "--time", "10:00"]);
    run_dk_ok(tmp.path(), &["deadline", "edit", "0", "--date", "12-25"]);
    let rows = json(&run_dk_ok(tmp.path(), &["deadline", "list", "--json"]));
    assert_eq!(rows[0]["deadline"], "2099-12-25T10:00:00");

    run_dk_ok(tmp.path(), &["deadline", "edit", "0", "--year", "2098"]);
    let rows = json(&run_dk_ok(tmp.path(), &["deadline", "list", "--json"]));
    assert_eq!(rows[0]["deadline"], "2098-12-25T10:00:00");
}

#[test]
fn test_deadline_rm_out_of_range() {
    let tmp = TempDir::new().unwrap();
    let err = run_dk_err(tmp.path(), &["deadline", "rm", "3"]);
    assert!(err.contains("no deadline at index 3"));
}

#[test]
fn test_watch_once_flags_urgent_and_notifies() {
    let tmp = TempDir::new().unwrap();
    let soon = (Local::now().naive_local() + TimeDelta::days(2))
        .format("%Y-%m-%d")
        .to_string();
    run_dk_ok(tmp.path(), &["deadline", "add", "Report", &soon, "--days", "7"]);

    let (stdout, stderr, success) = run_dk(tmp.path(), &["deadline", "watch", "--once", "--json"]);
    assert!(success, "stderr: {}", stderr);
    let rows = json(&stdout);
    assert_eq!(rows[0]["urgent"], true);
    assert_eq!(rows[0]["overdue"], false);
    assert!(stderr.contains("Urgent deadline!"));
    assert!(stderr.contains("Report"));
}

#[test]
fn test_corrupt_deadline_file_is_backed_up() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("deadlines.json"), "{ not an array").unwrap();
    let out = run_dk_ok(tmp.path(), &["deadline", "list"]);
    assert!(out.contains("No deadlines"));
    assert!(tmp.path().join("deadlines.json.bak").exists());
}

// ---------------------------------------------------------------------------
// Lists, items and trash
// ---------------------------------------------------------------------------

#[test]
fn test_item_commands_need_an_open_file() {
    let tmp = TempDir::new().unwrap();
    let err = run_dk_err(tmp.path(), &["item", "add", "1", "milk"]);
    assert!(err.contains("no list file open"));
}

#[test]
fn test_file_new_and_items() {
    let tmp = TempDir::new().unwrap();
    run_dk_ok(tmp.path(), &["file", "new", "shop.json"]);
    run_dk_ok(tmp.path(), &["item", "add", "1", "  milk  "]);
    run_dk_ok(tmp.path(), &["item", "add", "1", "eggs"]);
    run_dk_ok(tmp.path(), &["item", "up", "1", "1"]);

    let doc = json(&run_dk_ok(tmp.path(), &["list", "show", "--json"]));
    assert_eq!(doc["lists"][0]["name"], "1");
    assert_eq!(doc["lists"][0]["items"], serde_json::json!(["eggs", "milk"]));

    let on_disk = json(&fs::read_to_string(tmp.path().join("shop.json")).unwrap());
    assert_eq!(on_disk["lists"]["1"], serde_json::json!(["eggs", "milk"]));
    assert_eq!(on_disk["trash"], serde_json::json!([]));
}

#[test]
fn test_move_up_at_top_is_noop() {
    let tmp = TempDir::new().unwrap();
    run_dk_ok(tmp.path(), &["file", "new", "a.json"]);
    run_dk_ok(tmp.path(), &["item", "add", "1", "first"]);
    let out = run_dk_ok(tmp.path(), &["item", "up", "1", "0"]);
    assert!(out.contains("already in place"));
}

#[test]
fn test_list_lifecycle_and_trash() {
    let tmp = TempDir::new().unwrap();
    run_dk_ok(tmp.path(), &["file", "new", "a.json"]);
    run_dk_ok(tmp.path(), &["list", "new", "Groceries"]);
    run_dk_ok(tmp.path(), &["item", "add", "Groceries", "milk"]);
    run_dk_ok(tmp.path(), &["item", "add", "Groceries", "bread"]);
    run_dk_ok(tmp.path(), &["list", "rename", "Groceries", "Shop"]);
    run_dk_ok(tmp.path(), &["item", "rm", "Shop", "0"]);

    let out = run_dk_ok(tmp.path(), &["trash"]);
    assert!(out.contains("milk (from 'Shop')"));

    run_dk_ok(tmp.path(), &["list", "rm", "Shop"]);
    let trash = json(&run_dk_ok(tmp.path(), &["trash", "show", "--json"]));
    assert_eq!(trash.as_array().unwrap().len(), 2);
    assert_eq!(trash[1]["original_index"], -1);

    let out = run_dk_ok(tmp.path(), &["trash", "restore", "0"]);
    assert!(out.contains("restored to '1'"));

    let out = run_dk_ok(tmp.path(), &["trash", "clear"]);
    assert!(out.contains("removed 1 item(s)"));
}

#[test]
fn test_cannot_delete_last_list() {
    let tmp = TempDir::new().unwrap();
    run_dk_ok(tmp.path(), &["file", "new", "a.json"]);
    let err = run_dk_err(tmp.path(), &["list", "rm", "1"]);
    assert!(err.contains("only list"));
}

#[test]
fn test_duplicate_list_name_rejected() {
    let tmp = TempDir::new().unwrap();
    run_dk_ok(tmp.path(), &["file", "new", "a.json"]);
    run_dk_ok(tmp.path(), &["list", "new", "B"]);
    let err = run_dk_err(tmp.path(), &["list", "new", "B"]);
    assert!(err.contains("already exists"));
}

#[test]
fn test_item_mv_and_reorder() {
    let tmp = TempDir::new().unwrap();
    run_dk_ok(tmp.path(), &["file", "new", "a.json"]);
    run_dk_ok(tmp.path(), &["list", "new", "B"]);
    for item in ["a", "b", "c"] {
        run_dk_ok(tmp.path(), &["item", "add", "1", item]);
    }
    run_dk_ok(tmp.path(), &["item", "reorder", "1", "2", "0"]);
    run_dk_ok(tmp.path(), &["item", "mv", "1", "1", "B"]);

    let doc = json(&run_dk_ok(tmp.path(), &["list", "--json"]));
    assert_eq!(doc["lists"][0]["items"], serde_json::json!(["c", "b"]));
    assert_eq!(doc["lists"][1]["items"], serde_json::json!(["a"]));
}

// ---------------------------------------------------------------------------
// Files, import and export
// ---------------------------------------------------------------------------

#[test]
fn test_open_switch_close() {
    let tmp = TempDir::new().unwrap();
    run_dk_ok(tmp.path(), &["file", "new", "a.json"]);
    run_dk_ok(tmp.path(), &["item", "add", "1", "from a"]);
    run_dk_ok(tmp.path(), &["file", "new", "b.json"]);

    let files = json(&run_dk_ok(tmp.path(), &["file", "list", "--json"]));
    assert_eq!(files.as_array().unwrap().len(), 2);
    assert!(files[0]["path"].as_str().unwrap().ends_with("b.json"));
    assert_eq!(files[0]["active"], true);

    run_dk_ok(tmp.path(), &["file", "switch", "a.json"]);
    let doc = json(&run_dk_ok(tmp.path(), &["list", "--json"]));
    assert_eq!(doc["lists"][0]["items"], serde_json::json!(["from a"]));

    run_dk_ok(tmp.path(), &["file", "close"]);
    let files = json(&run_dk_ok(tmp.path(), &["file", "--json"]));
    assert_eq!(files.as_array().unwrap().len(), 1);
    assert!(files[0]["path"].as_str().unwrap().ends_with("b.json"));

    run_dk_ok(tmp.path(), &["file", "close", "b.json"]);
    let out = run_dk_ok(tmp.path(), &["file"]);
    assert!(out.contains("No files open"));
}

#[test]
fn test_open_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    let err = run_dk_err(tmp.path(), &["file", "open", "missing.json"]);
    assert!(err.contains("missing.json"));
}

#[test]
fn test_import_and_export() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("in.txt"), "alpha\n\n  beta  \n").unwrap();
    let out = run_dk_ok(tmp.path(), &["import", "in.txt", "imported.json"]);
    assert!(out.contains("imported 2 item(s)"));

    let doc = json(&fs::read_to_string(tmp.path().join("imported.json")).unwrap());
    assert_eq!(doc["lists"], serde_json::json!({"1": ["alpha", "beta"]}));

    run_dk_ok(tmp.path(), &["export", "1", "out.txt"]);
    assert_eq!(
        fs::read_to_string(tmp.path().join("out.txt")).unwrap(),
        "alpha\nbeta\n"
    );
}

#[test]
fn test_import_json_output_with_global_json_flag() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("in.txt"), "one\n").unwrap();
    run_dk_ok(tmp.path(), &["--json", "import", "in.txt", "out.json"]);
    let doc = json(&fs::read_to_string(tmp.path().join("out.json")).unwrap());
    assert_eq!(doc["lists"], serde_json::json!({"1": ["one"]}));
}

#[test]
fn test_import_refuses_to_overwrite_without_force() {
    let tmp = TempDir::new().unwrap();
    run_dk_ok(tmp.path(), &["file", "new", "keep.json"]);
    run_dk_ok(tmp.path(), &["item", "add", "1", "precious"]);
    fs::write(tmp.path().join("in.txt"), "a\nb\n").unwrap();

    let err = run_dk_err(tmp.path(), &["import", "in.txt", "keep.json"]);
    assert!(err.contains("already exists"));
    let on_disk = json(&fs::read_to_string(tmp.path().join("keep.json")).unwrap());
    assert_eq!(on_disk["lists"]["1"], serde_json::json!(["precious"]));
    let doc = json(&run_dk_ok(tmp.path(), &["list", "--json"]));
    assert_eq!(doc["lists"][0]["items"], serde_json::json!(["precious"]));

    run_dk_ok(tmp.path(), &["import", "in.txt", "keep.json", "--force"]);
    let on_disk = json(&fs::read_to_string(tmp.path().join("keep.json")).unwrap());
    assert_eq!(on_disk["lists"]["1"], serde_json::json!(["a", "b"]));
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn test_config_path_and_init() {
    let tmp = TempDir::new().unwrap();
    let out = run_dk_ok(tmp.path(), &["config", "path"]);
    let expected = tmp.path().join("config").join("docket").join("config.toml");
    assert_eq!(out.trim(), expected.to_string_lossy());

    run_dk_ok(tmp.path(), &["config", "init"]);
    let content = fs::read_to_string(&expected).unwrap();
    assert!(content.contains("refresh_interval_secs = 60"));

    let err = run_dk_err(tmp.path(), &["config", "init"]);
    assert!(err.contains("--force"));
    run_dk_ok(tmp.path(), &["config", "init", "--force"]);
}

#[test]
fn test_config_changes_deadline_file() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("custom.toml");
    fs::write(&config, "[deadlines]\nfile = \"mine.json\"\n").unwrap();
    let config_arg = config.to_string_lossy().to_string();
    run_dk_ok(
        tmp.path(),
        &["--config", &config_arg, "deadline", "add", "X", "2099-01-01"],
    );
    assert!(tmp.path().join("mine.json").exists());
    assert!(!tmp.path().join("deadlines.json").exists());
}
