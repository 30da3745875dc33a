//! End-to-end runs of the `planner` binary against temp board files.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn planner(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_planner"));
    // Keep the user's real config out of the run.
    cmd.env("PLANNER_CONFIG", dir.path().join("config.json"));
    cmd
}

fn run(dir: &TempDir, args: &[&str]) -> Output {
    let output = planner(dir).args(args).output().unwrap();
    assert!(output.status.success(), "{:?} failed: {:?}", args, output);
    output
}

fn run_with_input(dir: &TempDir, args: &[&str], input: &str) -> Output {
    let mut child = planner(dir)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn board_json(file: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(file).unwrap()).unwrap()
}

#[test]
fn cli_new_show_and_edit() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("board.plnpro");
    let f = file.to_str().unwrap();

    run(&dir, &["new", f, "--title", "Sprint 1"]);
    run(&dir, &["add-list", f, "Done"]);
    run(&dir, &["add-card", f, "To Do", "Review PR", "--description", "Two approvals"]);
    run(&dir, &["add-checklist", f, "To Do", "Review PR", "Steps"]);
    run(&dir, &["add-item", f, "To Do", "Review PR", "Steps", "Read diff"]);
    run(&dir, &["check", f, "To Do", "Review PR", "Steps", "Read diff"]);
    run(&dir, &["move-card", f, "To Do", "Review PR", "--to", "Done"]);

    let shown = stdout(&run(&dir, &["show", f]));
    assert!(shown.starts_with("Sprint 1\n"));
    assert!(shown.contains("## Done (1)"));
    assert!(shown.contains("Review PR ["));
    assert!(shown.contains(" 1/1 +notes"));

    let json = board_json(&file);
    assert_eq!(json["lists"][1]["cards"][0]["description"], "Two approvals");
    assert_eq!(json["lists"][1]["cards"][0]["checklists"][0]["items"][0]["done"], true);
}

#[test]
fn cli_new_refuses_existing_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("board.plnpro");
    let f = file.to_str().unwrap();

    run(&dir, &["new", f]);
    let output = planner(&dir).args(["new", f]).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));
    run(&dir, &["new", f, "--force"]);
}

#[test]
fn cli_delete_asks_unless_yes() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("board.plnpro");
    let f = file.to_str().unwrap();
    run(&dir, &["new", f]);

    let declined = run_with_input(&dir, &["delete-card", f, "To Do", "Setup project structure"], "n\n");
    assert!(declined.status.success());
    assert!(String::from_utf8_lossy(&declined.stderr).contains("Delete this card? [y/N]"));
    assert_eq!(stdout(&declined), "Cancelled.\n");
    assert_eq!(board_json(&file)["lists"][0]["cards"].as_array().unwrap().len(), 1);

    run(&dir, &["delete-card", f, "To Do", "Setup project structure", "--yes"]);
    assert!(board_json(&file)["lists"][0]["cards"].as_array().unwrap().is_empty());
}

#[test]
fn cli_tags_cascade_on_delete() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("board.plnpro");
    let f = file.to_str().unwrap();
    run(&dir, &["new", f]);

    run(&dir, &["new-tag", f, "Infra", "--list", "To Do", "--card", "Setup project structure"]);
    let duplicate = run_with_input(&dir, &["new-tag", f, "infra"], "");
    assert_eq!(stdout(&duplicate), "Cancelled.\n");
    assert!(String::from_utf8_lossy(&duplicate.stderr).contains("Tag already exists!"));

    let json = board_json(&file);
    assert_eq!(json["tags"].as_array().unwrap().len(), 1);
    assert_eq!(json["lists"][0]["cards"][0]["tagIds"].as_array().unwrap().len(), 1);

    run(&dir, &["-y", "delete-tag", f, "Infra"]);
    let json = board_json(&file);
    assert!(json["tags"].as_array().unwrap().is_empty());
    assert!(json["lists"][0]["cards"][0]["tagIds"].as_array().unwrap().is_empty());
}

#[test]
fn cli_migrates_legacy_files() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("old.plnpro");
    fs::write(
        &file,
        r##"{"title": "Old", "lists": [{"id": "l1", "name": "L", "cards": [
            {"id": "c1", "text": "x", "tags": [{"text": "Home", "color": "#0079bf"}]}
        ]}]}"##,
    )
    .unwrap();
    let f = file.to_str().unwrap();

    let dry = stdout(&run(&dir, &["migrate", f, "--dry-run"]));
    assert!(dry.contains("Schema 0 -> 1: embedded-card-tags (1 cards, 1 new tags)"));
    assert!(board_json(&file).get("schemaVersion").is_none());

    run(&dir, &["migrate", f]);
    let json = board_json(&file);
    assert_eq!(json["schemaVersion"], 1);
    assert_eq!(json["tags"][0]["text"], "Home");
    assert!(json["lists"][0]["cards"][0].get("tags").is_none());

    let again = stdout(&run(&dir, &["migrate", f]));
    assert_eq!(again, "Already at schema 1\n");
}

#[test]
fn cli_import_rejects_bad_documents() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("board.plnpro");
    let bad = dir.path().join("bad.json");
    let good = dir.path().join("good.json");
    fs::write(&bad, r#"{"lists": []}"#).unwrap();
    fs::write(&good, r#"{"title": "Fresh", "lists": []}"#).unwrap();
    let f = file.to_str().unwrap();
    run(&dir, &["new", f]);
    let before = fs::read_to_string(&file).unwrap();

    let output = planner(&dir)
        .args(["import", f, bad.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error parsing JSON file."));
    assert_eq!(fs::read_to_string(&file).unwrap(), before);

    run(&dir, &["import", f, good.to_str().unwrap()]);
    assert_eq!(board_json(&file)["title"], "Fresh");
}
