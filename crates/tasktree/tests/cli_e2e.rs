#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn tasktree_cmd(root: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("tasktree"));
    cmd.env("NO_COLOR", "1").arg("--root").arg(root);
    cmd
}

/// Creates a task and returns its path relative to the root.
fn create(root: &Path, args: &[&str]) -> String {
    let output = tasktree_cmd(root)
        .arg("--json")
        .arg("create")
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "create failed: {:?}", output);
    let task: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let path = Path::new(task["filePath"].as_str().unwrap());
    path.strip_prefix(root).unwrap().display().to_string()
}

#[test]
fn test_create_and_list() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    tasktree_cmd(root)
        .args(["create", "Buy milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created:"))
        .stdout(predicate::str::contains("-buy-milk.md"));

    tasktree_cmd(root)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[ ] Buy milk"));

    // No subcommand lists too.
    tasktree_cmd(root)
        .assert()
        .success()
        .stdout(predicate::str::contains("Buy milk"));
}

#[test]
fn test_empty_store_lists_nothing() {
    let temp = TempDir::new().unwrap();
    tasktree_cmd(temp.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_root_from_environment() {
    let temp = TempDir::new().unwrap();
    Command::new(cargo_bin("tasktree"))
        .env("TASKTREE_ROOT", temp.path())
        .args(["create", "From env"])
        .assert()
        .success();

    let docs: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .filter(|n| n.ends_with("-from-env.md"))
        .collect();
    assert_eq!(docs.len(), 1);
}

#[test]
fn test_children_are_indented() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let parent = create(root, &["Groceries"]);
    create(root, &["Milk", "--parent", &parent]);

    tasktree_cmd(root)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[ ] Groceries"))
        .stdout(predicate::str::contains("\n  [ ] Milk"));

    tasktree_cmd(root)
        .args(["list", "--flat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Milk").not());

    // Listing a task lists its children.
    tasktree_cmd(root)
        .args(["list", &parent])
        .assert()
        .success()
        .stdout(predicate::str::contains("[ ] Milk"));
}

#[test]
fn test_update_and_show() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let task = create(root, &["Write report", "--body", "first draft"]);

    tasktree_cmd(root)
        .args(["update", &task, "--done", "--due", "2024-06-01", "--priority", "high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated: Write report"));

    tasktree_cmd(root)
        .args(["show", &task])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed"))
        .stdout(predicate::str::contains("2024-06-01"))
        .stdout(predicate::str::contains("high"))
        .stdout(predicate::str::contains("first draft"));

    let content = fs::read_to_string(root.join(&task)).unwrap();
    assert!(content.contains("completed: true"));
    assert!(content.contains("dueDate: 2024-06-01"));
}

#[test]
fn test_update_without_changes_fails() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let task = create(root, &["Idle"]);

    tasktree_cmd(root)
        .args(["update", &task])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: nothing to update"));
}

#[test]
fn test_delete_and_restore() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let task = create(root, &["Old plan"]);

    tasktree_cmd(root)
        .args(["delete", &task])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved to trash: .deleted/"));
    assert!(!root.join(&task).exists());

    tasktree_cmd(root)
        .args(["list", "--flat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));

    tasktree_cmd(root)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[-] Old plan"));

    let trashed = format!(".deleted/{}", task);
    tasktree_cmd(root)
        .args(["restore", &trashed])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored:"));
    assert!(root.join(&task).exists());
}

#[test]
fn test_restore_of_live_task_is_an_error() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let task = create(root, &["Alive"]);

    tasktree_cmd(root)
        .args(["restore", &task])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Task is not deleted"));
}

#[test]
fn test_move_into_and_search_breadcrumb() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let project = create(root, &["Project"]);
    let task = create(root, &["Draft the Outline"]);

    tasktree_cmd(root)
        .args(["move", &task, "--into", &project])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved to"));

    tasktree_cmd(root)
        .args(["search", "outline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project › Draft the Outline"));
}

#[test]
fn test_move_into_own_child_is_rejected() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let parent = create(root, &["Parent"]);
    let child = create(root, &["Child", "--parent", &parent]);

    tasktree_cmd(root)
        .args(["move", &parent, "--into", &child])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid move"));
}

#[test]
fn test_doctor_and_empty_trash() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let a = create(root, &["A"]);
    create(root, &["B"]);
    fs::write(root.join("5-by-hand.md"), "# By hand\n").unwrap();

    tasktree_cmd(root)
        .args(["doctor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 recovered"));

    tasktree_cmd(root).args(["delete", &a]).assert().success();
    tasktree_cmd(root)
        .args(["empty-trash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Permanently deleted 1"));
    assert!(!root.join(".deleted").exists());
}

#[test]
fn test_json_list() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    create(root, &["First"]);
    create(root, &["Second"]);

    let output = tasktree_cmd(root).args(["--json", "list"]).output().unwrap();
    assert!(output.status.success());
    let tasks: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let titles: Vec<&str> = tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["First", "Second"]);
}
