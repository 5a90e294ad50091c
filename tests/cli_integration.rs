//! Integration tests for the `tb` shell.
//!
//! Each test writes a temp config and seed file, runs `tb` as a subprocess
//! with a script on stdin, and checks stdout.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Create a config and a four-task seed file in `root`.
fn create_test_book(root: &Path, default_filters: &[&str]) {
    let filters: Vec<String> = default_filters.iter().map(|f| format!("{:?}", f)).collect();
    fs::write(
        root.join("taskbook.toml"),
        format!(
            "tasks_file = \"tasks.json\"\n\n[filters]\ndefault = [{}]\n",
            filters.join(", ")
        ),
    )
    .unwrap();
    fs::write(
        root.join("tasks.json"),
        r#"[
  {"title": "A"},
  {"title": "B", "tags": ["x"]},
  {"title": "C", "done": true},
  {"title": "D", "tags": ["x"]}
]"#,
    )
    .unwrap();
}

/// Run `tb` in `root` with `script` on stdin; returns (stdout, success).
fn run_tb(root: &Path, script: &str) -> (String, bool) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_tb"))
        .arg("-c")
        .arg(root.join("taskbook.toml"))
        .current_dir(root)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn tb");
    // tb may exit before reading stdin, e.g. on a bad config
    let mut stdin = child.stdin.take().unwrap();
    match stdin.write_all(script.as_bytes()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
        other => other.unwrap(),
    }
    drop(stdin);
    let output = child.wait_with_output().unwrap();
    (
        String::from_utf8(output.stdout).unwrap(),
        output.status.success(),
    )
}

#[test]
fn purge_and_undo_session() {
    let tmp = TempDir::new().unwrap();
    create_test_book(tmp.path(), &[]);

    let (stdout, ok) = run_tb(tmp.path(), "filter tag:x\npurge\nlist\nundo\nlist\n");
    assert!(ok);
    assert_eq!(
        stdout,
        "\
Showing 2 tasks matching: tag:x
Tasks purged!
0 of 2 tasks [tag:x]
Purged tasks restored.
2 of 4 tasks [tag:x]
  1. [ ] B #x
  2. [ ] D #x
"
    );
}

#[test]
fn only_the_latest_command_is_undone() {
    let tmp = TempDir::new().unwrap();
    create_test_book(tmp.path(), &[]);

    let (stdout, ok) = run_tb(tmp.path(), "filter tag:x\npurge\nfilter\nundo\nundo\n");
    assert!(ok);
    assert_eq!(
        stdout,
        "\
Showing 2 tasks matching: tag:x
Tasks purged!
Showing all 2 tasks.
Showing 0 tasks matching: tag:x
error: illegal command state: command has already been undone
"
    );
}

#[test]
fn purge_undo_restores_store_order() {
    let tmp = TempDir::new().unwrap();
    create_test_book(tmp.path(), &["tag:x"]);

    let (stdout, ok) = run_tb(tmp.path(), "purge\nundo\nfilter\nlist\n");
    assert!(ok);
    assert_eq!(
        stdout,
        "\
Tasks purged!
Purged tasks restored.
Showing all 4 tasks.
4 tasks
  1. [ ] A
  2. [ ] B #x
  3. [x] C
  4. [ ] D #x
"
    );
}

#[test]
fn errors_are_reported_and_session_continues() {
    let tmp = TempDir::new().unwrap();
    create_test_book(tmp.path(), &["done", "tag:x"]);

    let (stdout, ok) = run_tb(tmp.path(), "purge\nundo\nbogus\nlist\n");
    assert!(ok);
    assert_eq!(
        stdout,
        "\
error: There are no tasks to purge.
error: There is no command to undo.
error: unknown command \"bogus\" (try `help`)
0 of 4 tasks [done tag:x]
"
    );
}

#[test]
fn add_mark_and_redo() {
    let tmp = TempDir::new().unwrap();
    create_test_book(tmp.path(), &["not-done"]);

    let (stdout, ok) = run_tb(
        tmp.path(),
        "add E #x /d fifth\ndone 1\nundo\nredo\nlist\nexit\nlist\n",
    );
    assert!(ok);
    assert_eq!(
        stdout,
        "\
New task added: E
Marked task done: A
Reverted mark: A
Marked task done: A
3 of 5 tasks [not-done]
  1. [ ] B #x
  2. [ ] D #x
  3. [ ] E #x
      fifth
"
    );
}

#[test]
fn bad_config_fails_startup() {
    let tmp = TempDir::new().unwrap();
    create_test_book(tmp.path(), &["someday"]);
    let (stdout, ok) = run_tb(tmp.path(), "list\n");
    assert!(!ok);
    assert_eq!(stdout, "");
}

#[test]
fn bad_log_level_fails_startup() {
    let tmp = TempDir::new().unwrap();
    create_test_book(tmp.path(), &[]);
    let config = tmp.path().join("taskbook.toml");
    let text = fs::read_to_string(&config).unwrap();
    fs::write(&config, format!("log_level = \"loud\"\n{}", text)).unwrap();

    let (stdout, ok) = run_tb(tmp.path(), "list\n");
    assert!(!ok);
    assert_eq!(stdout, "");
}
