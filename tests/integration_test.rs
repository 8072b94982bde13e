use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn promptkeep_cmd(data_dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_promptkeep"));
    cmd.arg("--data-dir")
        .arg(data_dir)
        .env_remove("PROMPTKEEP_DIR")
        .env_remove("PROMPTKEEP_STORAGE_KEY")
        .env_remove("RUST_LOG")
        .stdin(Stdio::null());
    cmd
}

fn run(data_dir: &Path, args: &[&str]) -> Output {
    promptkeep_cmd(data_dir).args(args).output().unwrap()
}

fn save_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = vec!["save", "--json"];
    full.extend_from_slice(args);
    let output = run(data_dir, &full);
    assert!(
        output.status.success(),
        "save failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn list_json(data_dir: &Path, query: Option<&str>) -> Vec<serde_json::Value> {
    let mut args = vec!["list", "--json"];
    if let Some(q) = query {
        args.push(q);
    }
    let output = run(data_dir, &args);
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

fn titles(prompts: &[serde_json::Value]) -> Vec<String> {
    prompts
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_list_empty_store() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["list"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No prompts saved yet."));
}

#[test]
fn test_save_creates_storage_file() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["save", "--title", "Greeting", "--content", "Say hi"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Created prompt"));
    assert!(stdout.contains("Greeting"));

    let raw = std::fs::read_to_string(tmp.path().join("prompts_storage.json")).unwrap();
    let stored: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["title"], "Greeting");
    assert_eq!(stored[0]["content"], "Say hi");
    assert!(stored[0]["id"].is_string());
}

#[test]
fn test_save_blank_fields_fails_without_writing() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["save", "--title", "  ", "--content", "x"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Please fill in the title"));
    assert!(!tmp.path().join("prompts_storage.json").exists());
}

#[test]
fn test_full_prompt_workflow() {
    let tmp = TempDir::new().unwrap();

    let a = save_json(tmp.path(), &["--title", "A", "--content", "x"]);
    let a_id = a["id"].as_str().unwrap().to_string();
    assert_eq!(titles(&list_json(tmp.path(), None)), vec!["A"]);

    let b = save_json(tmp.path(), &["--title", "B", "--content", "y"]);
    let b_id = b["id"].as_str().unwrap().to_string();
    assert_eq!(titles(&list_json(tmp.path(), None)), vec!["B", "A"]);

    // Update in place keeps position
    let updated = save_json(
        tmp.path(),
        &["--title", "A2", "--content", "x2", "--id", &a_id],
    );
    assert_eq!(updated["id"], a_id.as_str());
    let prompts = list_json(tmp.path(), None);
    assert_eq!(titles(&prompts), vec!["B", "A2"]);
    assert_eq!(prompts[1]["content"], "x2");

    // Delete requires --force without a tty
    let output = run(tmp.path(), &["delete", &b_id]);
    assert!(!output.status.success());
    assert_eq!(list_json(tmp.path(), None).len(), 2);

    let output = run(tmp.path(), &["delete", &b_id, "--force"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Deleted prompt"));

    let prompts = list_json(tmp.path(), None);
    assert_eq!(titles(&prompts), vec!["A2"]);
    assert_eq!(prompts[0]["id"], a_id.as_str());
}

#[test]
fn test_list_filters_by_title() {
    let tmp = TempDir::new().unwrap();

    save_json(tmp.path(), &["--title", "Write SQL", "--content", "a"]);
    save_json(tmp.path(), &["--title", "Summarize", "--content", "b"]);
    save_json(tmp.path(), &["--title", "sql tuning", "--content", "c"]);

    let hits = list_json(tmp.path(), Some("SQL"));
    assert_eq!(titles(&hits), vec!["sql tuning", "Write SQL"]);

    let output = run(tmp.path(), &["list", "poetry"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No prompts match 'poetry'."));
}

#[test]
fn test_show_and_copy() {
    let tmp = TempDir::new().unwrap();
    let saved = save_json(
        tmp.path(),
        &["--title", "Review", "--content", "Review this code carefully."],
    );
    let id = saved["id"].as_str().unwrap();

    let output = run(tmp.path(), &["show", &id[..6]]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Title: Review"));
    assert!(stdout.contains("Review this code carefully."));

    let output = run(tmp.path(), &["copy", id]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Review this code carefully.\n"
    );
}

#[test]
fn test_show_unknown_id_fails() {
    let tmp = TempDir::new().unwrap();
    save_json(tmp.path(), &["--title", "A", "--content", "x"]);

    let output = run(tmp.path(), &["show", "zzzzzz"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Prompt not found"));
}

#[test]
fn test_save_content_from_stdin() {
    let tmp = TempDir::new().unwrap();

    let mut child = promptkeep_cmd(tmp.path())
        .args(["save", "--title", "Piped", "--stdin", "--json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"  line one\nline two\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let saved: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(saved["content"], "line one\nline two");
}

#[test]
fn test_corrupt_storage_starts_empty() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("prompts_storage.json"), "{ not json").unwrap();

    let output = run(tmp.path(), &["list", "--json"]);
    assert!(output.status.success());
    let prompts: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert!(prompts.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("malformed"));
}

#[test]
fn test_storage_key_and_path() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["--storage-key", "work", "path"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.trim().ends_with("work.json"));

    save_json(tmp.path(), &["--storage-key", "work", "--title", "A", "--content", "x"]);
    assert!(tmp.path().join("work.json").exists());
    assert!(list_json(tmp.path(), None).is_empty());

    let output = run(tmp.path(), &["--storage-key", "../escape", "list"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid storage key"));
}
