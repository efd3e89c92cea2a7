use std::error::Error;
use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use siteup::config::{load_and_validate, InputKind};

type TestResult = Result<(), Box<dyn Error>>;

fn load(toml: &str) -> anyhow::Result<siteup::config::ConfigFile> {
    let dir = tempdir()?;
    let path = dir.path().join("Siteup.toml");
    fs::write(&path, toml)?;
    load_and_validate(&path)
}

const MINIMAL: &str = r#"
[input.src]
path = "content/a.txt"

[task.copy]
cmd = ["cp", "content/a.txt", "content/a.copy"]
inputs = ["src"]
"#;

#[test]
fn minimal_config_parses_with_defaults() -> TestResult {
    let cfg = load(MINIMAL)?;

    assert_eq!(cfg.state.file, PathBuf::from(".siteup/state.json"));
    assert_eq!(cfg.watch.roots, vec![PathBuf::from(".")]);
    assert_eq!(cfg.watch.debounce_ms, 400);
    assert_eq!(cfg.watch.ignore, vec!["*.tmp", "*.swp", "*.part", "*~"]);

    let input = cfg.input.get("src").unwrap();
    assert_eq!(input.kind, InputKind::File);
    assert!(!input.recursive);

    Ok(())
}

#[test]
fn task_tables_keep_declaration_order() -> TestResult {
    let cfg = load(
        r#"
[input.src]
path = "a"

[task.zeta]
cmd = ["true"]
inputs = ["src"]

[task.alpha]
cmd = ["true"]
inputs = ["src"]

[task.mid]
cmd = ["true"]
inputs = ["src"]
"#,
    )?;

    let order: Vec<&str> = cfg.task.keys().map(|s| s.as_str()).collect();
    assert_eq!(order, vec!["zeta", "alpha", "mid"]);

    Ok(())
}

#[test]
fn config_without_tasks_is_rejected() {
    let err = load(
        r#"
[input.src]
path = "a"
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("at least one [task"));
}

#[test]
fn unknown_input_reference_is_rejected() {
    let err = load(
        r#"
[input.src]
path = "a"

[task.copy]
cmd = ["true"]
inputs = ["nope"]
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("unknown input 'nope'"));
}

#[test]
fn unknown_output_reference_is_rejected() {
    let err = load(
        r#"
[input.src]
path = "a"

[task.copy]
cmd = ["true"]
inputs = ["src"]
output = "nope"
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("unknown input 'nope'"));
}

#[test]
fn empty_cmd_and_empty_inputs_are_rejected() {
    let err = load(
        r#"
[input.src]
path = "a"

[task.copy]
cmd = []
inputs = ["src"]
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("empty `cmd`"));

    let err = load(
        r#"
[input.src]
path = "a"

[task.copy]
cmd = ["true"]
inputs = []
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("no `inputs`"));
}

#[test]
fn recursive_on_a_file_input_is_rejected() {
    let err = load(
        r#"
[input.src]
path = "a"
recursive = true

[task.copy]
cmd = ["true"]
inputs = ["src"]
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("recursive"));
}

#[test]
fn zero_debounce_is_rejected() {
    let err = load(&format!("{MINIMAL}\n[watch]\ndebounce_ms = 0\n")).unwrap_err();
    assert!(err.to_string().contains("debounce_ms"));
}

#[test]
fn bad_ignore_pattern_is_rejected() {
    let err = load(&format!("{MINIMAL}\n[watch]\nignore = [\"[\"]\n")).unwrap_err();
    assert!(err.to_string().contains("ignore"));
}
