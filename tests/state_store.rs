use std::error::Error;
use std::fs;

use tempfile::tempdir;

use siteup::state::{load_state, persist_state, Signature, StateRecord};

type TestResult = Result<(), Box<dyn Error>>;

fn record(entries: &[(&str, &str)]) -> StateRecord {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), Signature::from(v.to_string())))
        .collect()
}

#[test]
fn persist_then_load_is_lossless() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("state.json");

    let original = record(&[("team_docx", "abc123"), ("hero_dir", "def456")]);
    persist_state(&path, &original)?;

    let loaded = load_state(&path)?;
    assert_eq!(loaded, original);

    // Round-trip again: persist(load()) is a no-op on the values.
    persist_state(&path, &loaded)?;
    assert_eq!(load_state(&path)?, original);

    Ok(())
}

#[test]
fn missing_state_file_is_empty_state() -> TestResult {
    let dir = tempdir()?;
    let loaded = load_state(&dir.path().join("never-written.json"))?;
    assert!(loaded.is_empty());
    Ok(())
}

#[test]
fn corrupt_state_file_is_a_typed_error() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("state.json");
    fs::write(&path, "{ not json at all")?;

    let err = load_state(&path).unwrap_err();
    assert!(err.to_string().contains("not valid JSON"));

    Ok(())
}

#[test]
fn persist_creates_parent_directories() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join(".siteup/state.json");

    persist_state(&path, &record(&[("a", "1")]))?;
    assert!(path.is_file());

    Ok(())
}

#[test]
fn persist_overwrites_in_full() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("state.json");

    persist_state(&path, &record(&[("a", "1"), ("b", "2")]))?;
    persist_state(&path, &record(&[("a", "3")]))?;

    let loaded = load_state(&path)?;
    assert_eq!(loaded, record(&[("a", "3")]));

    Ok(())
}
