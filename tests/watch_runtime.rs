use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tempfile::{tempdir, TempDir};
use tokio::sync::mpsc;
use tokio::time::sleep;

use siteup::config::load_and_validate;
use siteup::orch::Orchestrator;
use siteup::watch::{WatchEvent, WatchRuntime};

type TestResult = Result<(), Box<dyn Error>>;

/// Project whose hook appends one line per pass, so `passes.log` counts how
/// many orchestration passes actually ran.
fn counting_project(hook_cmd: &str) -> Result<(TempDir, Arc<Orchestrator>), Box<dyn Error>> {
    let dir = tempdir()?;
    let config = format!(
        r#"
[input.src]
path = "content/a.txt"

[task.copy]
cmd = ["true"]
inputs = ["src"]

[hook.count]
cmd = ["sh", "-c", "{hook_cmd}"]
"#
    );
    let config_path = dir.path().join("Siteup.toml");
    fs::write(&config_path, config)?;
    fs::create_dir(dir.path().join("content"))?;
    fs::write(dir.path().join("content/a.txt"), "v1")?;

    let cfg = load_and_validate(&config_path)?;
    let orchestrator = Arc::new(Orchestrator::from_config(&cfg, dir.path()));
    Ok((dir, orchestrator))
}

fn passes(root: &Path) -> usize {
    fs::read_to_string(root.join("passes.log"))
        .map(|s| s.lines().count())
        .unwrap_or(0)
}

#[tokio::test]
async fn burst_of_events_coalesces_into_one_debounced_pass() -> TestResult {
    let (dir, orchestrator) = counting_project("echo pass >> passes.log")?;

    let (tx, rx) = mpsc::channel::<WatchEvent>(64);
    let runtime = WatchRuntime::new(orchestrator, Duration::from_millis(50), rx, tx.clone());
    let handle = tokio::spawn(runtime.run());

    // Let the unconditional startup pass finish.
    sleep(Duration::from_millis(300)).await;
    assert_eq!(passes(dir.path()), 1);

    // A burst of change events within the quiet window.
    for i in 0..5 {
        tx.send(WatchEvent::PathChanged(PathBuf::from(format!("f{i}"))))
            .await?;
        sleep(Duration::from_millis(5)).await;
    }

    // One debounced pass, not five.
    sleep(Duration::from_millis(500)).await;
    assert_eq!(passes(dir.path()), 2);

    tx.send(WatchEvent::ShutdownRequested).await?;
    handle.await??;

    Ok(())
}

#[tokio::test]
async fn events_during_a_running_pass_queue_exactly_one_extra_pass() -> TestResult {
    // Each pass takes ~500ms, so events arriving mid-pass exercise the gate.
    let (dir, orchestrator) = counting_project("echo pass >> passes.log; sleep 0.5")?;

    let (tx, rx) = mpsc::channel::<WatchEvent>(64);
    let runtime = WatchRuntime::new(orchestrator, Duration::from_millis(50), rx, tx.clone());
    let handle = tokio::spawn(runtime.run());

    // While the startup pass is still running, two separate change events
    // fire the debounce timer; both must coalesce into a single pending pass.
    sleep(Duration::from_millis(100)).await;
    tx.send(WatchEvent::PathChanged(PathBuf::from("a"))).await?;
    sleep(Duration::from_millis(150)).await;
    tx.send(WatchEvent::PathChanged(PathBuf::from("b"))).await?;

    // Wait for the startup pass and the single follow-up pass to finish.
    sleep(Duration::from_millis(1500)).await;
    assert_eq!(passes(dir.path()), 2);

    tx.send(WatchEvent::ShutdownRequested).await?;
    handle.await??;

    Ok(())
}
