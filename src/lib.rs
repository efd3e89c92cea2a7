// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod orch;
pub mod state;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use tokio::sync::mpsc;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::orch::Orchestrator;
use crate::watch::{spawn_watcher, IgnoreFilter, WatchEvent, WatchRuntime};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the orchestrator (single-pass, dry-run)
/// - the file watcher + watch runtime (default mode)
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;
    let root = config_root_dir(&config_path);

    let orchestrator = Orchestrator::from_config(&cfg, &root);

    if args.dry_run {
        print_dry_run(&cfg, &orchestrator);
        return Ok(());
    }

    if args.once {
        let report = orchestrator.run_pass().await?;
        if !report.is_success() {
            let names: Vec<&str> = report.failed.iter().map(|(n, _)| n.as_str()).collect();
            bail!("{} task(s) failed: {}", names.len(), names.join(", "));
        }
        return Ok(());
    }

    // Watch mode.
    let (tx, rx) = mpsc::channel::<WatchEvent>(64);

    let filter = IgnoreFilter::new(&cfg.watch.ignore)?;
    let roots: Vec<PathBuf> = cfg.watch.roots.iter().map(|r| root.join(r)).collect();
    let _watcher_handle = spawn_watcher(roots, filter, tx.clone())?;

    // Ctrl-C → graceful shutdown.
    {
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(WatchEvent::ShutdownRequested).await;
        });
    }

    let quiet = Duration::from_millis(cfg.watch.debounce_ms);
    info!(debounce_ms = cfg.watch.debounce_ms, "starting watch mode");

    let runtime = WatchRuntime::new(Arc::new(orchestrator), quiet, rx, tx);
    runtime.run().await
}

/// Figure out the project root all paths and commands resolve against.
/// Currently: directory containing the config file, or `.`.
fn config_root_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Dry-run output: declared inputs and tasks, plus which tasks are currently
/// stale. Nothing is executed and the state file is left untouched.
fn print_dry_run(cfg: &ConfigFile, orchestrator: &Orchestrator) {
    println!("siteup dry-run");
    println!("  state file: {:?}", cfg.state.file);
    println!("  watch roots: {:?}", cfg.watch.roots);
    println!("  debounce_ms: {}", cfg.watch.debounce_ms);
    println!();

    println!("inputs ({}):", cfg.input.len());
    for (name, input) in cfg.input.iter() {
        println!("  - {name}: {:?} ({:?})", input.path, input.kind);
    }
    println!();

    let stale = orchestrator.plan_only();
    println!("tasks ({}):", cfg.task.len());
    for (name, task) in cfg.task.iter() {
        let marker = if stale.iter().any(|s| s == name) {
            "stale"
        } else {
            "up to date"
        };
        println!("  - {name} [{marker}]");
        println!("      cmd: {:?}", task.cmd);
        println!("      inputs: {:?}", task.inputs);
        if let Some(output) = &task.output {
            println!("      output: {output}");
        }
    }

    if !cfg.hook.is_empty() {
        println!();
        println!("hooks ({}):", cfg.hook.len());
        for (name, hook) in cfg.hook.iter() {
            println!("  - {name}: {:?}", hook.cmd);
        }
    }
}
