// src/orch/pass.rs

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::model::ConfigFile;
use crate::errors::TaskExecutionError;
use crate::exec::run_command;
use crate::orch::plan::{stale_tasks, CurrentSignatures, HookSpec, TaskSpec};
use crate::state::signature::TrackedInput;
use crate::state::store::{self, StateRecord};

/// Outcome of one orchestration pass.
#[derive(Debug, Default)]
pub struct PassReport {
    /// Names of the tasks that were stale this pass, in execution order.
    pub stale: Vec<String>,
    /// Tasks that ran and succeeded.
    pub succeeded: Vec<String>,
    /// Tasks that ran and failed, with the execution error.
    pub failed: Vec<(String, TaskExecutionError)>,
    /// Hooks that failed (warning-level only).
    pub hook_failures: Vec<String>,
}

impl PassReport {
    /// True when every stale task completed successfully. Hook failures do
    /// not fail the pass.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Owns one pass over the declared inputs and tasks.
///
/// A pass is a linear pipeline: load the previous state, compute current
/// signatures, diff, run the stale tasks sequentially (they may share output
/// directories), run the hooks, persist. There is no partial-pass resumption;
/// a crash mid-pass leaves the state file as of the previous successful pass
/// and the next run recomputes from scratch.
#[derive(Debug)]
pub struct Orchestrator {
    root: PathBuf,
    state_file: PathBuf,
    inputs: Vec<TrackedInput>,
    tasks: Vec<TaskSpec>,
    hooks: Vec<HookSpec>,
}

impl Orchestrator {
    /// Build an orchestrator from a validated config, resolving all paths
    /// against `root` (the directory containing the config file).
    pub fn from_config(cfg: &ConfigFile, root: &Path) -> Self {
        let inputs = cfg
            .input
            .iter()
            .map(|(name, input)| TrackedInput::from_config(name, input, root))
            .collect();

        let tasks = cfg
            .task
            .iter()
            .map(|(name, task)| TaskSpec::from_config(name, task))
            .collect();

        let hooks = cfg
            .hook
            .iter()
            .map(|(name, hook)| HookSpec::from_config(name, hook))
            .collect();

        Self {
            root: root.to_path_buf(),
            state_file: root.join(&cfg.state.file),
            inputs,
            tasks,
            hooks,
        }
    }

    /// Directory task commands run in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run one full orchestration pass.
    ///
    /// Task failures do not abort the batch: every stale task gets its turn
    /// and failures are collected into the report. The state file is written
    /// even when tasks failed, so an input whose generator is broken is not
    /// re-run in a loop for the same content.
    pub async fn run_pass(&self) -> Result<PassReport> {
        let prev = self.load_state_or_empty();
        let curr = self.current_signatures();

        let stale = stale_tasks(&self.tasks, &prev, &curr);
        let stale_names: Vec<&str> = stale.iter().map(|t| t.name.as_str()).collect();
        if stale_names.is_empty() {
            info!("no changes detected");
        } else {
            info!(tasks = ?stale_names, "changes detected");
        }

        let mut report = PassReport {
            stale: stale_names.iter().map(|s| s.to_string()).collect(),
            ..PassReport::default()
        };

        for task in stale {
            info!(task = %task.name, "running task");
            match run_command(&task.name, &task.cmd, &self.root).await {
                Ok(()) => report.succeeded.push(task.name.clone()),
                Err(err) => {
                    warn!(task = %task.name, error = %err, "task failed; continuing with remaining tasks");
                    report.failed.push((task.name.clone(), err));
                }
            }
        }

        for hook in &self.hooks {
            info!(hook = %hook.name, "running hook");
            if let Err(err) = run_command(&hook.name, &hook.cmd, &self.root).await {
                warn!(hook = %hook.name, error = %err, "hook failed");
                report.hook_failures.push(hook.name.clone());
            }
        }

        let next = merge_state(&prev, &curr);
        store::persist_state(&self.state_file, &next)
            .with_context(|| format!("persisting state to {:?}", self.state_file))?;

        info!(
            ran = report.succeeded.len(),
            failed = report.failed.len(),
            "pass complete"
        );
        Ok(report)
    }

    /// Compute the stale task names without executing or persisting anything.
    pub fn plan_only(&self) -> Vec<String> {
        let prev = self.load_state_or_empty();
        let curr = self.current_signatures();
        stale_tasks(&self.tasks, &prev, &curr)
            .into_iter()
            .map(|t| t.name.clone())
            .collect()
    }

    fn load_state_or_empty(&self) -> StateRecord {
        match store::load_state(&self.state_file) {
            Ok(record) => record,
            Err(err) => {
                warn!(error = %err, "state file unusable; treating all inputs as unknown");
                StateRecord::new()
            }
        }
    }

    /// Signatures of every declared input as of now.
    ///
    /// A missing input is simply absent. A read failure keeps the input
    /// absent for staleness purposes but is logged; the previous signature
    /// survives via [`merge_state`], so a transient failure does not erase a
    /// known-good value.
    fn current_signatures(&self) -> CurrentSignatures {
        let mut curr = CurrentSignatures::new();
        for input in &self.inputs {
            let sig = match input.signature() {
                Ok(sig) => Some(sig),
                Err(err) if err.is_not_found() => None,
                Err(err) => {
                    warn!(input = %input.name, error = %err, "failed to read input; keeping previous signature");
                    None
                }
            };
            curr.insert(input.name.clone(), sig);
        }
        curr
    }
}

/// Union of current signatures with the previous record: current values win,
/// absent inputs fall back to their previous signature if one was known.
fn merge_state(prev: &StateRecord, curr: &CurrentSignatures) -> StateRecord {
    let mut next = StateRecord::new();
    for (name, sig) in curr {
        match sig {
            Some(sig) => {
                next.insert(name.clone(), sig.clone());
            }
            None => {
                if let Some(previous) = prev.get(name) {
                    next.insert(name.clone(), previous.clone());
                }
            }
        }
    }
    next
}
