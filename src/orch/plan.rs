// src/orch/plan.rs

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::model::{HookConfig, TaskConfig};
use crate::state::signature::Signature;
use crate::state::store::StateRecord;

/// Signatures of all tracked inputs as observed at the start of a pass.
///
/// `None` means the input is currently absent (or could not be read; the
/// pass logs that separately and falls back to the previous value when
/// persisting).
pub type CurrentSignatures = BTreeMap<String, Option<Signature>>;

/// A declared unit of work: an argv command plus the inputs it depends on.
#[derive(Debug, Clone)]
pub struct TaskSpec {
    pub name: String,
    pub cmd: Vec<String>,
    /// Dependency input names. The first entry is the primary input.
    pub inputs: Vec<String>,
    /// Optional input naming the task's own output file.
    pub output: Option<String>,
}

impl TaskSpec {
    pub fn from_config(name: &str, cfg: &TaskConfig) -> Self {
        Self {
            name: name.to_string(),
            cmd: cfg.cmd.clone(),
            inputs: cfg.inputs.clone(),
            output: cfg.output.clone(),
        }
    }

    /// The input that must exist for this task to ever run.
    pub fn primary_input(&self) -> &str {
        // Validation guarantees `inputs` is non-empty.
        &self.inputs[0]
    }
}

/// An always-run step executed after the stale tasks on every pass.
#[derive(Debug, Clone)]
pub struct HookSpec {
    pub name: String,
    pub cmd: Vec<String>,
}

impl HookSpec {
    pub fn from_config(name: &str, cfg: &HookConfig) -> Self {
        Self {
            name: name.to_string(),
            cmd: cfg.cmd.clone(),
        }
    }
}

/// Decide whether a task is stale given the previous and current signatures.
///
/// A task is stale when:
/// - its primary input currently exists, AND
/// - its declared output input is currently absent, OR any dependency either
///   has no prior signature recorded or a current signature differing from
///   the prior one.
///
/// A task whose primary input is absent never runs; there is no source
/// material to generate from.
pub fn is_stale(task: &TaskSpec, prev: &StateRecord, curr: &CurrentSignatures) -> bool {
    let primary_present = curr
        .get(task.primary_input())
        .is_some_and(|sig| sig.is_some());
    if !primary_present {
        debug!(task = %task.name, input = %task.primary_input(), "primary input absent; never stale");
        return false;
    }

    if let Some(output) = &task.output {
        let output_present = curr.get(output.as_str()).is_some_and(|sig| sig.is_some());
        if !output_present {
            debug!(task = %task.name, output = %output, "output missing; task is stale");
            return true;
        }
    }

    task.inputs.iter().any(|name| {
        let current = match curr.get(name) {
            Some(Some(sig)) => sig,
            // Absent secondary inputs don't count as changes on their own.
            _ => return false,
        };
        match prev.get(name) {
            Some(previous) => current != previous,
            None => true,
        }
    })
}

/// Compute the stale subset of `tasks`, preserving declaration order.
pub fn stale_tasks<'a>(
    tasks: &'a [TaskSpec],
    prev: &StateRecord,
    curr: &CurrentSignatures,
) -> Vec<&'a TaskSpec> {
    tasks
        .iter()
        .filter(|task| is_stale(task, prev, curr))
        .collect()
}
