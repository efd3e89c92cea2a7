// src/config/validate.rs

use anyhow::{anyhow, Context, Result};

use crate::config::model::{ConfigFile, InputKind};
use crate::watch::filter::IgnoreFilter;

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - there is at least one task
/// - every task has a non-empty `cmd` and a non-empty `inputs` list
/// - every `inputs` / `output` reference names a declared `[input.*]`
/// - `recursive = true` is only set on directory inputs
/// - every hook has a non-empty `cmd`
/// - `debounce_ms >= 1` and the `ignore` patterns compile
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    ensure_has_tasks(cfg)?;
    validate_inputs(cfg)?;
    validate_tasks(cfg)?;
    validate_hooks(cfg)?;
    validate_watch(cfg)?;
    Ok(())
}

fn ensure_has_tasks(cfg: &ConfigFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(anyhow!(
            "config must contain at least one [task.<name>] section"
        ));
    }
    Ok(())
}

fn validate_inputs(cfg: &ConfigFile) -> Result<()> {
    for (name, input) in cfg.input.iter() {
        if input.recursive && input.kind != InputKind::Dir {
            return Err(anyhow!(
                "input '{}' sets recursive = true but is not kind = \"dir\"",
                name
            ));
        }
    }
    Ok(())
}

fn validate_tasks(cfg: &ConfigFile) -> Result<()> {
    for (name, task) in cfg.task.iter() {
        if task.cmd.is_empty() {
            return Err(anyhow!("task '{}' has an empty `cmd`", name));
        }
        if task.inputs.is_empty() {
            return Err(anyhow!(
                "task '{}' declares no `inputs`; it would never run",
                name
            ));
        }
        for input in task.inputs.iter() {
            if !cfg.input.contains_key(input) {
                return Err(anyhow!(
                    "task '{}' references unknown input '{}' in `inputs`",
                    name,
                    input
                ));
            }
        }
        if let Some(output) = &task.output {
            if !cfg.input.contains_key(output) {
                return Err(anyhow!(
                    "task '{}' references unknown input '{}' in `output`",
                    name,
                    output
                ));
            }
        }
    }
    Ok(())
}

fn validate_hooks(cfg: &ConfigFile) -> Result<()> {
    for (name, hook) in cfg.hook.iter() {
        if hook.cmd.is_empty() {
            return Err(anyhow!("hook '{}' has an empty `cmd`", name));
        }
    }
    Ok(())
}

fn validate_watch(cfg: &ConfigFile) -> Result<()> {
    if cfg.watch.debounce_ms == 0 {
        return Err(anyhow!("[watch].debounce_ms must be >= 1 (got 0)"));
    }

    // Compile once here so a bad pattern fails at load time, not mid-watch.
    IgnoreFilter::new(&cfg.watch.ignore).context("invalid [watch].ignore pattern")?;

    Ok(())
}
