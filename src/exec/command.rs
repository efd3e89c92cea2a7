// src/exec/command.rs

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::TaskExecutionError;

/// Run a task's argv command to completion.
///
/// The command is executed directly (no shell) with `cwd` as its working
/// directory. Stdout and stderr are inherited so the child's output streams
/// to the orchestrator's own streams. Resolves on exit code 0; any non-zero
/// exit is a [`TaskExecutionError`] carrying the code.
///
/// There is no timeout: a hung command blocks the pass. Cancellation is not
/// supported either; `kill_on_drop` only covers orchestrator shutdown.
pub async fn run_command(
    name: &str,
    argv: &[String],
    cwd: &Path,
) -> Result<(), TaskExecutionError> {
    let (program, args) = argv.split_first().ok_or_else(|| {
        TaskExecutionError::EmptyCommand {
            task: name.to_string(),
        }
    })?;

    debug!(task = %name, program = %program, ?args, "spawning command");

    let mut child = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| TaskExecutionError::Spawn {
            task: name.to_string(),
            source,
        })?;

    let status = child
        .wait()
        .await
        .map_err(|source| TaskExecutionError::Spawn {
            task: name.to_string(),
            source,
        })?;

    let code = status.code().unwrap_or(-1);
    info!(task = %name, exit_code = code, success = status.success(), "command exited");

    if status.success() {
        Ok(())
    } else {
        Err(TaskExecutionError::NonZeroExit {
            task: name.to_string(),
            code,
        })
    }
}
