// src/errors.rs

//! Crate-wide error taxonomy.
//!
//! Each operation that can fail in a way the caller should decide about gets
//! its own type, instead of a catch-and-continue inside the operation. The
//! orchestrator maps these to its recovery behaviour: a missing input is
//! normal, an unreadable input keeps its previous signature, a corrupt state
//! file resets to empty, an unwatchable root is skipped.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A tracked input could not be read or hashed.
#[derive(Debug, Error)]
pub enum InputReadError {
    /// The file or directory does not exist. This is the expected case for
    /// optional inputs and is treated as an absent signature, not a failure.
    #[error("input not found at {path}")]
    NotFound { path: PathBuf },

    /// Any other I/O failure while reading or listing the input.
    #[error("reading input at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl InputReadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, InputReadError::NotFound { .. })
    }
}

/// The persisted state file exists but could not be parsed.
#[derive(Debug, Error)]
#[error("state file at {path} is not valid JSON: {source}")]
pub struct StateCorruptError {
    pub path: PathBuf,
    #[source]
    pub source: serde_json::Error,
}

/// A task's external command failed to run or exited non-zero.
#[derive(Debug, Error)]
pub enum TaskExecutionError {
    #[error("task '{task}' has an empty command")]
    EmptyCommand { task: String },

    #[error("spawning command for task '{task}': {source}")]
    Spawn {
        task: String,
        #[source]
        source: io::Error,
    },

    #[error("task '{task}' exited with code {code}")]
    NonZeroExit { task: String, code: i32 },
}

impl TaskExecutionError {
    /// Exit code of the failed command, if it got far enough to have one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            TaskExecutionError::NonZeroExit { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// A watch root could not be observed.
#[derive(Debug, Error)]
pub enum WatchSetupError {
    #[error("watch root {root} does not exist")]
    MissingRoot { root: PathBuf },

    #[error("watching {root}: {source}")]
    Notify {
        root: PathBuf,
        #[source]
        source: notify::Error,
    },
}
