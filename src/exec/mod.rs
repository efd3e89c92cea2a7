// src/exec/mod.rs

//! Process execution layer.
//!
//! Runs the external commands bound to tasks and hooks using
//! `tokio::process::Command`, and maps exit status into the crate's error
//! taxonomy.

pub mod command;

pub use command::run_command;
