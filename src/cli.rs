// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `siteup`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "siteup",
    version,
    about = "Re-run site generator commands when their tracked inputs change.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Siteup.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Siteup.toml")]
    pub config: String,

    /// Run a single orchestration pass based on current state, no watching.
    #[arg(long)]
    pub once: bool,

    /// Compute signatures and print which tasks are stale, but don't execute
    /// any commands or update the state file.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SITEUP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
