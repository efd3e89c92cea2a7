// src/orch/mod.rs

//! The orchestration pass: decide which tasks are stale and run exactly those.
//!
//! - [`plan`] holds the pure staleness computation.
//! - [`pass`] owns a full pass: load state, hash inputs, diff, run tasks and
//!   hooks, persist new signatures.

pub mod pass;
pub mod plan;

pub use pass::{Orchestrator, PassReport};
pub use plan::{stale_tasks, CurrentSignatures, HookSpec, TaskSpec};
