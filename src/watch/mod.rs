// src/watch/mod.rs

//! File watching and pass triggering.
//!
//! This module is responsible for:
//! - Filtering out transient-file change events (`filter`).
//! - Wiring up a cross-platform filesystem watcher over the configured roots
//!   (`watcher`).
//! - The debounce timer and running/pending gate that turn bursts of events
//!   into single, non-overlapping orchestration passes (`gate`, `runtime`).
//!
//! It does **not** know about signatures or staleness; every pass recomputes
//! those from scratch.

pub mod filter;
pub mod gate;
pub mod runtime;
pub mod watcher;

pub use filter::IgnoreFilter;
pub use gate::PassGate;
pub use runtime::{WatchEvent, WatchRuntime};
pub use watcher::{spawn_watcher, WatcherHandle};
