// src/config/mod.rs

//! Configuration loading and validation for siteup.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate referential invariants like input references (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{
    ConfigFile, HookConfig, InputConfig, InputKind, StateSection, TaskConfig, WatchSection,
};
pub use validate::validate_config;
