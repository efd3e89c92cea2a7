// src/state/mod.rs

//! Signatures and their persistence.
//!
//! - [`signature`] computes a deterministic fingerprint of a tracked input's
//!   current content state.
//! - [`store`] reads and writes the JSON state file mapping input names to
//!   their last-seen signatures.

pub mod signature;
pub mod store;

pub use signature::{Signature, TrackedInput};
pub use store::{load_state, persist_state, StateRecord};
