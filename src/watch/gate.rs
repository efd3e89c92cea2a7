// src/watch/gate.rs

use tracing::debug;

/// Mutual-exclusion gate for orchestration passes.
///
/// At most one pass runs at a time and at most one further pass is queued.
/// Requests arriving while a pass is running and one is already pending are
/// coalesced into that single pending pass.
///
/// The gate is owned by the watch runtime and transitioned only from its
/// event handlers; there are no ambient flags.
#[derive(Debug, Default)]
pub struct PassGate {
    running: bool,
    pending: bool,
}

impl PassGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Request a pass. Returns `true` if the caller should start one now;
    /// otherwise the request is recorded as pending (coalescing with any
    /// request already pending).
    pub fn try_start(&mut self) -> bool {
        if self.running {
            self.pending = true;
            debug!("pass already running; request recorded as pending");
            false
        } else {
            self.running = true;
            true
        }
    }

    /// Mark the running pass as finished, regardless of its outcome.
    /// Returns `true` if a pending request exists: it is cleared, the gate is
    /// marked running again, and the caller must start the next pass
    /// immediately.
    pub fn finish(&mut self) -> bool {
        self.running = false;
        if self.pending {
            self.pending = false;
            self.running = true;
            debug!("draining pending request into a new pass");
            true
        } else {
            false
        }
    }
}
