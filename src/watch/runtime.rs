// src/watch/runtime.rs

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error, info, warn};

use crate::orch::Orchestrator;
use crate::watch::gate::PassGate;

/// Events driving the watch runtime.
///
/// - the watcher sends `PathChanged` for every non-transient change path
/// - spawned passes send `PassFinished` when they complete
/// - Ctrl-C handling sends `ShutdownRequested`
#[derive(Debug)]
pub enum WatchEvent {
    PathChanged(PathBuf),
    PassFinished { success: bool },
    ShutdownRequested,
}

/// The watch-mode event loop.
///
/// Owns the single shared debounce timer and the [`PassGate`]: every change
/// event resets the timer to the quiet period; when it fires with no further
/// events, a pass is requested. The gate guarantees passes never overlap and
/// at most one follow-up pass is queued while one is running.
///
/// An initial pass runs unconditionally at startup, independent of any
/// filesystem event.
pub struct WatchRuntime {
    orchestrator: Arc<Orchestrator>,
    quiet: Duration,
    gate: PassGate,

    /// Unified event stream from the watcher, spawned passes, and the signal
    /// handler.
    events_rx: mpsc::Receiver<WatchEvent>,
    /// Sender handed to spawned passes so they can report completion.
    events_tx: mpsc::Sender<WatchEvent>,
}

impl WatchRuntime {
    pub fn new(
        orchestrator: Arc<Orchestrator>,
        quiet: Duration,
        events_rx: mpsc::Receiver<WatchEvent>,
        events_tx: mpsc::Sender<WatchEvent>,
    ) -> Self {
        Self {
            orchestrator,
            quiet,
            gate: PassGate::new(),
            events_rx,
            events_tx,
        }
    }

    /// Main event loop. Returns when shutdown is requested or every event
    /// sender is gone.
    pub async fn run(mut self) -> Result<()> {
        info!("siteup watch runtime started");

        // First pass at startup, before any event.
        self.request_pass();

        let mut deadline: Option<Instant> = None;

        loop {
            tokio::select! {
                maybe_event = self.events_rx.recv() => {
                    match maybe_event {
                        Some(WatchEvent::PathChanged(path)) => {
                            debug!(path = ?path, "change event; resetting debounce timer");
                            deadline = Some(Instant::now() + self.quiet);
                        }
                        Some(WatchEvent::PassFinished { success }) => {
                            if !success {
                                warn!("pass finished with failures");
                            }
                            // A failed pass still drains the pending flag;
                            // the queued trigger gets its pass.
                            if self.gate.finish() {
                                self.spawn_pass();
                            }
                        }
                        Some(WatchEvent::ShutdownRequested) => {
                            info!("shutdown requested, stopping watch runtime");
                            break;
                        }
                        None => {
                            debug!("event channel closed, stopping watch runtime");
                            break;
                        }
                    }
                }
                _ = debounce_expired(deadline), if deadline.is_some() => {
                    debug!("quiet period elapsed; requesting pass");
                    deadline = None;
                    self.request_pass();
                }
            }
        }

        info!("siteup watch runtime exiting");
        Ok(())
    }

    /// Request a pass through the gate; starts one now or records it pending.
    fn request_pass(&mut self) {
        if self.gate.try_start() {
            self.spawn_pass();
        }
    }

    /// Run a pass in its own task so the event loop keeps collecting change
    /// events (they coalesce into the pending flag) while it executes.
    fn spawn_pass(&self) {
        let orchestrator = Arc::clone(&self.orchestrator);
        let events_tx = self.events_tx.clone();

        tokio::spawn(async move {
            let success = match orchestrator.run_pass().await {
                Ok(report) => report.is_success(),
                Err(err) => {
                    error!(error = %err, "orchestration pass error");
                    false
                }
            };
            let _ = events_tx.send(WatchEvent::PassFinished { success }).await;
        });
    }
}

async fn debounce_expired(deadline: Option<Instant>) {
    match deadline {
        Some(d) => sleep_until(d).await,
        None => std::future::pending().await,
    }
}
