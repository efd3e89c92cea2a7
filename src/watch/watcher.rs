// src/watch/watcher.rs

use std::path::PathBuf;

use anyhow::Result;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::WatchSetupError;
use crate::watch::filter::IgnoreFilter;
use crate::watch::runtime::WatchEvent;

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive
/// for as long as needed. Dropping this handle stops file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Spawn a filesystem watcher that observes each of `roots` recursively and
/// forwards non-transient change paths to the watch runtime.
///
/// A root that does not exist or cannot be observed is skipped with a
/// warning; the watcher continues on the remaining roots. Roots are fixed at
/// startup, there is no dynamic add/remove.
pub fn spawn_watcher(
    roots: Vec<PathBuf>,
    filter: IgnoreFilter,
    runtime_tx: mpsc::Sender<WatchEvent>,
) -> Result<WatcherHandle> {
    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = event_tx.send(event) {
                    // No tracing from inside the notify callback; stderr it is.
                    eprintln!("siteup: failed to forward notify event: {err}");
                }
            }
            Err(err) => {
                eprintln!("siteup: file watch error: {err}");
            }
        },
        Config::default(),
    )?;

    let mut watched = 0usize;
    for root in &roots {
        if !root.exists() {
            let err = WatchSetupError::MissingRoot { root: root.clone() };
            warn!(error = %err, "skipping watch root");
            continue;
        }
        match watcher.watch(root, RecursiveMode::Recursive) {
            Ok(()) => {
                info!(root = ?root, "watching");
                watched += 1;
            }
            Err(source) => {
                let err = WatchSetupError::Notify {
                    root: root.clone(),
                    source,
                };
                warn!(error = %err, "skipping watch root");
            }
        }
    }

    if watched == 0 {
        warn!("no watch roots could be observed; only the initial pass will run");
    }

    // Async task that consumes notify events and forwards change paths.
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            debug!(?event, "received notify event");

            for path in event.paths {
                if filter.is_transient(&path) {
                    debug!(path = ?path, "ignoring transient file event");
                    continue;
                }
                if runtime_tx.send(WatchEvent::PathChanged(path)).await.is_err() {
                    // Runtime is gone; nothing left to forward to.
                    debug!("runtime channel closed; stopping watcher loop");
                    return;
                }
            }
        }

        debug!("file watcher loop ended");
    });

    Ok(WatcherHandle { _inner: watcher })
}
