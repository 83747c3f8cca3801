//! Policy file watcher for hot reload.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::parse_config;
use crate::config::schema::FilterConfig;
use crate::observability::metrics;

/// A watcher that monitors the policy file for changes.
pub struct PolicyWatcher {
    path: PathBuf,
    poll_interval: Duration,
    update_tx: mpsc::UnboundedSender<FilterConfig>,
}

impl PolicyWatcher {
    /// Create a new PolicyWatcher.
    ///
    /// Returns the watcher and a receiver for validated configuration updates.
    pub fn new(path: &Path, poll_interval: Duration) -> (Self, mpsc::UnboundedReceiver<FilterConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                poll_interval,
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for events to keep flowing.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!(path = ?path, "Policy file change detected, reloading");
                        reload(&path, &tx);
                    }
                }
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(self.poll_interval),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Policy watcher started");
        Ok(watcher)
    }
}

/// Load `path` and forward it; on failure the current policy stays in effect.
///
/// Empty content is rejected: editors and shell redirection truncate the file
/// before writing, and an empty file would otherwise parse as the built-in
/// policy.
fn reload(path: &Path, tx: &mpsc::UnboundedSender<FilterConfig>) {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            metrics::record_reload("rejected");
            tracing::error!(error = %e, "Failed to read policy. Keeping current policy.");
            return;
        }
    };

    if content.trim().is_empty() {
        metrics::record_reload("rejected");
        tracing::warn!(path = ?path, "Policy file is empty. Keeping current policy.");
        return;
    }

    match parse_config(&content) {
        Ok(new_config) => {
            if tx.send(new_config).is_err() {
                tracing::debug!("Policy update receiver dropped");
            }
        }
        Err(e) => {
            metrics::record_reload("rejected");
            tracing::error!(error = %e, "Failed to reload policy. Keeping current policy.");
        }
    }
}
