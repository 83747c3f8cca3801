//! Shutdown coordination for background policy tasks.

use std::future::Future;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// How long tracked tasks get to exit before they are aborted.
pub const DEFAULT_GRACE: Duration = Duration::from_secs(5);

/// Owns the shutdown broadcast and the tasks listening to it.
///
/// Tasks started with [`Shutdown::spawn`] receive their own subscription and
/// are joined by [`Shutdown::drain`].
pub struct Shutdown {
    tx: broadcast::Sender<()>,
    tasks: Vec<(&'static str, JoinHandle<()>)>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            tasks: Vec::new(),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Spawn a named task that stops when shutdown is broadcast.
    pub fn spawn<F, Fut>(&mut self, name: &'static str, task: F)
    where
        F: FnOnce(broadcast::Receiver<()>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(task(self.subscribe()));
        tracing::debug!(task = name, "Background task started");
        self.tasks.push((name, handle));
    }

    /// Broadcast shutdown. Safe to call more than once.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Number of tracked tasks not yet joined.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Broadcast shutdown and join every tracked task.
    ///
    /// A task still running after `grace` is aborted. Returns how many were.
    pub async fn drain(mut self, grace: Duration) -> usize {
        self.trigger();

        let mut aborted = 0;
        for (name, mut handle) in self.tasks.drain(..) {
            match tokio::time::timeout(grace, &mut handle).await {
                Ok(Ok(())) => tracing::debug!(task = name, "Background task stopped"),
                Ok(Err(e)) => tracing::warn!(task = name, error = %e, "Background task failed"),
                Err(_) => {
                    tracing::warn!(task = name, grace_ms = grace.as_millis() as u64, "Background task aborted");
                    handle.abort();
                    aborted += 1;
                }
            }
        }
        aborted
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
