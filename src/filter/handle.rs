//! Shared, hot-swappable filter.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::sync::{broadcast, mpsc};

use crate::config::schema::FilterConfig;
use crate::filter::decision::Decision;
use crate::filter::descriptor::RequestDescriptor;
use crate::filter::engine::RequestFilter;
use crate::filter::policy::Policy;
use crate::observability::metrics;

/// Cloneable handle to the active [`RequestFilter`].
///
/// Every evaluation runs against one snapshot; a reload installs a new
/// snapshot for subsequent calls without blocking readers.
#[derive(Debug, Clone)]
pub struct FilterHandle {
    current: Arc<ArcSwap<RequestFilter>>,
}

impl FilterHandle {
    pub fn new(filter: RequestFilter) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(filter)),
        }
    }

    /// The snapshot currently in effect.
    pub fn snapshot(&self) -> Arc<RequestFilter> {
        self.current.load_full()
    }

    /// Install a new filter for all subsequent evaluations.
    pub fn replace(&self, filter: RequestFilter) {
        self.current.store(Arc::new(filter));
    }

    /// Apply config updates until `shutdown` fires or the sender is dropped.
    pub async fn follow(
        self,
        mut updates: mpsc::UnboundedReceiver<FilterConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        loop {
            tokio::select! {
                update = updates.recv() => {
                    let Some(config) = update else {
                        tracing::debug!("Config update channel closed");
                        break;
                    };
                    self.replace(RequestFilter::from_config(&config.policy));
                    metrics::record_reload("applied");
                    tracing::info!(
                        patterns = config.policy.denylist.len(),
                        blocked_destinations = ?config.policy.blocked_destinations,
                        "Filter policy reloaded"
                    );
                }
                _ = shutdown.recv() => {
                    tracing::debug!("Stopping config follower");
                    break;
                }
            }
        }
    }
}

impl Default for FilterHandle {
    fn default() -> Self {
        Self::new(RequestFilter::default())
    }
}

impl Policy for FilterHandle {
    fn evaluate(&self, request: &RequestDescriptor) -> Decision {
        self.current.load().evaluate(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::denylist::Denylist;
    use crate::lifecycle::Shutdown;

    #[test]
    fn test_replace_affects_next_call() {
        let handle = FilterHandle::default();
        let req = RequestDescriptor::new("example.com");
        assert!(handle.decide(&req));

        handle.replace(RequestFilter::new(Denylist::new(["example"]), Vec::new()));
        assert!(!handle.decide(&req));

        // Clones share the same slot.
        let clone = handle.clone();
        clone.replace(RequestFilter::default());
        assert!(handle.decide(&req));
    }

    #[test]
    fn test_snapshot_is_stable() {
        let handle = FilterHandle::default();
        let before = handle.snapshot();
        handle.replace(RequestFilter::new(Denylist::new(["example"]), Vec::new()));
        assert!(before.decide(&RequestDescriptor::new("example.com")));
        assert!(!handle.snapshot().decide(&RequestDescriptor::new("example.com")));
    }

    #[tokio::test]
    async fn test_follow_applies_updates_until_shutdown() {
        let handle = FilterHandle::default();
        let shutdown = Shutdown::new();
        let (tx, rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(handle.clone().follow(rx, shutdown.subscribe()));

        let mut config = FilterConfig::default();
        config.policy.denylist = vec!["example".into()];
        tx.send(config).unwrap();

        let req = RequestDescriptor::new("example.com");
        for _ in 0..50 {
            if !handle.decide(&req) {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert!(!handle.decide(&req));

        shutdown.trigger();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_follow_stops_when_sender_dropped() {
        let handle = FilterHandle::default();
        let shutdown = Shutdown::new();
        let (tx, rx) = mpsc::unbounded_channel::<FilterConfig>();
        drop(tx);
        handle.follow(rx, shutdown.subscribe()).await;
    }
}
