// ── Re-query notifications ──
//
// The listener does not know which conditions depend on the tracker, so
// after every handled event it asks the controller to re-evaluate all of
// this plugin's conditions. `RequerySink` is the seam; the default
// implementation fans out over a tokio `broadcast` channel.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::broadcast;
use tracing::trace;

/// Receiver of "state may have changed" signals.
pub trait RequerySink: Send + Sync {
    fn notify_state_may_have_changed(&self);
}

/// A re-query request as seen by the controller.
///
/// `source` addresses the request: the host only re-queries conditions
/// created by the editor it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequeryRequest {
    pub source: Arc<str>,
}

/// Broadcast-backed [`RequerySink`].
pub struct RequeryBroadcaster {
    request: RequeryRequest,
    tx: broadcast::Sender<RequeryRequest>,
    sent: AtomicU64,
}

impl RequeryBroadcaster {
    pub fn new(source: &str, capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            request: RequeryRequest {
                source: Arc::from(source),
            },
            tx,
            sent: AtomicU64::new(0),
        }
    }

    /// Subscribe to re-query requests. Slow receivers observe
    /// `RecvError::Lagged` rather than stalling the event path.
    pub fn subscribe(&self) -> broadcast::Receiver<RequeryRequest> {
        self.tx.subscribe()
    }

    /// Total requests issued, whether or not anyone was listening.
    pub fn sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }
}

impl RequerySink for RequeryBroadcaster {
    fn notify_state_may_have_changed(&self) {
        self.sent.fetch_add(1, Ordering::Relaxed);
        // No receivers is fine: nobody is waiting on a verdict yet.
        let receivers = self.tx.send(self.request.clone()).unwrap_or(0);
        trace!(source = %self.request.source, receivers, "re-query requested");
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::broadcast::error::TryRecvError;

    use super::*;

    #[test]
    fn every_notification_reaches_subscribers() {
        let broadcaster = RequeryBroadcaster::new("ssidwatch.editor", 8);
        let mut rx = broadcaster.subscribe();

        broadcaster.notify_state_may_have_changed();
        broadcaster.notify_state_may_have_changed();

        assert_eq!(rx.try_recv().map(|r| r.source.to_string()).ok(), Some("ssidwatch.editor".into()));
        assert!(rx.try_recv().is_ok());
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
        assert_eq!(broadcaster.sent(), 2);
    }

    #[test]
    fn notifying_without_subscribers_is_harmless() {
        let broadcaster = RequeryBroadcaster::new("ssidwatch.editor", 8);
        broadcaster.notify_state_may_have_changed();
        assert_eq!(broadcaster.sent(), 1);
    }

    #[test]
    fn slow_receivers_lag_instead_of_blocking() {
        let broadcaster = RequeryBroadcaster::new("ssidwatch.editor", 2);
        let mut rx = broadcaster.subscribe();
        for _ in 0..5 {
            broadcaster.notify_state_may_have_changed();
        }
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Lagged(3))));
    }
}
