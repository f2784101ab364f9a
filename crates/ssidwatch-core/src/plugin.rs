// ── Plugin facade ──
//
// One object per process. Owns the shared tracker and wires the listener,
// evaluator, query responder and re-query broadcaster around it so the
// host-facing entry points all see the same state.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};

use crate::config::PluginConfig;
use crate::evaluator::ConditionEvaluator;
use crate::host::{QueryIntent, QueryResponder};
use crate::listener::{EventListener, ListenerState};
use crate::model::Verdict;
use crate::requery::{RequeryBroadcaster, RequeryRequest};
use crate::store::{TrackedNetworkSet, VisibilityTracker};
use crate::wireless::WirelessSubsystem;

/// The main entry point for hosts.
///
/// Cheaply cloneable via `Arc<PluginInner>`. Nothing is registered with
/// the wireless subsystem until the first query or an explicit
/// [`start()`](Self::start).
#[derive(Clone)]
pub struct SsidPlugin {
    inner: Arc<PluginInner>,
}

struct PluginInner {
    config: PluginConfig,
    tracker: Arc<VisibilityTracker>,
    requery: Arc<RequeryBroadcaster>,
    listener: EventListener,
    evaluator: ConditionEvaluator,
    responder: QueryResponder,
}

impl SsidPlugin {
    pub fn new(config: PluginConfig, wireless: Arc<dyn WirelessSubsystem>) -> Self {
        let tracker = Arc::new(VisibilityTracker::new());
        let requery = Arc::new(RequeryBroadcaster::new(
            &config.requery_source,
            config.requery_capacity,
        ));
        let listener = EventListener::new(tracker.clone(), wireless, requery.clone());
        let evaluator = ConditionEvaluator::new(listener.clone(), tracker.clone());
        let responder = QueryResponder::new(evaluator.clone());

        Self {
            inner: Arc::new(PluginInner {
                config,
                tracker,
                requery,
                listener,
                evaluator,
                responder,
            }),
        }
    }

    pub fn config(&self) -> &PluginConfig {
        &self.inner.config
    }

    pub fn tracker(&self) -> &Arc<VisibilityTracker> {
        &self.inner.tracker
    }

    pub fn listener(&self) -> &EventListener {
        &self.inner.listener
    }

    pub fn evaluator(&self) -> &ConditionEvaluator {
        &self.inner.evaluator
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Start tracking ahead of the first query. Failures are absorbed the
    /// same way a query absorbs them.
    pub fn start(&self) {
        self.inner.evaluator.ensure_started();
    }

    pub fn stop(&self) -> bool {
        self.inner.listener.stop()
    }

    pub fn state(&self) -> ListenerState {
        self.inner.listener.state()
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Evaluate a bare target, bypassing bundle validation.
    pub fn evaluate(&self, target_ssid: Option<&str>) -> Verdict {
        self.inner.evaluator.evaluate(target_ssid)
    }

    /// Answer a host query; `None` means the query was ignored.
    pub fn respond(&self, intent: &QueryIntent) -> Option<Verdict> {
        self.inner.responder.respond(intent)
    }

    // ── Observation ──────────────────────────────────────────────────

    /// Re-query requests, one per handled wireless event.
    pub fn requery_requests(&self) -> broadcast::Receiver<RequeryRequest> {
        self.inner.requery.subscribe()
    }

    pub fn requery_count(&self) -> u64 {
        self.inner.requery.sent()
    }

    /// Watch the tracked set change.
    pub fn tracked_networks(&self) -> watch::Receiver<TrackedNetworkSet> {
        self.inner.tracker.subscribe()
    }
}
