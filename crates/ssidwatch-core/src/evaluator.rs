// ── Condition evaluator ──
//
// The query path. Stateless apart from the shared tracker it reads and the
// listener it wakes up on first use.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::listener::EventListener;
use crate::model::Verdict;
use crate::store::VisibilityTracker;

/// Answers "is network X currently visible or connected?".
#[derive(Clone)]
pub struct ConditionEvaluator {
    listener: EventListener,
    tracker: Arc<VisibilityTracker>,
}

impl ConditionEvaluator {
    pub fn new(listener: EventListener, tracker: Arc<VisibilityTracker>) -> Self {
        Self { listener, tracker }
    }

    /// Evaluate the condition for `target_ssid`.
    ///
    /// Starts the listener if it is not running. Right after a cold start
    /// no scan has arrived yet, so the answer is UNSATISFIED even for a
    /// network that is in range; the next re-query corrects it.
    pub fn evaluate(&self, target_ssid: Option<&str>) -> Verdict {
        self.ensure_started();

        let Some(target) = target_ssid.filter(|ssid| !ssid.is_empty()) else {
            debug!("empty target SSID never matches");
            return Verdict::Unsatisfied;
        };

        let verdict = Verdict::from_match(self.tracker.contains(target));
        debug!(ssid = target, %verdict, tracked = self.tracker.len(), "condition evaluated");
        verdict
    }

    /// Start tracking if nothing has yet. Failures are logged and absorbed:
    /// queries keep answering UNSATISFIED until a later start succeeds.
    pub fn ensure_started(&self) {
        match self.listener.start() {
            Ok(true) => debug!("listener started lazily by a query"),
            Ok(false) => {}
            Err(e) => warn!(error = %e, "cannot start tracking; condition stays unsatisfied"),
        }
    }
}
