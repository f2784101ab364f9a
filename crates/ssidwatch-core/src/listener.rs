// ── Event listener ──
//
// Bridges wireless notifications to tracker mutations. Two states,
// Stopped and Started, cycled by `start()`/`stop()` for as long as the
// process lives. Transitions are serialized by the lifecycle mutex that
// also owns the subscription handle, so racing callers can never register
// twice.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use strum::Display;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::model::{EventKind, NetworkInfo, NetworkState, RadioState, WirelessEvent};
use crate::requery::RequerySink;
use crate::store::VisibilityTracker;
use crate::wireless::{EventSink, SubscriptionHandle, WirelessSubsystem};

/// Event kinds registered on start.
pub const SUBSCRIBED_KINDS: [EventKind; 3] = [
    EventKind::ScanResultsUpdated,
    EventKind::RadioStateChanged,
    EventKind::NetworkStateChanged,
];

/// Observable lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ListenerState {
    Stopped,
    Started,
}

// ── EventListener ────────────────────────────────────────────────────

/// Cheaply cloneable handle to the process-wide listener.
#[derive(Clone)]
pub struct EventListener {
    inner: Arc<ListenerInner>,
}

struct ListenerInner {
    dispatcher: Arc<Dispatcher>,
    subscription: Mutex<Option<SubscriptionHandle>>,
}

impl EventListener {
    pub fn new(
        tracker: Arc<VisibilityTracker>,
        wireless: Arc<dyn WirelessSubsystem>,
        requery: Arc<dyn RequerySink>,
    ) -> Self {
        Self {
            inner: Arc::new(ListenerInner {
                dispatcher: Arc::new(Dispatcher {
                    started: AtomicBool::new(false),
                    tracker,
                    wireless,
                    requery,
                }),
                subscription: Mutex::new(None),
            }),
        }
    }

    /// Stopped → Started. Returns `Ok(true)` if this call performed the
    /// transition, `Ok(false)` if the listener was already running.
    ///
    /// On a refused subscription the tracker is deactivated again and the
    /// listener stays Stopped.
    pub fn start(&self) -> Result<bool, CoreError> {
        let mut subscription = self.inner.lock_subscription();
        if subscription.is_some() {
            return Ok(false);
        }

        let dispatcher = &self.inner.dispatcher;
        dispatcher.tracker.start();

        let sink: Arc<dyn EventSink> = Arc::clone(dispatcher) as Arc<dyn EventSink>;
        match dispatcher.wireless.subscribe(&SUBSCRIBED_KINDS, sink) {
            Ok(handle) => {
                *subscription = Some(handle);
                dispatcher.started.store(true, Ordering::Release);
                info!("wireless listener started");
                Ok(true)
            }
            Err(e) => {
                dispatcher.tracker.stop();
                warn!(error = %e, "wireless listener failed to start");
                Err(e)
            }
        }
    }

    /// Started → Stopped. Returns whether this call performed the transition.
    pub fn stop(&self) -> bool {
        let mut subscription = self.inner.lock_subscription();
        let Some(handle) = subscription.take() else {
            return false;
        };

        self.inner.dispatcher.started.store(false, Ordering::Release);
        handle.release();
        self.inner.dispatcher.tracker.stop();
        info!("wireless listener stopped");
        true
    }

    pub fn state(&self) -> ListenerState {
        if self.inner.lock_subscription().is_some() {
            ListenerState::Started
        } else {
            ListenerState::Stopped
        }
    }

    pub fn is_started(&self) -> bool {
        self.state() == ListenerState::Started
    }

    /// Feed an event directly, bypassing the subsystem's delivery.
    ///
    /// Returns the kind that was handled, or `None` if the event was
    /// dropped (listener stopped, or unrecognized kind).
    pub fn handle_event(&self, event: WirelessEvent) -> Option<EventKind> {
        self.inner.dispatcher.dispatch(event)
    }
}

impl ListenerInner {
    fn lock_subscription(&self) -> MutexGuard<'_, Option<SubscriptionHandle>> {
        self.subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for ListenerInner {
    fn drop(&mut self) {
        let handle = self
            .subscription
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            self.dispatcher.started.store(false, Ordering::Release);
            handle.release();
            self.dispatcher.tracker.stop();
        }
    }
}

// ── Dispatcher ───────────────────────────────────────────────────────

/// The registered sink. Holds only what event handling needs, so the
/// subsystem never keeps the lifecycle state alive.
///
/// `started` mirrors the lifecycle: set after the subscription is stored,
/// cleared before it is released. Events are gated on it, not on the
/// tracker's own flag.
struct Dispatcher {
    started: AtomicBool,
    tracker: Arc<VisibilityTracker>,
    wireless: Arc<dyn WirelessSubsystem>,
    requery: Arc<dyn RequerySink>,
}

impl Dispatcher {
    fn dispatch(&self, event: WirelessEvent) -> Option<EventKind> {
        debug!(action = event.action(), "received wireless event");

        if !self.is_started() {
            debug!(action = event.action(), "listener stopped, dropping event");
            return None;
        }

        let kind = match event {
            WirelessEvent::ScanResultsAvailable => {
                self.on_scan_results();
                EventKind::ScanResultsUpdated
            }
            WirelessEvent::RadioStateChanged { state } => {
                self.on_radio_state(state);
                EventKind::RadioStateChanged
            }
            WirelessEvent::NetworkStateChanged { info } => {
                self.on_network_state(info);
                EventKind::NetworkStateChanged
            }
            WirelessEvent::Unrecognized { action } => {
                debug!(%action, "ignoring unrecognized event");
                return None;
            }
        };

        // A stop that lands after this check can still let one request
        // through; the host re-queries a stopped plugin and gets UNSATISFIED.
        if !self.is_started() {
            debug!(%kind, "listener stopped while handling, no re-query");
            return None;
        }

        // Unconditional, even when the handler changed nothing.
        self.requery.notify_state_may_have_changed();
        Some(kind)
    }

    fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    fn on_scan_results(&self) {
        let names: Vec<String> = self
            .wireless
            .scan_results()
            .unwrap_or_default()
            .into_iter()
            .map(|result| result.ssid)
            .collect();

        debug!(count = names.len(), "applying scan snapshot");
        self.tracker.replace_all(names);
    }

    fn on_radio_state(&self, state: RadioState) {
        debug!(%state, "radio state changed");
        if state.is_off() {
            info!(%state, "radio going down, clearing tracked networks");
            self.tracker.clear();
        }
    }

    fn on_network_state(&self, info: Option<NetworkInfo>) {
        let Some(info) = info else {
            debug!("network state event without payload");
            return;
        };

        if info.state != NetworkState::Connected {
            debug!(state = %info.state, "network not connected, nothing to record");
            return;
        }

        match self.wireless.connection_name() {
            Some(ssid) => {
                debug!(%ssid, "connected to network");
                self.tracker.add(&ssid);
            }
            None => debug!("connected but no network name available"),
        }
    }
}

impl EventSink for Dispatcher {
    fn on_event(&self, event: WirelessEvent) {
        self.dispatch(event);
    }
}
