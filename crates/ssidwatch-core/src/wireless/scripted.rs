// ── In-memory wireless subsystem ──
//
// Drives the listener from scripts and tests. State changes and event
// emission are explicit; sinks are collected under the lock and invoked
// after it is released so a sink may call back into the subsystem.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::debug;

use super::{EventSink, Scenario, ScriptStep, SubscriptionHandle, WirelessSubsystem};
use crate::error::CoreError;
use crate::model::{
    ConfiguredNetwork, EventKind, NetworkInfo, NetworkState, ScanResult, WirelessEvent,
};

struct Registration {
    id: u64,
    kinds: Vec<EventKind>,
    sink: Arc<dyn EventSink>,
}

struct ScriptedState {
    available: bool,
    scan: Option<Vec<ScanResult>>,
    configured: Option<Vec<ConfiguredNetwork>>,
    connection: Option<String>,
    registrations: Vec<Registration>,
    next_id: u64,
}

/// Scriptable [`WirelessSubsystem`].
pub struct ScriptedWireless {
    state: Arc<Mutex<ScriptedState>>,
}

impl ScriptedWireless {
    /// An available subsystem with no scan results yet.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ScriptedState {
                available: true,
                scan: None,
                configured: None,
                connection: None,
                registrations: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// A subsystem that refuses subscriptions and reports no data.
    pub fn unavailable() -> Self {
        let wireless = Self::new();
        wireless.set_available(false);
        wireless
    }

    /// Seed configured networks from a scenario.
    pub fn from_scenario(scenario: &Scenario) -> Self {
        let wireless = Self::new();
        if !scenario.configured.is_empty() {
            wireless.set_configured_networks(
                scenario
                    .configured
                    .iter()
                    .map(|ssid| ConfiguredNetwork::new(ssid.as_str()))
                    .collect(),
            );
        }
        wireless
    }

    fn lock(&self) -> MutexGuard<'_, ScriptedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── State setters ────────────────────────────────────────────────

    pub fn set_available(&self, available: bool) {
        self.lock().available = available;
    }

    pub fn set_scan_results(&self, results: Option<Vec<ScanResult>>) {
        self.lock().scan = results;
    }

    pub fn set_configured_networks(&self, networks: Vec<ConfiguredNetwork>) {
        self.lock().configured = Some(networks);
    }

    pub fn set_connection(&self, name: Option<String>) {
        self.lock().connection = name;
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().registrations.len()
    }

    // ── Event delivery ───────────────────────────────────────────────

    /// Deliver `event` to every sink registered for its kind. Unrecognized
    /// events go to every sink, the way a broadcast bus forwards unexpected
    /// actions. Returns the number of sinks reached.
    pub fn emit(&self, event: &WirelessEvent) -> usize {
        let sinks: Vec<Arc<dyn EventSink>> = {
            let state = self.lock();
            state
                .registrations
                .iter()
                .filter(|reg| event.kind().is_none_or(|kind| reg.kinds.contains(&kind)))
                .map(|reg| Arc::clone(&reg.sink))
                .collect()
        };

        debug!(action = event.action(), sinks = sinks.len(), "emitting wireless event");
        for sink in &sinks {
            sink.on_event(event.clone());
        }
        sinks.len()
    }

    /// New scan results, then a scan-results-updated event.
    pub fn scan<I, S>(&self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let results = names.into_iter().map(ScanResult::new).collect();
        self.set_scan_results(Some(results));
        self.emit(&WirelessEvent::ScanResultsAvailable)
    }

    /// Apply one scripted step. Returns the event that was emitted, if the
    /// step produces one (`query` and `wait` do not).
    pub fn apply(&self, step: &ScriptStep) -> Option<WirelessEvent> {
        let event = match step {
            ScriptStep::Scan { networks } => {
                self.set_scan_results(Some(
                    networks.iter().map(|n| ScanResult::new(n.as_str())).collect(),
                ));
                WirelessEvent::ScanResultsAvailable
            }
            ScriptStep::ScanUnavailable => {
                self.set_scan_results(None);
                WirelessEvent::ScanResultsAvailable
            }
            ScriptStep::Radio { state } => {
                if state.is_off() {
                    let mut guard = self.lock();
                    guard.scan = None;
                    guard.connection = None;
                }
                WirelessEvent::RadioStateChanged { state: *state }
            }
            ScriptStep::Connect { ssid } => {
                self.set_connection(ssid.clone());
                WirelessEvent::NetworkStateChanged {
                    info: Some(NetworkInfo::new(NetworkState::Connected)),
                }
            }
            ScriptStep::Disconnect => {
                self.set_connection(None);
                WirelessEvent::NetworkStateChanged {
                    info: Some(NetworkInfo::new(NetworkState::Disconnected)),
                }
            }
            ScriptStep::NetworkState { state } => WirelessEvent::NetworkStateChanged {
                info: state.map(NetworkInfo::new),
            },
            ScriptStep::Unrecognized { action } => WirelessEvent::Unrecognized {
                action: action.clone(),
            },
            ScriptStep::Query { .. } | ScriptStep::Wait { .. } => return None,
        };

        self.emit(&event);
        Some(event)
    }
}

impl Default for ScriptedWireless {
    fn default() -> Self {
        Self::new()
    }
}

impl WirelessSubsystem for ScriptedWireless {
    fn subscribe(
        &self,
        kinds: &[EventKind],
        sink: Arc<dyn EventSink>,
    ) -> Result<SubscriptionHandle, CoreError> {
        let mut state = self.lock();
        if !state.available {
            return Err(CoreError::WirelessUnavailable {
                reason: "radio service is not running".into(),
            });
        }

        let id = state.next_id;
        state.next_id += 1;
        state.registrations.push(Registration {
            id,
            kinds: kinds.to_vec(),
            sink,
        });
        debug!(id, ?kinds, "registered wireless sink");

        let weak: Weak<Mutex<ScriptedState>> = Arc::downgrade(&self.state);
        Ok(SubscriptionHandle::new(move || {
            if let Some(state) = weak.upgrade() {
                let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
                state.registrations.retain(|reg| reg.id != id);
                debug!(id, "released wireless sink");
            }
        }))
    }

    fn scan_results(&self) -> Option<Vec<ScanResult>> {
        let state = self.lock();
        if state.available { state.scan.clone() } else { None }
    }

    fn configured_networks(&self) -> Option<Vec<ConfiguredNetwork>> {
        let state = self.lock();
        if state.available { state.configured.clone() } else { None }
    }

    fn connection_name(&self) -> Option<String> {
        let state = self.lock();
        if state.available { state.connection.clone() } else { None }
    }
}
