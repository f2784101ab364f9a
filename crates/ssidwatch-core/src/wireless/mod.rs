// ── Wireless subsystem boundary ──
//
// The core never talks to a radio directly. It consumes notifications
// through an `EventSink` and pulls best-effort data through the
// `WirelessSubsystem` trait. `None` from any data accessor means "no data",
// never an error.

mod scripted;
mod script;

use std::fmt;
use std::sync::Arc;

use crate::error::CoreError;
use crate::model::{ConfiguredNetwork, EventKind, ScanResult, WirelessEvent};

pub use script::{Scenario, ScriptStep};
pub use scripted::ScriptedWireless;

/// Receiver of wireless notifications. Called on whatever thread the
/// subsystem delivers on.
pub trait EventSink: Send + Sync {
    fn on_event(&self, event: WirelessEvent);
}

/// Data and event source for the tracker.
pub trait WirelessSubsystem: Send + Sync {
    /// Register `sink` for the given event kinds. The registration stays
    /// live until the returned handle is released or dropped.
    fn subscribe(
        &self,
        kinds: &[EventKind],
        sink: Arc<dyn EventSink>,
    ) -> Result<SubscriptionHandle, CoreError>;

    /// Latest scan results, or `None` when unavailable.
    fn scan_results(&self) -> Option<Vec<ScanResult>>;

    /// Saved network profiles, or `None` when unavailable.
    fn configured_networks(&self) -> Option<Vec<ConfiguredNetwork>>;

    /// Name of the currently associated network, if any.
    fn connection_name(&self) -> Option<String>;
}

// ── SubscriptionHandle ───────────────────────────────────────────────

type ReleaseFn = Box<dyn FnOnce() + Send + Sync>;

/// A live registration with a [`WirelessSubsystem`].
///
/// The release callback runs exactly once: either through
/// [`release`](Self::release) or when the handle is dropped.
pub struct SubscriptionHandle {
    release: Option<ReleaseFn>,
}

impl SubscriptionHandle {
    pub fn new(release: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Deregister from the subsystem.
    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("live", &self.release.is_some())
            .finish()
    }
}
