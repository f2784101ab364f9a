// ── Visibility tracker ──
//
// The single shared set of network names believed visible or connected.
// The whole `TrackedNetworkSet` lives inside one `watch` channel: writers
// commit through `send_if_modified` (atomic under the channel lock),
// readers go through `borrow()`, so nobody observes a half-applied update.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

/// Point-in-time value of the tracker.
#[derive(Debug, Clone, Default)]
pub struct TrackedNetworkSet {
    names: HashSet<String>,
    active: bool,
    updated_at: Option<DateTime<Utc>>,
}

impl TrackedNetworkSet {
    pub fn names(&self) -> &HashSet<String> {
        &self.names
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn contains(&self, name: &str) -> bool {
        !name.is_empty() && self.names.contains(name)
    }

    /// Names in sorted order.
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names.iter().cloned().collect();
        names.sort_unstable();
        names
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

/// Shared, thread-safe owner of the tracked network set.
///
/// Outside this crate the tracker is read-only: lifecycle and mutation
/// belong to the [`EventListener`](crate::listener::EventListener) that owns
/// the wireless subscription. Every mutator other than `start` and `stop`
/// is a no-op while tracking is inactive. Mutators return whether they
/// committed a change.
///
/// ```compile_fail
/// use std::sync::Arc;
/// use ssidwatch_core::{PluginConfig, ScriptedWireless, SsidPlugin};
///
/// let plugin = SsidPlugin::new(PluginConfig::default(), Arc::new(ScriptedWireless::new()));
/// plugin.start();
/// plugin.tracker().stop();
/// ```
pub struct VisibilityTracker {
    state: watch::Sender<TrackedNetworkSet>,
}

impl VisibilityTracker {
    pub fn new() -> Self {
        let (state, _) = watch::channel(TrackedNetworkSet::default());
        Self { state }
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Begin tracking with an empty set. No-op if already active.
    pub(crate) fn start(&self) -> bool {
        self.state.send_if_modified(|set| {
            if set.active {
                return false;
            }
            set.names.clear();
            set.active = true;
            set.touch();
            true
        })
    }

    /// Stop tracking and forget every name. No-op if already inactive.
    pub(crate) fn stop(&self) -> bool {
        self.state.send_if_modified(|set| {
            if !set.active {
                return false;
            }
            set.names.clear();
            set.active = false;
            set.touch();
            true
        })
    }

    pub fn is_active(&self) -> bool {
        self.state.borrow().active
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Install a complete scan snapshot, discarding whatever was there.
    /// Empty names (hidden networks) are dropped.
    pub(crate) fn replace_all<I, S>(&self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        // Built before taking the lock.
        let fresh: HashSet<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|name: &String| !name.is_empty())
            .collect();

        self.state.send_if_modified(move |set| {
            if !set.active {
                return false;
            }
            set.names = fresh;
            set.touch();
            true
        })
    }

    /// Record a single network name from a connection event.
    pub(crate) fn add(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        self.state.send_if_modified(|set| {
            if !set.active {
                return false;
            }
            set.names.insert(name.to_owned());
            set.touch();
            true
        })
    }

    /// Forget every name but keep tracking (radio went down).
    pub(crate) fn clear(&self) -> bool {
        self.state.send_if_modified(|set| {
            if !set.active {
                return false;
            }
            set.names.clear();
            set.touch();
            true
        })
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn contains(&self, name: &str) -> bool {
        self.state.borrow().contains(name)
    }

    /// Current names, sorted.
    pub fn snapshot(&self) -> Vec<String> {
        self.state.borrow().sorted_names()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().names.is_empty()
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.state.borrow().updated_at
    }

    /// Observe every committed change.
    pub fn subscribe(&self) -> watch::Receiver<TrackedNetworkSet> {
        self.state.subscribe()
    }
}

impl Default for VisibilityTracker {
    fn default() -> Self {
        Self::new()
    }
}
