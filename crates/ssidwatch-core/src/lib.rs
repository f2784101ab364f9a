// ssidwatch-core: Visible-network tracking behind the SSID condition plugin.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod host;
pub mod listener;
pub mod model;
pub mod plugin;
pub mod replay;
pub mod requery;
pub mod store;
pub mod wireless;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::PluginConfig;
pub use error::CoreError;
pub use evaluator::ConditionEvaluator;
pub use host::{
    ACTION_QUERY_CONDITION, BUNDLE_EXTRA_SSID, ConditionBundle, EditOutcome, QueryIntent,
    QueryResponder, initial_input, suggest_network_names,
};
pub use listener::{EventListener, ListenerState};
pub use plugin::SsidPlugin;
pub use replay::{Replay, ReplayRow, RowTrigger};
pub use requery::{RequeryBroadcaster, RequeryRequest, RequerySink};
pub use store::{TrackedNetworkSet, VisibilityTracker};
pub use wireless::{
    EventSink, Scenario, ScriptStep, ScriptedWireless, SubscriptionHandle, WirelessSubsystem,
};

pub use model::verdict::{RESULT_CONDITION_SATISFIED, RESULT_CONDITION_UNSATISFIED};
pub use model::{
    ConfiguredNetwork, EventKind, NetworkInfo, NetworkState, RadioState, ScanResult, Verdict,
    WirelessEvent,
};
