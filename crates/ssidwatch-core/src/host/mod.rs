// ── Host protocol glue ──
//
// The automation host stores an opaque key/value bundle per condition and
// hands it back on every query. This module owns that bundle's shape, the
// validation of incoming queries, and the editor backend that produces the
// bundle in the first place.

mod editor;
mod query;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use editor::{EditOutcome, initial_input, suggest_network_names};
pub use query::{QueryIntent, QueryResponder};

/// Intent action the host uses to ask for a condition verdict.
pub const ACTION_QUERY_CONDITION: &str = "com.twofortyfouram.locale.intent.action.QUERY_CONDITION";

/// Bundle key under which the target SSID is stored.
pub const BUNDLE_EXTRA_SSID: &str = "org.johanhil.ssid.extra.SSID";

/// The per-condition data the host stores and forwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionBundle {
    #[serde(rename = "org.johanhil.ssid.extra.SSID")]
    pub ssid: String,
}

impl ConditionBundle {
    pub fn new(ssid: impl Into<String>) -> Self {
        Self { ssid: ssid.into() }
    }

    /// Read a bundle back from the host's untyped map. `None` when the SSID
    /// key is absent or not a string.
    pub fn from_map(map: &Map<String, Value>) -> Option<Self> {
        map.get(BUNDLE_EXTRA_SSID)
            .and_then(Value::as_str)
            .map(Self::new)
    }

    /// The untyped form handed to the host.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(BUNDLE_EXTRA_SSID.to_owned(), Value::String(self.ssid.clone()));
        map
    }
}
