// ── Editor backend ──
//
// Everything the settings editor needs besides the widgets: what to show
// when it opens, whether the typed text is worth saving, and which names
// to offer as completions.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value};

use super::ConditionBundle;
use crate::wireless::WirelessSubsystem;

/// What the editor hands back to the host when it closes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum EditOutcome {
    /// Store `bundle`; show `blurb` as the condition's summary.
    Saved {
        bundle: ConditionBundle,
        blurb: String,
    },
    Cancelled,
}

impl EditOutcome {
    /// Close the editor. `dont_save` is the explicit discard action and wins
    /// over any text; otherwise this is [`from_input`](Self::from_input).
    pub fn finish(text: &str, dont_save: bool) -> Self {
        if dont_save {
            return Self::Cancelled;
        }
        Self::from_input(text)
    }

    /// Blank input (after trimming) cancels; anything else is saved as typed.
    pub fn from_input(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::Cancelled;
        }
        Self::Saved {
            bundle: ConditionBundle::new(text),
            blurb: text.to_owned(),
        }
    }

    pub fn bundle(&self) -> Option<&ConditionBundle> {
        match self {
            Self::Saved { bundle, .. } => Some(bundle),
            Self::Cancelled => None,
        }
    }
}

/// Text the input starts with. An existing condition forwards its bundle;
/// a new one (or a bundle without a usable SSID) starts empty.
pub fn initial_input(forwarded: Option<&Map<String, Value>>) -> String {
    forwarded
        .and_then(ConditionBundle::from_map)
        .map(|bundle| bundle.ssid)
        .unwrap_or_default()
}

/// Autocomplete candidates: current scan results plus saved profiles,
/// de-duplicated and sorted. Empty names are skipped.
pub fn suggest_network_names(wireless: &dyn WirelessSubsystem) -> Vec<String> {
    let mut names = BTreeSet::new();

    for result in wireless.scan_results().unwrap_or_default() {
        names.insert(result.ssid);
    }
    for network in wireless.configured_networks().unwrap_or_default() {
        names.insert(network.unquoted_name().to_owned());
    }

    names.remove("");
    names.into_iter().collect()
}
