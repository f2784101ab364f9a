// ── Scenario scripts ──
//
// TOML description of a sequence of wireless happenings, replayed
// against a `ScriptedWireless`.
//
// ```toml
// configured = ["\"HomeNet\""]
//
// [[steps]]
// kind = "scan"
// networks = ["HomeNet", "CoffeeShop"]
//
// [[steps]]
// kind = "query"
// ssid = "HomeNet"
// ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::{NetworkState, RadioState};

/// A parsed scenario file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Saved network profiles, in the platform's quoted form.
    #[serde(default)]
    pub configured: Vec<String>,

    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

impl Scenario {
    pub fn from_toml(source: &str) -> Result<Self, CoreError> {
        let scenario: Self = toml::from_str(source)?;
        if scenario.steps.is_empty() {
            return Err(CoreError::Scenario {
                message: "scenario has no steps".into(),
            });
        }
        Ok(scenario)
    }

    /// Number of `query` steps.
    pub fn query_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step, ScriptStep::Query { .. }))
            .count()
    }
}

/// One scripted happening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScriptStep {
    /// New scan results become available.
    Scan {
        #[serde(default)]
        networks: Vec<String>,
    },
    /// A scan finished but the results cannot be read.
    ScanUnavailable,
    /// The radio changes power state.
    Radio { state: RadioState },
    /// The device associates with a network (`ssid` absent: name unknown).
    Connect { ssid: Option<String> },
    /// The device drops its association.
    Disconnect,
    /// A raw network-state-changed event; `state` absent means no payload.
    NetworkState { state: Option<NetworkState> },
    /// An event kind nobody registered for.
    Unrecognized { action: String },
    /// The controller asks for a verdict.
    Query { ssid: Option<String> },
    /// Pause before the next step.
    Wait { ms: u64 },
}

impl fmt::Display for ScriptStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scan { networks } => write!(f, "scan [{}]", networks.join(", ")),
            Self::ScanUnavailable => f.write_str("scan (unavailable)"),
            Self::Radio { state } => write!(f, "radio {state}"),
            Self::Connect { ssid: Some(ssid) } => write!(f, "connect {ssid}"),
            Self::Connect { ssid: None } => f.write_str("connect (no name)"),
            Self::Disconnect => f.write_str("disconnect"),
            Self::NetworkState { state: Some(state) } => write!(f, "network-state {state}"),
            Self::NetworkState { state: None } => f.write_str("network-state (no payload)"),
            Self::Unrecognized { action } => write!(f, "unrecognized {action}"),
            Self::Query { ssid } => write!(f, "query {}", ssid.as_deref().unwrap_or("<none>")),
            Self::Wait { ms } => write!(f, "wait {ms}ms"),
        }
    }
}
