// ── Wireless event domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The three notification kinds the listener registers for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum EventKind {
    ScanResultsUpdated,
    RadioStateChanged,
    NetworkStateChanged,
}

/// Radio power state carried by a radio-state-changed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RadioState {
    Disabling,
    Disabled,
    Enabling,
    Enabled,
    #[default]
    Unknown,
}

impl RadioState {
    /// Decode the platform's integer radio state. Anything outside the
    /// known range (including the `-1` "missing extra" default) is `Unknown`.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Disabling,
            1 => Self::Disabled,
            2 => Self::Enabling,
            3 => Self::Enabled,
            _ => Self::Unknown,
        }
    }

    /// Whether the radio is going down or already off.
    pub fn is_off(self) -> bool {
        matches!(self, Self::Disabling | Self::Disabled)
    }
}

/// Coarse connectivity state of a network-state-changed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum NetworkState {
    Connecting,
    Connected,
    Suspended,
    Disconnecting,
    Disconnected,
    #[default]
    Unknown,
}

/// Network-info payload attached to a network-state-changed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub state: NetworkState,
}

impl NetworkInfo {
    pub fn new(state: NetworkState) -> Self {
        Self { state }
    }
}

/// A notification delivered by the wireless subsystem.
///
/// `Unrecognized` covers anything the subsystem forwards that is not one
/// of the three registered kinds; the listener ignores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WirelessEvent {
    ScanResultsAvailable,
    RadioStateChanged { state: RadioState },
    NetworkStateChanged { info: Option<NetworkInfo> },
    Unrecognized { action: String },
}

impl WirelessEvent {
    /// The registered kind this event belongs to, if any.
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            Self::ScanResultsAvailable => Some(EventKind::ScanResultsUpdated),
            Self::RadioStateChanged { .. } => Some(EventKind::RadioStateChanged),
            Self::NetworkStateChanged { .. } => Some(EventKind::NetworkStateChanged),
            Self::Unrecognized { .. } => None,
        }
    }

    /// Action name used in logs.
    pub fn action(&self) -> &str {
        match self {
            Self::Unrecognized { action } => action,
            other => other.kind().map_or("unknown", Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn radio_codes_decode() {
        assert_eq!(RadioState::from_code(0), RadioState::Disabling);
        assert_eq!(RadioState::from_code(1), RadioState::Disabled);
        assert_eq!(RadioState::from_code(3), RadioState::Enabled);
        assert_eq!(RadioState::from_code(-1), RadioState::Unknown);
        assert_eq!(RadioState::from_code(42), RadioState::Unknown);
    }

    #[test]
    fn only_disabling_and_disabled_are_off() {
        assert!(RadioState::Disabling.is_off());
        assert!(RadioState::Disabled.is_off());
        assert!(!RadioState::Enabling.is_off());
        assert!(!RadioState::Enabled.is_off());
        assert!(!RadioState::Unknown.is_off());
    }

    #[test]
    fn event_kind_names_are_kebab_case() {
        assert_eq!(EventKind::ScanResultsUpdated.to_string(), "scan-results-updated");
        assert_eq!(
            EventKind::from_str("network-state-changed").ok(),
            Some(EventKind::NetworkStateChanged)
        );
    }

    #[test]
    fn unrecognized_events_have_no_kind() {
        let event = WirelessEvent::Unrecognized {
            action: "screen-on".into(),
        };
        assert_eq!(event.kind(), None);
        assert_eq!(event.action(), "screen-on");
        assert_eq!(
            WirelessEvent::ScanResultsAvailable.action(),
            "scan-results-updated"
        );
    }
}
