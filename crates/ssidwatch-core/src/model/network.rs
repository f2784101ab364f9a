// ── Network records reported by the wireless subsystem ──

use serde::{Deserialize, Serialize};

/// One entry of a scan result list. Hidden networks report an empty name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub ssid: String,
}

impl ScanResult {
    pub fn new(ssid: impl Into<String>) -> Self {
        Self { ssid: ssid.into() }
    }
}

/// A saved network profile. The platform stores its name wrapped in
/// double quotes (`"HomeNet"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguredNetwork {
    pub ssid: String,
}

impl ConfiguredNetwork {
    pub fn new(ssid: impl Into<String>) -> Self {
        Self { ssid: ssid.into() }
    }

    /// The network name with one surrounding pair of quotes removed.
    ///
    /// Names that are not quoted are returned unchanged.
    pub fn unquoted_name(&self) -> &str {
        self.ssid
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(&self.ssid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_one_pair_of_quotes() {
        assert_eq!(ConfiguredNetwork::new("\"HomeNet\"").unquoted_name(), "HomeNet");
        assert_eq!(
            ConfiguredNetwork::new("\"\"Nested\"\"").unquoted_name(),
            "\"Nested\""
        );
    }

    #[test]
    fn unquoted_names_pass_through() {
        assert_eq!(ConfiguredNetwork::new("HomeNet").unquoted_name(), "HomeNet");
        assert_eq!(ConfiguredNetwork::new("\"Half").unquoted_name(), "\"Half");
        assert_eq!(ConfiguredNetwork::new("\"").unquoted_name(), "\"");
    }
}
