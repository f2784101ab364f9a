// ── Runtime plugin configuration ──
//
// How a plugin instance is wired: the address it publishes re-query
// requests under and how many of them may queue up for a slow host.
// The CLI builds one from the config file; core never reads disk.

/// Default address re-query requests are published under.
pub const DEFAULT_REQUERY_SOURCE: &str = "org.johanhil.ssid.ui.EditActivity";

/// Default depth of the re-query broadcast queue.
pub const DEFAULT_REQUERY_CAPACITY: usize = 64;

/// Configuration for a single plugin instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginConfig {
    /// Identity of the editor component the host re-queries.
    pub requery_source: String,
    /// Re-query requests buffered per subscriber before it lags.
    pub requery_capacity: usize,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            requery_source: DEFAULT_REQUERY_SOURCE.to_owned(),
            requery_capacity: DEFAULT_REQUERY_CAPACITY,
        }
    }
}
