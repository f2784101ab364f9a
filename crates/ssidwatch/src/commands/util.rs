//! Shared helpers for command handlers.

use std::path::Path;

use ssidwatch_core::Scenario;

use crate::cli::GlobalOpts;
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output::should_color;

/// Read and parse a scenario file.
pub fn read_scenario(path: &Path) -> Result<Scenario, CliError> {
    let source = std::fs::read_to_string(path).map_err(|source| CliError::ScenarioRead {
        path: path.display().to_string(),
        source,
    })?;
    Scenario::from_toml(&source).map_err(|source| CliError::Scenario {
        path: path.display().to_string(),
        source,
    })
}

/// `--ssid` if given, else the configured `condition.ssid`.
pub fn target_ssid(flag: Option<&str>, config: &Config) -> Option<String> {
    flag.filter(|ssid| !ssid.is_empty())
        .or_else(|| config.target_ssid())
        .map(str::to_owned)
}

pub fn color_enabled(global: &GlobalOpts, config: &Config) -> bool {
    should_color(config::color_mode(global, config))
}
