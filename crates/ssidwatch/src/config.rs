//! CLI configuration: thin wrapper around `ssidwatch_config`.
//!
//! Adds resolution that respects `GlobalOpts` (`--config`, `--output`,
//! `--color`) on top of the shared loader.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use ssidwatch_config::{Config, LogFormat, LoggingSection};

// ── CLI-specific helpers ────────────────────────────────────────────

/// The config file in effect: `--config` if given, else the platform path.
pub fn active_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(ssidwatch_config::config_path)
}

/// Load the config file in effect, with environment overrides.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let path = active_path(global);
    ssidwatch_config::load_config_from(&path).map_err(|source| CliError::Config {
        path: path.display().to_string(),
        source,
    })
}

/// Write `config` to the file in effect.
pub fn save(global: &GlobalOpts, config: &Config) -> Result<(), CliError> {
    let path = active_path(global);
    ssidwatch_config::save_config_to(config, &path).map_err(|source| CliError::Config {
        path: path.display().to_string(),
        source,
    })
}

/// Flag > config default > table.
pub fn output_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    global
        .output
        .or_else(|| OutputFormat::from_str(&config.defaults.output, true).ok())
        .unwrap_or(OutputFormat::Table)
}

/// Flag > config default > auto.
pub fn color_mode(global: &GlobalOpts, config: &Config) -> ColorMode {
    global
        .color
        .or_else(|| ColorMode::from_str(&config.defaults.color, true).ok())
        .unwrap_or(ColorMode::Auto)
}
