//! Configuration for the ssidwatch CLI.
//!
//! One TOML file holding the editor's saved target SSID, plugin wiring and
//! logging preferences, layered under `SSIDWATCH_`-prefixed environment
//! variables, and translated to `ssidwatch_core::PluginConfig`.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

use ssidwatch_core::PluginConfig;
use ssidwatch_core::config::{DEFAULT_REQUERY_CAPACITY, DEFAULT_REQUERY_SOURCE};

const ENV_PREFIX: &str = "SSIDWATCH_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub condition: ConditionSection,

    #[serde(default)]
    pub plugin: PluginSection,

    #[serde(default)]
    pub logging: LoggingSection,

    #[serde(default)]
    pub defaults: Defaults,
}

/// The condition the editor saved last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConditionSection {
    /// Target network name, matched exactly.
    pub ssid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PluginSection {
    /// Address re-query requests are published under.
    #[serde(default = "default_source")]
    pub source: String,

    #[serde(default = "default_requery_capacity")]
    pub requery_capacity: usize,
}

impl Default for PluginSection {
    fn default() -> Self {
        Self {
            source: default_source(),
            requery_capacity: default_requery_capacity(),
        }
    }
}

fn default_source() -> String {
    DEFAULT_REQUERY_SOURCE.into()
}
fn default_requery_capacity() -> usize {
    DEFAULT_REQUERY_CAPACITY
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingSection {
    /// Filter directive used when `RUST_LOG` is unset and no `-v` is given.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_level() -> String {
    "warn".into()
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// CLI output defaults, overridden by `--output` / `--color`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

impl Config {
    /// The saved target SSID, if one is set and not blank.
    pub fn target_ssid(&self) -> Option<&str> {
        self.condition
            .ssid
            .as_deref()
            .filter(|ssid| !ssid.trim().is_empty())
    }

    /// Runtime wiring for `ssidwatch_core::SsidPlugin`.
    pub fn plugin_config(&self) -> PluginConfig {
        PluginConfig {
            requery_source: self.plugin.source.clone(),
            requery_capacity: self.plugin.requery_capacity,
        }
    }

    /// Reject values the rest of the program cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self
            .condition
            .ssid
            .as_deref()
            .is_some_and(|ssid| ssid.trim().is_empty())
        {
            return Err(ConfigError::Validation {
                field: "condition.ssid".into(),
                reason: "must not be blank".into(),
            });
        }
        if self.plugin.source.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "plugin.source".into(),
                reason: "must not be blank".into(),
            });
        }
        if self.plugin.requery_capacity == 0 {
            return Err(ConfigError::Validation {
                field: "plugin.requery_capacity".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "johanhil", "ssidwatch").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("ssidwatch");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file. A missing file contributes nothing.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()?;

    config.validate()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    cfg.validate()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|jail| {
            let config = load_config_from(&jail.directory().join("absent.toml"))
                .map_err(|e| e.to_string())?;
            assert_eq!(config, Config::default());
            assert_eq!(config.target_ssid(), None);
            assert_eq!(config.plugin_config(), PluginConfig::default());
            Ok(())
        });
    }

    #[test]
    fn file_values_are_read() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [condition]
                ssid = "HomeNet"

                [plugin]
                requery_capacity = 8

                [logging]
                format = "json"
                "#,
            )?;
            let config = load_config_from(Path::new("config.toml")).map_err(|e| e.to_string())?;

            assert_eq!(config.target_ssid(), Some("HomeNet"));
            assert_eq!(config.plugin.requery_capacity, 8);
            assert_eq!(config.plugin.source, DEFAULT_REQUERY_SOURCE);
            assert_eq!(config.logging.format, LogFormat::Json);
            assert_eq!(config.logging.level, "warn");
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[condition]\nssid = \"HomeNet\"\n")?;
            jail.set_env("SSIDWATCH_CONDITION__SSID", "Office");
            jail.set_env("SSIDWATCH_PLUGIN__REQUERY_CAPACITY", "4");

            let config = load_config_from(Path::new("config.toml")).map_err(|e| e.to_string())?;
            assert_eq!(config.target_ssid(), Some("Office"));
            assert_eq!(config.plugin_config().requery_capacity, 4);
            Ok(())
        });
    }

    #[test]
    fn blank_ssid_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[condition]\nssid = \"  \"\n")?;
            let err = load_config_from(Path::new("config.toml")).unwrap_err();
            assert!(matches!(
                err,
                ConfigError::Validation { ref field, .. } if *field == "condition.ssid"
            ));
            Ok(())
        });
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let mut config = Config::default();
        config.plugin.requery_capacity = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn unknown_log_format_fails_to_load() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[logging]\nformat = \"xml\"\n")?;
            let err = load_config_from(Path::new("config.toml")).unwrap_err();
            assert!(matches!(err, ConfigError::Figment(_)));
            Ok(())
        });
    }

    #[test]
    fn saved_config_loads_back() {
        Jail::expect_with(|_jail| {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("nested").join("config.toml");

            let mut config = Config::default();
            config.condition.ssid = Some("Cafe Wifi".into());
            config.logging.level = "debug".into();
            save_config_to(&config, &path).unwrap();

            let loaded = load_config_from(&path).unwrap();
            assert_eq!(loaded, config);
            Ok(())
        });
    }

    #[test]
    fn invalid_config_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.condition.ssid = Some(String::new());
        assert!(save_config_to(&config, &path).is_err());
        assert!(!path.exists());
    }
}
