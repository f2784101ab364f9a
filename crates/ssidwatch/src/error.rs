//! CLI error types with miette diagnostics.
//!
//! Maps core and config failures into user-facing errors with help text.

use miette::Diagnostic;
use thiserror::Error;

use ssidwatch_config::ConfigError;
use ssidwatch_core::CoreError;

/// Process exit codes. 0 and 1 double as the `query` verdict.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const UNSATISFIED: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const SCENARIO: i32 = 4;
    pub const IO: i32 = 5;
    pub const INTERRUPTED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Usage ────────────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ssidwatch::validation))]
    Validation { field: String, reason: String },

    #[error("No target SSID given")]
    #[diagnostic(
        code(ssidwatch::no_target),
        help(
            "Pass --ssid <name>, or store one with:\n\
             ssidwatch config init --ssid <name>"
        )
    )]
    NoTarget,

    // ── Configuration ────────────────────────────────────────────────

    #[error("Could not load configuration from {path}")]
    #[diagnostic(
        code(ssidwatch::config),
        help("Fix the file or recreate it with: ssidwatch config init --force")
    )]
    Config {
        path: String,
        #[source]
        source: ConfigError,
    },

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(ssidwatch::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    // ── Scenarios ────────────────────────────────────────────────────

    #[error("Could not read scenario {path}")]
    #[diagnostic(code(ssidwatch::scenario_read))]
    ScenarioRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scenario {path}")]
    #[diagnostic(
        code(ssidwatch::scenario),
        help(
            "A scenario needs at least one [[steps]] entry; step kinds are scan,\n\
             scan-unavailable, radio, connect, disconnect, network-state,\n\
             unrecognized, query, wait."
        )
    )]
    Scenario {
        path: String,
        #[source]
        source: CoreError,
    },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render JSON: {0}")]
    #[diagnostic(code(ssidwatch::json))]
    Json(#[from] serde_json::Error),

    #[error("Could not render TOML: {0}")]
    #[diagnostic(code(ssidwatch::toml))]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } | Self::NoTarget => exit_code::USAGE,
            Self::Config { .. } | Self::ConfigExists { .. } => exit_code::CONFIG,
            Self::ScenarioRead { .. } | Self::Scenario { .. } => exit_code::SCENARIO,
            Self::Io(_) | Self::Json(_) | Self::Toml(_) => exit_code::IO,
        }
    }
}
