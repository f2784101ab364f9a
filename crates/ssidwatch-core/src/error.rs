// ── Core error types ──
//
// Errors the core can report to its *embedder* (CLI, tests, host glue).
// None of these ever reach the controller: the query path absorbs them
// and answers UNSATISFIED instead.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Wireless subsystem ───────────────────────────────────────────
    #[error("Wireless subsystem unavailable: {reason}")]
    WirelessUnavailable { reason: String },

    // ── Scripted scenarios ───────────────────────────────────────────
    #[error("Invalid scenario: {message}")]
    Scenario { message: String },

    #[error("Scenario parse error: {0}")]
    ScenarioParse(#[from] toml::de::Error),
}
