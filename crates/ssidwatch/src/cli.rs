//! Clap derive structures for the `ssidwatch` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ssidwatch -- drive the SSID visibility condition from the command line
#[derive(Debug, Parser)]
#[command(
    name = "ssidwatch",
    version,
    about = "Track visible Wi-Fi networks and answer SSID conditions",
    long_about = "Replays scripted wireless scenarios through the SSID condition plugin.\n\n\
        A condition is SATISFIED while its network name is in the latest scan\n\
        results or is the network the device connected to.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file to use instead of the platform default
    #[arg(long, env = "SSIDWATCH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "SSIDWATCH_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay a scenario, printing a verdict for every query
    #[command(alias = "r")]
    Replay(ReplayArgs),

    /// Replay a scenario silently and exit with the final verdict
    #[command(alias = "q")]
    Query(QueryArgs),

    /// Run the condition editor on some input text
    Edit(EditArgs),

    /// List autocomplete candidates for a scenario's wireless state
    Suggest(SuggestArgs),

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Command Arguments ────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Scenario file (TOML)
    pub scenario: PathBuf,

    /// Re-evaluate this SSID after every re-query request [default: condition.ssid]
    #[arg(long, short = 's')]
    pub ssid: Option<String>,

    /// Ignore `wait` steps
    #[arg(long)]
    pub no_wait: bool,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Scenario file (TOML)
    pub scenario: PathBuf,

    /// Target SSID [default: condition.ssid]
    #[arg(long, short = 's')]
    pub ssid: Option<String>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// The SSID as typed into the editor [default: the saved condition.ssid]
    pub text: Option<String>,

    /// Close with "don't save", discarding the input
    #[arg(long, conflicts_with = "save")]
    pub cancel: bool,

    /// Store the saved SSID as condition.ssid in the config file
    #[arg(long)]
    pub save: bool,
}

#[derive(Debug, Args)]
pub struct SuggestArgs {
    /// Scenario file (TOML)
    pub scenario: PathBuf,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Display the current resolved configuration
    Show,

    /// Write a default config file
    Init {
        /// Target SSID to store as condition.ssid
        #[arg(long, short = 's')]
        ssid: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
