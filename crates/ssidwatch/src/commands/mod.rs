//! Command dispatch: bridges CLI args -> core plugin -> output formatting.
//!
//! Every handler returns the process exit code on success; `query` reports
//! its verdict through it.

pub mod config_cmd;
pub mod edit;
pub mod query;
pub mod replay;
pub mod suggest;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;

/// Dispatch a command that needs the loaded configuration.
pub async fn dispatch(cmd: Command, config: &Config, global: &GlobalOpts) -> Result<i32, CliError> {
    match cmd {
        Command::Replay(args) => replay::handle(&args, config, global).await,
        Command::Query(args) => query::handle(&args, config, global),
        Command::Edit(args) => edit::handle(&args, config, global),
        Command::Suggest(args) => suggest::handle(&args, config, global),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
