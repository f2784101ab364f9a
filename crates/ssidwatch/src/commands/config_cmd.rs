//! Config subcommand handlers.
//!
//! Runs before the config is required, so `init --force` can replace a file
//! that no longer loads.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config};
use crate::error::{CliError, exit_code};
use crate::output;

pub fn handle(
    args: &ConfigArgs,
    global: &GlobalOpts,
    loaded: Result<Config, CliError>,
) -> Result<i32, CliError> {
    match &args.command {
        ConfigCommand::Path => {
            output::print_output(&config::active_path(global).display().to_string(), global.quiet);
        }

        ConfigCommand::Show => {
            let cfg = loaded?;
            let rendered = match config::output_format(global, &cfg) {
                OutputFormat::Json => output::render_json(&cfg)?,
                _ => toml::to_string_pretty(&cfg)?,
            };
            output::print_output(rendered.trim_end(), global.quiet);
        }

        ConfigCommand::Init { ssid, force } => {
            let path = config::active_path(global);
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let mut cfg = Config::default();
            cfg.condition.ssid.clone_from(ssid);
            config::save(global, &cfg)?;
            eprintln!("wrote {}", path.display());
        }
    }
    Ok(exit_code::SUCCESS)
}
