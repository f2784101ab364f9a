//! `suggest`: autocomplete candidates for the editor.

use tabled::Tabled;

use ssidwatch_core::{ScriptStep, ScriptedWireless, suggest_network_names};

use crate::cli::{GlobalOpts, SuggestArgs};
use crate::commands::util;
use crate::config::{self, Config};
use crate::error::{CliError, exit_code};
use crate::output;

#[derive(Tabled)]
struct NameRow {
    #[tabled(rename = "Network")]
    name: String,
}

/// Applies every wireless step, so the candidates reflect the scenario's
/// final scan results plus its saved profiles.
pub fn handle(args: &SuggestArgs, config: &Config, global: &GlobalOpts) -> Result<i32, CliError> {
    let scenario = util::read_scenario(&args.scenario)?;
    let wireless = ScriptedWireless::from_scenario(&scenario);
    for step in &scenario.steps {
        if !matches!(step, ScriptStep::Query { .. } | ScriptStep::Wait { .. }) {
            wireless.apply(step);
        }
    }

    let names = suggest_network_names(&wireless);
    let rendered = output::render_list(
        config::output_format(global, config),
        &names,
        |name| NameRow { name: name.clone() },
        Clone::clone,
    )?;
    output::print_output(&rendered, global.quiet);
    Ok(exit_code::SUCCESS)
}
