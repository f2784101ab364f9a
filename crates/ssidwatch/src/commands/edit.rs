//! `edit`: the condition editor without the widgets. With no text it opens
//! on the saved condition, as the host does when editing an existing one.

use tracing::info;

use ssidwatch_core::{ConditionBundle, EditOutcome, initial_input};

use crate::cli::{EditArgs, GlobalOpts};
use crate::config::{self, Config};
use crate::error::{CliError, exit_code};
use crate::output;

pub fn handle(args: &EditArgs, config: &Config, global: &GlobalOpts) -> Result<i32, CliError> {
    let forwarded = config.target_ssid().map(|ssid| ConditionBundle::new(ssid).to_map());
    let text = args
        .text
        .clone()
        .unwrap_or_else(|| initial_input(forwarded.as_ref()));
    let outcome = EditOutcome::finish(&text, args.cancel);

    if let Some(bundle) = outcome.bundle().filter(|_| args.save) {
        let mut updated = config.clone();
        updated.condition.ssid = Some(bundle.ssid.clone());
        config::save(global, &updated)?;
        info!(path = %config::active_path(global).display(), "saved condition.ssid");
    }

    let rendered = output::render_single(
        config::output_format(global, config),
        &outcome,
        |outcome| match outcome {
            EditOutcome::Saved { blurb, .. } => blurb.clone(),
            EditOutcome::Cancelled => "cancelled".to_owned(),
        },
    )?;
    output::print_output(&rendered, global.quiet);
    Ok(exit_code::SUCCESS)
}
