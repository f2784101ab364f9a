//! `query`: replay silently, then answer one query for the target.

use serde::Serialize;

use ssidwatch_core::{QueryIntent, Replay, Verdict};

use crate::cli::{GlobalOpts, QueryArgs};
use crate::commands::util;
use crate::config::{self, Config};
use crate::error::{CliError, exit_code};
use crate::output::{self, paint_verdict};

#[derive(Serialize)]
struct QueryResult {
    ssid: String,
    verdict: Verdict,
    result_code: i32,
    tracked: Vec<String>,
}

/// Tracking starts before the first step, so every scripted event is seen.
pub fn handle(args: &QueryArgs, config: &Config, global: &GlobalOpts) -> Result<i32, CliError> {
    let ssid = util::target_ssid(args.ssid.as_deref(), config).ok_or(CliError::NoTarget)?;
    let scenario = util::read_scenario(&args.scenario)?;

    let mut replay = Replay::new(config.plugin_config(), &scenario, None);
    replay.start();
    replay.run_all(&scenario);

    // A well-formed intent is never ignored.
    let verdict = replay
        .plugin()
        .respond(&QueryIntent::for_ssid(&ssid))
        .unwrap_or(Verdict::Unsatisfied);

    let result = QueryResult {
        ssid,
        verdict,
        result_code: verdict.result_code(),
        tracked: replay.plugin().tracker().snapshot(),
    };
    let color = util::color_enabled(global, config);
    let rendered = output::render_single(config::output_format(global, config), &result, |r| {
        paint_verdict(r.verdict, color)
    })?;
    output::print_output(&rendered, global.quiet);

    Ok(if verdict.is_satisfied() {
        exit_code::SUCCESS
    } else {
        exit_code::UNSATISFIED
    })
}
