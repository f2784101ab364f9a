//! `replay`: step through a scenario, one row per answered query.

use std::time::Duration;

use serde::Serialize;
use tabled::Tabled;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use ssidwatch_core::{Replay, ReplayRow, ScriptStep};

use crate::cli::{GlobalOpts, OutputFormat, ReplayArgs};
use crate::commands::util;
use crate::config::{self, Config};
use crate::error::{CliError, exit_code};
use crate::output::{self, paint_verdict};

#[derive(Tabled)]
struct RowView {
    #[tabled(rename = "Step")]
    step: usize,
    #[tabled(rename = "Trigger")]
    trigger: String,
    #[tabled(rename = "SSID")]
    ssid: String,
    #[tabled(rename = "Verdict")]
    verdict: String,
    #[tabled(rename = "Tracked")]
    tracked: String,
}

/// Everything a replay printed, for `--output json`.
#[derive(Serialize)]
struct ReplayReport<'a> {
    steps_run: usize,
    interrupted: bool,
    rows: &'a [ReplayRow],
}

fn verdict_text(row: &ReplayRow, color: bool) -> String {
    row.verdict
        .map_or_else(|| "(ignored)".to_owned(), |v| paint_verdict(v, color))
}

pub async fn handle(args: &ReplayArgs, config: &Config, global: &GlobalOpts) -> Result<i32, CliError> {
    let scenario = util::read_scenario(&args.scenario)?;
    let watch = util::target_ssid(args.ssid.as_deref(), config);
    let mut replay = Replay::new(config.plugin_config(), &scenario, watch.clone());
    info!(
        scenario = %args.scenario.display(),
        steps = scenario.steps.len(),
        watch = watch.as_deref().unwrap_or("-"),
        "replaying scenario"
    );

    let cancel = CancellationToken::new();
    let ctrl_c = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let mut rows = Vec::new();
    for step in &scenario.steps {
        let pause = match step {
            ScriptStep::Wait { ms } if !args.no_wait => Some(Duration::from_millis(*ms)),
            _ => None,
        };
        if let Some(pause) = pause {
            tokio::select! {
                () = cancel.cancelled() => {}
                () = tokio::time::sleep(pause) => {}
            }
        }
        if cancel.is_cancelled() {
            break;
        }

        debug!(%step, "applying step");
        rows.extend(replay.step(step));
    }
    ctrl_c.abort();

    let interrupted = cancel.is_cancelled();
    let format = config::output_format(global, config);
    let color = util::color_enabled(global, config);
    let rendered = match format {
        OutputFormat::Json => output::render_json(&ReplayReport {
            steps_run: replay.steps_run(),
            interrupted,
            rows: &rows,
        })?,
        _ => output::render_list(
            format,
            &rows,
            |row| RowView {
                step: row.step,
                trigger: row.trigger.to_string(),
                ssid: row.ssid.clone().unwrap_or_else(|| "-".into()),
                verdict: verdict_text(row, false),
                tracked: row.tracked.join(", "),
            },
            |row| {
                format!(
                    "{}\t{}\t{}\t{}",
                    row.step,
                    row.trigger,
                    row.ssid.as_deref().unwrap_or("-"),
                    verdict_text(row, color)
                )
            },
        )?,
    };
    output::print_output(&rendered, global.quiet);

    if interrupted {
        eprintln!(
            "interrupted after {} of {} steps",
            replay.steps_run(),
            scenario.steps.len()
        );
        return Ok(exit_code::INTERRUPTED);
    }
    Ok(exit_code::SUCCESS)
}
