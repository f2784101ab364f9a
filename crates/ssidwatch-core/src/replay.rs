// ── Scenario replay ──
//
// Drives a plugin over a `ScriptedWireless` one step at a time. After every
// step the pending re-query requests are drained; when a watch target is
// set, each drained batch is answered with a fresh verdict, the way a host
// re-queries its conditions.

use std::sync::Arc;

use serde::Serialize;
use strum::Display;
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::config::PluginConfig;
use crate::host::QueryIntent;
use crate::model::Verdict;
use crate::plugin::SsidPlugin;
use crate::requery::RequeryRequest;
use crate::wireless::{Scenario, ScriptStep, ScriptedWireless};

/// Why a row was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RowTrigger {
    /// A `query` step in the script.
    Query,
    /// A re-query request observed after a wireless event.
    Requery,
}

/// One answered query during a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayRow {
    /// 1-based position of the step that produced the row.
    pub step: usize,
    pub trigger: RowTrigger,
    pub ssid: Option<String>,
    /// `None` when the host would have received no answer.
    pub verdict: Option<Verdict>,
    /// Tracked names after the step, sorted.
    pub tracked: Vec<String>,
}

/// Stateful scenario driver.
pub struct Replay {
    plugin: SsidPlugin,
    wireless: Arc<ScriptedWireless>,
    requery_rx: broadcast::Receiver<RequeryRequest>,
    watch_ssid: Option<String>,
    steps_run: usize,
}

impl Replay {
    /// Build a fresh plugin over the scenario's wireless state. Nothing is
    /// started until the first query or [`start()`](Self::start).
    pub fn new(config: PluginConfig, scenario: &Scenario, watch_ssid: Option<String>) -> Self {
        let wireless = Arc::new(ScriptedWireless::from_scenario(scenario));
        let plugin = SsidPlugin::new(config, wireless.clone());
        let requery_rx = plugin.requery_requests();
        Self {
            plugin,
            wireless,
            requery_rx,
            watch_ssid: watch_ssid.filter(|ssid| !ssid.is_empty()),
            steps_run: 0,
        }
    }

    pub fn plugin(&self) -> &SsidPlugin {
        &self.plugin
    }

    pub fn wireless(&self) -> &Arc<ScriptedWireless> {
        &self.wireless
    }

    pub fn steps_run(&self) -> usize {
        self.steps_run
    }

    /// Start tracking as if a query had already arrived.
    pub fn start(&self) {
        self.plugin.start();
    }

    /// Run one step. `wait` steps are a no-op here; pacing is the caller's.
    pub fn step(&mut self, step: &ScriptStep) -> Vec<ReplayRow> {
        self.steps_run += 1;
        let index = self.steps_run;
        let mut rows = Vec::new();

        if let ScriptStep::Query { ssid } = step {
            let verdict = match ssid {
                Some(ssid) => self.plugin.respond(&QueryIntent::for_ssid(ssid)),
                None => Some(self.plugin.evaluate(None)),
            };
            rows.push(self.row(index, RowTrigger::Query, ssid.clone(), verdict));
        } else {
            self.wireless.apply(step);
        }

        let requested = self.drain_requests() > 0;
        if let Some(target) = self.watch_ssid.clone().filter(|_| requested) {
            let verdict = self.plugin.evaluate(Some(&target));
            rows.push(self.row(index, RowTrigger::Requery, Some(target), Some(verdict)));
        }

        rows
    }

    /// Run every step back to back, ignoring `wait`.
    pub fn run_all(&mut self, scenario: &Scenario) -> Vec<ReplayRow> {
        scenario.steps.iter().flat_map(|step| self.step(step)).collect()
    }

    fn drain_requests(&mut self) -> usize {
        let mut drained = 0;
        loop {
            match self.requery_rx.try_recv() {
                Ok(_) => drained += 1,
                Err(TryRecvError::Lagged(skipped)) => {
                    drained += usize::try_from(skipped).unwrap_or(usize::MAX);
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return drained,
            }
        }
    }

    fn row(
        &self,
        step: usize,
        trigger: RowTrigger,
        ssid: Option<String>,
        verdict: Option<Verdict>,
    ) -> ReplayRow {
        ReplayRow {
            step,
            trigger,
            ssid,
            verdict,
            tracked: self.plugin.tracker().snapshot(),
        }
    }
}
