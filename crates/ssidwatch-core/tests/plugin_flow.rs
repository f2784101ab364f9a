#![allow(clippy::unwrap_used)]
// Integration tests for the plugin wired end to end over a scripted
// wireless subsystem.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use tokio::sync::broadcast::error::TryRecvError;

use ssidwatch_core::{
    ListenerState, NetworkState, PluginConfig, QueryIntent, RadioState, Scenario, ScriptStep,
    ScriptedWireless, SsidPlugin, Verdict, WirelessEvent,
};

fn plugin() -> (SsidPlugin, Arc<ScriptedWireless>) {
    let wireless = Arc::new(ScriptedWireless::new());
    let plugin = SsidPlugin::new(PluginConfig::default(), wireless.clone());
    (plugin, wireless)
}

fn names(plugin: &SsidPlugin) -> Vec<String> {
    plugin.tracker().snapshot()
}

// ── Scenarios ───────────────────────────────────────────────────────

#[test]
fn home_network_visible_then_radio_off() {
    let (plugin, wireless) = plugin();
    plugin.start();

    wireless.scan(["HomeNet", "CoffeeShop"]);
    assert_eq!(plugin.evaluate(Some("HomeNet")), Verdict::Satisfied);

    wireless.apply(&ScriptStep::Radio {
        state: RadioState::Disabling,
    });
    assert_eq!(plugin.evaluate(Some("HomeNet")), Verdict::Unsatisfied);
}

#[test]
fn cold_query_starts_listener_and_answers_unsatisfied() {
    let (plugin, wireless) = plugin();
    wireless.set_scan_results(Some(vec![ssidwatch_core::ScanResult::new("HomeNet")]));

    assert_eq!(plugin.state(), ListenerState::Stopped);
    assert_eq!(plugin.evaluate(Some("HomeNet")), Verdict::Unsatisfied);
    assert_eq!(plugin.state(), ListenerState::Started);
    assert_eq!(wireless.subscriber_count(), 1);
}

// ── Tracked-set properties ──────────────────────────────────────────

#[test]
fn scans_replace_rather_than_merge() {
    let (plugin, wireless) = plugin();
    plugin.start();

    wireless.scan(["A", "B"]);
    wireless.scan(["C"]);
    assert_eq!(names(&plugin), vec!["C".to_owned()]);
}

#[test]
fn connection_adds_and_disconnection_keeps() {
    let (plugin, wireless) = plugin();
    plugin.start();

    wireless.scan(["A"]);
    wireless.apply(&ScriptStep::Connect {
        ssid: Some("Hidden".into()),
    });
    assert_eq!(names(&plugin), vec!["A".to_owned(), "Hidden".to_owned()]);

    wireless.apply(&ScriptStep::Disconnect);
    assert_eq!(plugin.evaluate(Some("Hidden")), Verdict::Satisfied);

    wireless.scan(["A"]);
    assert_eq!(plugin.evaluate(Some("Hidden")), Verdict::Unsatisfied);
}

#[test]
fn radio_off_clears_and_radio_on_waits_for_a_scan() {
    let (plugin, wireless) = plugin();
    plugin.start();

    wireless.scan(["HomeNet"]);
    wireless.apply(&ScriptStep::Radio {
        state: RadioState::Disabled,
    });
    assert!(names(&plugin).is_empty());

    wireless.apply(&ScriptStep::Radio {
        state: RadioState::Enabled,
    });
    assert!(names(&plugin).is_empty());
    assert!(plugin.tracker().is_active());
}

#[test]
fn start_and_stop_are_idempotent() {
    let (plugin, wireless) = plugin();

    plugin.start();
    plugin.start();
    assert_eq!(wireless.subscriber_count(), 1);

    assert!(plugin.stop());
    assert!(!plugin.stop());
    assert_eq!(wireless.subscriber_count(), 0);
    assert!(!plugin.tracker().is_active());

    plugin.start();
    assert_eq!(wireless.subscriber_count(), 1);
    assert!(names(&plugin).is_empty());
}

#[test]
fn empty_targets_are_safe() {
    let (plugin, wireless) = plugin();
    plugin.start();
    wireless.scan(["HomeNet"]);

    assert_eq!(plugin.evaluate(None), Verdict::Unsatisfied);
    assert_eq!(plugin.evaluate(Some("")), Verdict::Unsatisfied);
}

#[test]
fn stopped_plugin_ignores_events() {
    let (plugin, wireless) = plugin();
    plugin.start();
    wireless.scan(["HomeNet"]);
    plugin.stop();

    assert_eq!(wireless.scan(["Elsewhere"]), 0);
    assert!(names(&plugin).is_empty());
    assert_eq!(plugin.requery_count(), 1);
}

#[test]
fn public_handles_keep_tracker_and_listener_in_step() {
    let (plugin, wireless) = plugin();
    plugin.start();

    // Everything reachable from outside the crate, used between events.
    let tracker = plugin.tracker().clone();
    let _rx = tracker.subscribe();
    let _ = (tracker.contains("HomeNet"), tracker.snapshot(), tracker.len());
    let unrecognized = WirelessEvent::Unrecognized {
        action: "screen-on".into(),
    };
    assert_eq!(plugin.listener().handle_event(unrecognized), None);
    plugin.listener().start().unwrap();

    assert_eq!(plugin.state(), ListenerState::Started);
    assert!(tracker.is_active());

    let before = plugin.requery_count();
    wireless.scan(["HomeNet"]);
    assert_eq!(plugin.requery_count(), before + 1);
    assert_eq!(plugin.evaluate(Some("HomeNet")), Verdict::Satisfied);

    plugin.listener().stop();
    assert!(!tracker.is_active());
    assert_eq!(plugin.evaluate(Some("HomeNet")), Verdict::Unsatisfied);
    assert_eq!(plugin.state(), ListenerState::Started);
    assert!(tracker.is_active());
}

// ── Re-query notifications ──────────────────────────────────────────

#[test]
fn one_request_per_handled_event() {
    let (plugin, wireless) = plugin();
    let mut rx = plugin.requery_requests();
    plugin.start();

    wireless.scan(["HomeNet"]);
    wireless.apply(&ScriptStep::Radio {
        state: RadioState::Enabling,
    });
    wireless.apply(&ScriptStep::NetworkState { state: None });
    wireless.apply(&ScriptStep::NetworkState {
        state: Some(NetworkState::Connecting),
    });
    wireless.apply(&ScriptStep::Unrecognized {
        action: "screen-on".into(),
    });

    let mut received = 0;
    while let Ok(request) = rx.try_recv() {
        assert_eq!(&*request.source, PluginConfig::default().requery_source);
        received += 1;
    }
    assert_eq!(received, 4);
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn requests_reach_an_async_receiver() {
    let (plugin, wireless) = plugin();
    let mut rx = plugin.requery_requests();
    plugin.start();

    let task = tokio::spawn(async move { rx.recv().await.map(|r| r.source.to_string()) });
    wireless.scan(["HomeNet"]);

    let source = task.await.unwrap().unwrap();
    assert_eq!(source, PluginConfig::default().requery_source);
}

#[tokio::test]
async fn tracked_set_changes_are_observable() {
    let (plugin, wireless) = plugin();
    let mut changes = plugin.tracked_networks();
    plugin.start();
    changes.borrow_and_update();

    wireless.scan(["HomeNet", "CoffeeShop"]);
    changes.changed().await.unwrap();
    assert_eq!(
        changes.borrow_and_update().sorted_names(),
        vec!["CoffeeShop".to_owned(), "HomeNet".to_owned()]
    );
}

// ── Host queries ────────────────────────────────────────────────────

#[test]
fn host_queries_are_validated_before_evaluation() {
    let (plugin, wireless) = plugin();

    let mut foreign = QueryIntent::for_ssid("HomeNet");
    foreign.action = "com.example.OTHER".into();
    assert_eq!(plugin.respond(&foreign), None);
    assert_eq!(plugin.state(), ListenerState::Stopped);

    assert_eq!(
        plugin.respond(&QueryIntent::for_ssid("HomeNet")),
        Some(Verdict::Unsatisfied)
    );
    wireless.scan(["HomeNet"]);
    let verdict = plugin.respond(&QueryIntent::for_ssid("HomeNet")).unwrap();
    assert_eq!(verdict.result_code(), 16);
}

#[test]
fn scenario_file_drives_the_plugin() {
    let scenario = Scenario::from_toml(
        r#"
        configured = ["\"Office\""]

        [[steps]]
        kind = "query"
        ssid = "Office"

        [[steps]]
        kind = "connect"
        ssid = "Office"

        [[steps]]
        kind = "query"
        ssid = "Office"
        "#,
    )
    .unwrap();
    let mut replay = ssidwatch_core::Replay::new(PluginConfig::default(), &scenario, None);
    let verdicts: Vec<_> = replay
        .run_all(&scenario)
        .into_iter()
        .map(|row| row.verdict)
        .collect();

    assert_eq!(verdicts, vec![Some(Verdict::Unsatisfied), Some(Verdict::Satisfied)]);
    assert_eq!(
        ssidwatch_core::suggest_network_names(replay.wireless().as_ref()),
        vec!["Office".to_owned()]
    );
}
