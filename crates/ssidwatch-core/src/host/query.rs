// ── Query responder ──
//
// Third parties can send anything, so every query is checked before it
// reaches the evaluator. Malformed queries get no response at all.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, warn};

use super::{ACTION_QUERY_CONDITION, BUNDLE_EXTRA_SSID};
use crate::evaluator::ConditionEvaluator;
use crate::model::Verdict;

/// A condition query as delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryIntent {
    pub action: String,
    #[serde(default)]
    pub bundle: Option<Map<String, Value>>,
}

impl QueryIntent {
    /// A well-formed query for `ssid`.
    pub fn for_ssid(ssid: &str) -> Self {
        Self {
            action: ACTION_QUERY_CONDITION.to_owned(),
            bundle: Some(super::ConditionBundle::new(ssid).to_map()),
        }
    }
}

/// Validates queries and forwards the good ones to the evaluator.
#[derive(Clone)]
pub struct QueryResponder {
    evaluator: ConditionEvaluator,
}

impl QueryResponder {
    pub fn new(evaluator: ConditionEvaluator) -> Self {
        Self { evaluator }
    }

    /// Answer a query, or `None` when it must be ignored.
    ///
    /// A bundle whose SSID value is not a string is still answered: the
    /// target is treated as missing and never matches.
    pub fn respond(&self, intent: &QueryIntent) -> Option<Verdict> {
        if intent.action != ACTION_QUERY_CONDITION {
            warn!(action = %intent.action, "received unexpected query action");
            return None;
        }

        let Some(bundle) = intent.bundle.as_ref() else {
            error!("received query without a bundle");
            return None;
        };

        let Some(value) = bundle.get(BUNDLE_EXTRA_SSID) else {
            error!("query bundle is missing the SSID");
            return None;
        };

        Some(self.evaluator.evaluate(value.as_str()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::listener::EventListener;
    use crate::requery::RequeryBroadcaster;
    use crate::store::VisibilityTracker;
    use crate::wireless::ScriptedWireless;

    fn responder() -> (QueryResponder, Arc<ScriptedWireless>, EventListener) {
        let tracker = Arc::new(VisibilityTracker::new());
        let wireless = Arc::new(ScriptedWireless::new());
        let listener = EventListener::new(
            tracker.clone(),
            wireless.clone(),
            Arc::new(RequeryBroadcaster::new("test", 4)),
        );
        let evaluator = ConditionEvaluator::new(listener.clone(), tracker);
        (QueryResponder::new(evaluator), wireless, listener)
    }

    #[test]
    fn answers_well_formed_queries() {
        let (responder, wireless, _listener) = responder();
        responder.respond(&QueryIntent::for_ssid("HomeNet"));
        wireless.scan(["HomeNet"]);

        assert_eq!(
            responder.respond(&QueryIntent::for_ssid("HomeNet")),
            Some(Verdict::Satisfied)
        );
        assert_eq!(
            responder.respond(&QueryIntent::for_ssid("Elsewhere")),
            Some(Verdict::Unsatisfied)
        );
    }

    #[test]
    fn ignores_foreign_actions_without_starting_anything() {
        let (responder, _wireless, listener) = responder();
        let mut intent = QueryIntent::for_ssid("HomeNet");
        intent.action = "com.example.SOMETHING_ELSE".into();

        assert_eq!(responder.respond(&intent), None);
        assert!(!listener.is_started());
    }

    #[test]
    fn ignores_missing_bundle_or_key() {
        let (responder, _wireless, listener) = responder();
        let no_bundle = QueryIntent {
            action: ACTION_QUERY_CONDITION.into(),
            bundle: None,
        };
        let no_key = QueryIntent {
            action: ACTION_QUERY_CONDITION.into(),
            bundle: Some(Map::new()),
        };

        assert_eq!(responder.respond(&no_bundle), None);
        assert_eq!(responder.respond(&no_key), None);
        assert!(!listener.is_started());
    }

    #[test]
    fn non_string_ssid_is_answered_unsatisfied() {
        let (responder, _wireless, _listener) = responder();
        let mut bundle = Map::new();
        bundle.insert(BUNDLE_EXTRA_SSID.into(), Value::Null);
        let intent = QueryIntent {
            action: ACTION_QUERY_CONDITION.into(),
            bundle: Some(bundle),
        };

        assert_eq!(responder.respond(&intent), Some(Verdict::Unsatisfied));
    }

    #[test]
    fn parses_from_json() {
        let intent: QueryIntent = serde_json::from_str(
            r#"{
                "action": "com.twofortyfouram.locale.intent.action.QUERY_CONDITION",
                "bundle": { "org.johanhil.ssid.extra.SSID": "HomeNet" }
            }"#,
        )
        .unwrap();
        assert_eq!(intent, QueryIntent::for_ssid("HomeNet"));
    }
}
