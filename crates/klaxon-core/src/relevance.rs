//! Workflow relevance matching.
//!
//! Decides which workflows would be triggered by a given alert: a workflow is
//! relevant iff it has an `alert` trigger and every filter on that trigger
//! matches the alert. Pure functions over immutable inputs -- no side
//! effects, no error conditions (a missing alert field is a non-match).

use serde_json::Value;

use klaxon_types::alert::Alert;
use klaxon_types::workflow::{TriggerFilter, Workflow};

/// Filter key with dedicated containment semantics against `Alert::source`.
const SOURCE_KEY: &str = "source";

/// Select the workflows relevant to `alert`, preserving input order.
///
/// A workflow with no `alert` trigger is never relevant; one whose alert
/// trigger has no filters is always relevant. Deterministic: identical
/// inputs yield identical output.
pub fn relevant_workflows<'a>(alert: &Alert, workflows: &'a [Workflow]) -> Vec<&'a Workflow> {
    workflows
        .iter()
        .filter(|workflow| is_relevant(alert, workflow))
        .collect()
}

/// Whether a single workflow would be triggered by `alert`.
pub fn is_relevant(alert: &Alert, workflow: &Workflow) -> bool {
    match workflow.alert_filters() {
        Some(filters) => filters.iter().all(|filter| filter_matches(alert, filter)),
        None => false,
    }
}

/// Evaluate one trigger filter against an alert.
///
/// Key `"source"` matches when the alert's source set contains the value;
/// any other key matches when the alert's known-field or extra-field value
/// equals the filter value.
pub fn filter_matches(alert: &Alert, filter: &TriggerFilter) -> bool {
    if filter.key == SOURCE_KEY {
        return alert.source.iter().any(|source| source == &filter.value);
    }
    alert
        .field(&filter.key)
        .is_some_and(|value| value_matches(&value, &filter.value))
}

/// Compare an alert field value against a filter's string value.
///
/// Strings compare by equality; numbers and bools against their canonical
/// display form. Arrays, objects, and null never match.
fn value_matches(value: &Value, expected: &str) -> bool {
    match value {
        Value::String(s) => s == expected,
        Value::Number(n) => n.to_string() == expected,
        Value::Bool(b) => b.to_string() == expected,
        _ => false,
    }
}
