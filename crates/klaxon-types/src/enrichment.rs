//! Alert enrichment: operator-supplied fields overlaid onto an alert.
//!
//! Enrichments are keyed by alert fingerprint and stored separately from the
//! alert itself; they survive re-ingestion of the same alert. The free-text
//! note feature is an enrichment with key `"note"`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::alert::Alert;

/// The enrichment key used for free-text notes.
pub const NOTE_KEY: &str = "note";

/// Operator-supplied fields attached to an alert fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertEnrichment {
    /// Fingerprint of the alert these enrichments apply to.
    pub fingerprint: String,
    /// Field overrides: known alert fields by name, everything else lands in
    /// the alert's extra bag when applied.
    pub enrichments: HashMap<String, Value>,
}

impl AlertEnrichment {
    pub fn new(fingerprint: impl Into<String>, enrichments: HashMap<String, Value>) -> Self {
        Self {
            fingerprint: fingerprint.into(),
            enrichments,
        }
    }

    /// Build a note enrichment for the given fingerprint.
    pub fn note(fingerprint: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            fingerprint: fingerprint.into(),
            enrichments: HashMap::from([(NOTE_KEY.to_string(), Value::String(text.into()))]),
        }
    }

    /// Merge `other`'s fields into this enrichment, overwriting on conflict.
    pub fn merge(&mut self, other: &AlertEnrichment) {
        for (key, value) in &other.enrichments {
            self.enrichments.insert(key.clone(), value.clone());
        }
    }

    /// Overlay these enrichments onto an alert.
    ///
    /// String-typed known fields are overwritten when the enrichment value is
    /// a string; any other key goes into the alert's extra bag. Enrichment
    /// values that do not fit the target field's type are ignored rather than
    /// corrupting the record.
    pub fn apply(&self, alert: &mut Alert) {
        for (key, value) in &self.enrichments {
            match key.as_str() {
                "note" => assign_string(&mut alert.note, value),
                "ticket_url" => assign_string(&mut alert.ticket_url, value),
                "ticket_status" => assign_string(&mut alert.ticket_status, value),
                "playbook_url" => assign_string(&mut alert.playbook_url, value),
                "url" => assign_string(&mut alert.url, value),
                "description" => assign_string(&mut alert.description, value),
                "name" => {
                    if let Value::String(s) = value {
                        alert.name = s.clone();
                    }
                }
                "environment" => {
                    if let Value::String(s) = value {
                        alert.environment = s.clone();
                    }
                }
                _ => {
                    alert.extra.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

fn assign_string(slot: &mut Option<String>, value: &Value) {
    if let Value::String(s) = value {
        *slot = Some(s.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::{AlertSeverity, AlertStatus};
    use chrono::Utc;
    use serde_json::json;

    fn bare_alert() -> Alert {
        Alert {
            id: "a1".to_string(),
            name: "CPU high".to_string(),
            description: None,
            status: AlertStatus::Firing,
            severity: AlertSeverity::Warning,
            source: vec!["prometheus".to_string()],
            url: None,
            generator_url: None,
            environment: "unknown".to_string(),
            last_received: Utc::now(),
            fingerprint: "fp-1".to_string(),
            deleted: false,
            note: None,
            ticket_url: None,
            ticket_status: None,
            playbook_url: None,
            labels: HashMap::new(),
            annotations: HashMap::new(),
            extra: HashMap::new(),
        }
    }

    #[test]
    fn test_note_constructor() {
        let enrichment = AlertEnrichment::note("fp-1", "checked, restarting the pod");
        assert_eq!(enrichment.fingerprint, "fp-1");
        assert_eq!(
            enrichment.enrichments.get(NOTE_KEY),
            Some(&json!("checked, restarting the pod"))
        );
    }

    #[test]
    fn test_apply_sets_known_string_fields() {
        let mut alert = bare_alert();
        let enrichment = AlertEnrichment::new(
            "fp-1",
            HashMap::from([
                ("note".to_string(), json!("looking into it")),
                ("ticket_url".to_string(), json!("https://jira/KLX-7")),
            ]),
        );
        enrichment.apply(&mut alert);
        assert_eq!(alert.note.as_deref(), Some("looking into it"));
        assert_eq!(alert.ticket_url.as_deref(), Some("https://jira/KLX-7"));
    }

    #[test]
    fn test_apply_unknown_keys_go_to_extra() {
        let mut alert = bare_alert();
        let enrichment = AlertEnrichment::new(
            "fp-1",
            HashMap::from([("runbook_step".to_string(), json!(4))]),
        );
        enrichment.apply(&mut alert);
        assert_eq!(alert.extra.get("runbook_step"), Some(&json!(4)));
    }

    #[test]
    fn test_apply_ignores_mistyped_values() {
        let mut alert = bare_alert();
        let enrichment = AlertEnrichment::new(
            "fp-1",
            HashMap::from([("note".to_string(), json!({"nested": true}))]),
        );
        enrichment.apply(&mut alert);
        assert!(alert.note.is_none());
    }

    #[test]
    fn test_merge_overwrites_on_conflict() {
        let mut first = AlertEnrichment::note("fp-1", "first note");
        let second = AlertEnrichment::note("fp-1", "second note");
        first.merge(&second);
        assert_eq!(first.enrichments.get(NOTE_KEY), Some(&json!("second note")));
    }

    #[test]
    fn test_json_roundtrip() {
        let enrichment = AlertEnrichment::note("fp-1", "hello");
        let json_str = serde_json::to_string(&enrichment).unwrap();
        let parsed: AlertEnrichment = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed, enrichment);
    }
}
