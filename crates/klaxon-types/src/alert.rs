//! Alert domain types for Klaxon.
//!
//! [`Alert`] is the canonical record for an event received from a monitoring
//! provider. It carries a fixed set of known fields plus an open-ended
//! `extra` bag: any payload field the provider sends that is not in the known
//! set deserializes into `extra` via `#[serde(flatten)]` and is only consulted
//! at trigger-filter match time.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Severity / status enums
// ---------------------------------------------------------------------------

/// Severity of an alert, ordered from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Critical,
    High,
    Warning,
    Info,
    Low,
}

/// Lifecycle status of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    /// The condition is active.
    Firing,
    /// The condition has cleared.
    Resolved,
    /// A human has acknowledged the alert.
    Acknowledged,
    /// Muted by a suppression rule.
    Suppressed,
    /// Received but not yet classified by the provider.
    Pending,
}

impl AlertSeverity {
    /// Wire name of the severity (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Critical => "critical",
            AlertSeverity::High => "high",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Info => "info",
            AlertSeverity::Low => "low",
        }
    }
}

impl AlertStatus {
    /// Wire name of the status (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Firing => "firing",
            AlertStatus::Resolved => "resolved",
            AlertStatus::Acknowledged => "acknowledged",
            AlertStatus::Suppressed => "suppressed",
            AlertStatus::Pending => "pending",
        }
    }
}

// ---------------------------------------------------------------------------
// Alert
// ---------------------------------------------------------------------------

/// An event record from a monitoring source.
///
/// Identified by `fingerprint` (opaque, unique per underlying condition).
/// `source` is the set of provider names that have reported this alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Provider-assigned alert id (often the alert rule name).
    pub id: String,
    /// Human-readable alert name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: AlertStatus,
    pub severity: AlertSeverity,
    /// Provider names that reported this alert (e.g. `["prometheus"]`).
    #[serde(default)]
    pub source: Vec<String>,
    /// Link to the alert in the originating system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Link to the rule/expression that generated the alert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator_url: Option<String>,
    /// Deployment environment the alert originated from.
    #[serde(default = "default_environment")]
    pub environment: String,
    /// When the alert was last received from the provider.
    pub last_received: DateTime<Utc>,
    /// Opaque unique identifier for the underlying condition.
    pub fingerprint: String,
    #[serde(default)]
    pub deleted: bool,
    /// Free-text note attached via enrichment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playbook_url: Option<String>,
    /// Provider labels, keys lowercased at ingestion.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
    /// Provider annotations, keys lowercased at ingestion.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub annotations: HashMap<String, String>,
    /// Every payload field outside the known set.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

fn default_environment() -> String {
    "unknown".to_string()
}

/// Field names of the fixed (known) part of [`Alert`].
///
/// `source` is absent on purpose: it has dedicated containment semantics in
/// trigger-filter matching and is never looked up as a plain field.
pub const KNOWN_FIELDS: &[&str] = &[
    "id",
    "name",
    "description",
    "status",
    "severity",
    "url",
    "generator_url",
    "environment",
    "last_received",
    "fingerprint",
    "deleted",
    "note",
    "ticket_url",
    "ticket_status",
    "playbook_url",
];

impl Alert {
    /// Look up a field by name: known fields first, then the `extra` bag.
    ///
    /// Returns `None` for absent fields and for `source` (which is matched
    /// with containment semantics, not field lookup). Known fields are
    /// rendered as their JSON representation so callers can compare them
    /// uniformly with extra-bag values.
    pub fn field(&self, key: &str) -> Option<Value> {
        let known = match key {
            "id" => Some(Value::String(self.id.clone())),
            "name" => Some(Value::String(self.name.clone())),
            "description" => self.description.clone().map(Value::String),
            "status" => Some(Value::String(self.status.as_str().to_string())),
            "severity" => Some(Value::String(self.severity.as_str().to_string())),
            "url" => self.url.clone().map(Value::String),
            "generator_url" => self.generator_url.clone().map(Value::String),
            "environment" => Some(Value::String(self.environment.clone())),
            "last_received" => Some(Value::String(self.last_received.to_rfc3339())),
            "fingerprint" => Some(Value::String(self.fingerprint.clone())),
            "deleted" => Some(Value::Bool(self.deleted)),
            "note" => self.note.clone().map(Value::String),
            "ticket_url" => self.ticket_url.clone().map(Value::String),
            "ticket_status" => self.ticket_status.clone().map(Value::String),
            "playbook_url" => self.playbook_url.clone().map(Value::String),
            _ => None,
        };
        known.or_else(|| self.extra.get(key).cloned())
    }

    /// Whether `name` is one of the fixed alert fields.
    pub fn is_known_field(name: &str) -> bool {
        name == "source" || KNOWN_FIELDS.contains(&name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_alert() -> Alert {
        Alert {
            id: "HighRequestLatency".to_string(),
            name: "HighRequestLatency".to_string(),
            description: Some("p99 latency above 2s".to_string()),
            status: AlertStatus::Firing,
            severity: AlertSeverity::Critical,
            source: vec!["prometheus".to_string()],
            url: None,
            generator_url: Some("http://prom:9090/graph".to_string()),
            environment: "production".to_string(),
            last_received: Utc::now(),
            fingerprint: "fp-123".to_string(),
            deleted: false,
            note: None,
            ticket_url: None,
            ticket_status: None,
            playbook_url: None,
            labels: HashMap::from([("team".to_string(), "payments".to_string())]),
            annotations: HashMap::new(),
            extra: HashMap::from([
                ("service".to_string(), json!("checkout")),
                ("replicas".to_string(), json!(3)),
            ]),
        }
    }

    #[test]
    fn test_field_known_lookup() {
        let alert = sample_alert();
        assert_eq!(alert.field("severity"), Some(json!("critical")));
        assert_eq!(alert.field("status"), Some(json!("firing")));
        assert_eq!(alert.field("environment"), Some(json!("production")));
        assert_eq!(alert.field("deleted"), Some(json!(false)));
    }

    #[test]
    fn test_field_extra_lookup() {
        let alert = sample_alert();
        assert_eq!(alert.field("service"), Some(json!("checkout")));
        assert_eq!(alert.field("replicas"), Some(json!(3)));
    }

    #[test]
    fn test_field_absent_returns_none() {
        let alert = sample_alert();
        assert_eq!(alert.field("nonexistent"), None);
        // `note` is a known field but unset
        assert_eq!(alert.field("note"), None);
        // `source` is never a plain field
        assert_eq!(alert.field("source"), None);
    }

    #[test]
    fn test_unknown_payload_fields_flatten_into_extra() {
        let json_str = r#"{
            "id": "DiskFull",
            "name": "DiskFull",
            "status": "firing",
            "severity": "warning",
            "source": ["prometheus"],
            "last_received": "2026-08-01T09:00:00Z",
            "fingerprint": "fp-9",
            "cluster": "eu-west-1",
            "mount": "/var"
        }"#;
        let alert: Alert = serde_json::from_str(json_str).unwrap();
        assert_eq!(alert.extra.get("cluster"), Some(&json!("eu-west-1")));
        assert_eq!(alert.extra.get("mount"), Some(&json!("/var")));
        assert_eq!(alert.environment, "unknown");
    }

    #[test]
    fn test_alert_json_roundtrip_preserves_extra() {
        let alert = sample_alert();
        let json_str = serde_json::to_string(&alert).unwrap();
        let parsed: Alert = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.fingerprint, "fp-123");
        assert_eq!(parsed.extra.get("service"), Some(&json!("checkout")));
        assert_eq!(parsed.severity, AlertSeverity::Critical);
    }

    #[test]
    fn test_is_known_field() {
        assert!(Alert::is_known_field("severity"));
        assert!(Alert::is_known_field("source"));
        assert!(!Alert::is_known_field("cluster"));
    }

    #[test]
    fn test_severity_wire_names_match_serde() {
        for severity in [
            AlertSeverity::Critical,
            AlertSeverity::High,
            AlertSeverity::Warning,
            AlertSeverity::Info,
            AlertSeverity::Low,
        ] {
            let json = serde_json::to_string(&severity).unwrap();
            assert_eq!(json, format!("\"{}\"", severity.as_str()));
        }
    }

    #[test]
    fn test_status_wire_names_match_serde() {
        for status in [
            AlertStatus::Firing,
            AlertStatus::Resolved,
            AlertStatus::Acknowledged,
            AlertStatus::Suppressed,
            AlertStatus::Pending,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }
}
