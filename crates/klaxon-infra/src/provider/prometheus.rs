//! PrometheusProvider -- concrete [`AlertProvider`] for Prometheus.
//!
//! Pulls active alerts from `/api/v1/alerts` (optionally with basic auth)
//! and maps raw Prometheus/Alertmanager events into canonical [`Alert`]
//! records. The basic-auth password is wrapped in [`secrecy::SecretString`]
//! and is never logged or included in `Debug` output.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};

use klaxon_core::provider::AlertProvider;
use klaxon_types::alert::{Alert, AlertSeverity, AlertStatus};
use klaxon_types::config::PrometheusConfig;
use klaxon_types::error::ProviderError;

/// Event payload keys consumed into fixed alert fields; everything else
/// lands in the alert's extra bag.
const CONSUMED_KEYS: &[&str] = &[
    "id",
    "labels",
    "annotations",
    "state",
    "status",
    "fingerprint",
    "generatorURL",
];

/// Read a JSON object of labels/annotations into a string map with
/// lowercased keys. Non-string scalar values are stringified; arrays and
/// objects are skipped.
fn lowercased_string_map(value: Option<&Value>) -> HashMap<String, String> {
    let Some(map) = value.and_then(Value::as_object) else {
        return HashMap::new();
    };
    map.iter()
        .filter_map(|(key, value)| {
            let rendered = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some((key.to_lowercase(), rendered))
        })
        .collect()
}

/// Prometheus alert provider.
pub struct PrometheusProvider {
    client: reqwest::Client,
    base_url: String,
    username: Option<String>,
    password: Option<SecretString>,
}

impl PrometheusProvider {
    pub fn new(config: &PrometheusConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone().map(SecretString::from),
        }
    }

    /// Map severity label values onto [`AlertSeverity`]; unknown -> Info.
    fn map_severity(value: Option<&str>) -> AlertSeverity {
        match value {
            Some("critical") => AlertSeverity::Critical,
            Some("warning") => AlertSeverity::Warning,
            Some("info") => AlertSeverity::Info,
            Some("low") => AlertSeverity::Low,
            _ => AlertSeverity::Info,
        }
    }

    /// Map Prometheus `state`/`status` values onto [`AlertStatus`];
    /// unknown -> Firing.
    fn map_status(value: Option<&str>) -> AlertStatus {
        match value {
            Some("resolved") | Some("inactive") => AlertStatus::Resolved,
            Some("pending") => AlertStatus::Pending,
            _ => AlertStatus::Firing,
        }
    }

    /// Map one raw Prometheus event object onto an [`Alert`].
    ///
    /// Returns `None` (and logs) when the event carries neither an `id` nor
    /// an `alertname` label -- there is nothing to identify it by.
    fn map_single(event: &Map<String, Value>) -> Option<Alert> {
        let mut labels = lowercased_string_map(event.get("labels"));
        let annotations = lowercased_string_map(event.get("annotations"));

        let id = event
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| labels.get("alertname").cloned());
        let Some(id) = id else {
            tracing::warn!("skipping prometheus event without id or alertname label");
            return None;
        };

        let description = annotations
            .get("description")
            .or_else(|| annotations.get("summary"))
            .cloned()
            .unwrap_or_else(|| id.clone());

        let status = Self::map_status(
            event
                .get("state")
                .or_else(|| event.get("status"))
                .and_then(Value::as_str),
        );
        let severity = Self::map_severity(labels.get("severity").map(String::as_str));
        let environment = labels.remove("environment").unwrap_or_else(|| "unknown".to_string());

        let fingerprint = event
            .get("fingerprint")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| id.clone());

        let generator_url = event
            .get("generatorURL")
            .and_then(Value::as_str)
            .map(str::to_string);

        // Unconsumed payload fields are preserved verbatim; label values are
        // overlaid afterwards without shadowing fixed fields.
        let mut extra: HashMap<String, Value> = event
            .iter()
            .filter(|(key, _)| !CONSUMED_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        for (key, value) in &labels {
            if !Alert::is_known_field(key) && !extra.contains_key(key) {
                extra.insert(key.clone(), Value::String(value.clone()));
            }
        }

        Some(Alert {
            id: id.clone(),
            name: id,
            description: Some(description),
            status,
            severity,
            source: vec!["prometheus".to_string()],
            url: None,
            generator_url,
            environment,
            last_received: Utc::now(),
            fingerprint,
            deleted: false,
            note: None,
            ticket_url: None,
            ticket_status: None,
            playbook_url: None,
            labels,
            annotations,
            extra,
        })
    }
}

impl AlertProvider for PrometheusProvider {
    fn provider_type(&self) -> &'static str {
        "prometheus"
    }

    async fn fetch_alerts(&self) -> Result<Vec<Alert>, ProviderError> {
        let mut request = self.client.get(format!("{}/api/v1/alerts", self.base_url));
        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            request = request.basic_auth(username, Some(password.expose_secret()));
        }

        let response = request
            .send()
            .await
            .map_err(|err| ProviderError::Request(err.to_string()))?;

        if !response.status().is_success() {
            tracing::warn!(
                status = %response.status(),
                "prometheus alert fetch returned non-success, treating as empty"
            );
            return Ok(Vec::new());
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| ProviderError::MalformedPayload(err.to_string()))?;

        // A body without `data` maps like an empty event set.
        let data = body
            .get("data")
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));
        self.map_event(&data)
    }

    fn map_event(&self, event: &Value) -> Result<Vec<Alert>, ProviderError> {
        let Some(event) = event.as_object() else {
            return Err(ProviderError::MalformedPayload(
                "expected a JSON object".to_string(),
            ));
        };

        // Grouped payloads carry an `alerts` array; a bare event maps alone.
        let events: Vec<&Map<String, Value>> = match event.get("alerts").and_then(Value::as_array) {
            Some(alerts) => alerts.iter().filter_map(Value::as_object).collect(),
            None => vec![event],
        };

        Ok(events.into_iter().filter_map(Self::map_single).collect())
    }
}
