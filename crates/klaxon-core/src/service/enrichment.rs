//! Alert enrichment service.
//!
//! Persists operator-supplied enrichments (notes, ticket links, arbitrary
//! fields) against an alert fingerprint and overlays them onto alerts when
//! they are read back. Persistence failures are logged and propagated as
//! typed errors; they never affect relevance matching.

use std::collections::HashMap;

use serde_json::Value;

use klaxon_types::alert::Alert;
use klaxon_types::enrichment::AlertEnrichment;
use klaxon_types::error::{EnrichmentError, RepositoryError};

use crate::repository::{AlertRepository, EnrichmentRepository};

/// Service for attaching enrichments to stored alerts.
pub struct EnrichmentService<A, E> {
    alert_repo: A,
    enrichment_repo: E,
}

impl<A, E> EnrichmentService<A, E>
where
    A: AlertRepository,
    E: EnrichmentRepository,
{
    pub fn new(alert_repo: A, enrichment_repo: E) -> Self {
        Self {
            alert_repo,
            enrichment_repo,
        }
    }

    /// Persist enrichments for the alert with the given fingerprint.
    ///
    /// The fingerprint must refer to a stored alert; the enrichment map must
    /// be non-empty. Stored fields merge with any existing enrichment for
    /// the fingerprint.
    pub async fn enrich(
        &self,
        fingerprint: &str,
        enrichments: HashMap<String, Value>,
    ) -> Result<(), EnrichmentError> {
        if enrichments.is_empty() {
            return Err(EnrichmentError::Empty);
        }

        if self.alert_repo.get_alert(fingerprint).await?.is_none() {
            return Err(EnrichmentError::AlertNotFound(fingerprint.to_string()));
        }

        let enrichment = AlertEnrichment::new(fingerprint, enrichments);
        if let Err(err) = self.enrichment_repo.save_enrichment(&enrichment).await {
            tracing::error!(fingerprint, error = %err, "failed to save enrichment");
            return Err(err.into());
        }

        tracing::info!(
            fingerprint,
            fields = enrichment.enrichments.len(),
            "alert enriched"
        );
        Ok(())
    }

    /// Attach or replace the free-text note on an alert.
    pub async fn set_note(&self, fingerprint: &str, note: &str) -> Result<(), EnrichmentError> {
        let enrichment = AlertEnrichment::note(fingerprint, note);
        self.enrich(fingerprint, enrichment.enrichments).await
    }

    /// Overlay any stored enrichment onto `alert` in place.
    pub async fn apply(&self, alert: &mut Alert) -> Result<(), RepositoryError> {
        if let Some(enrichment) = self.enrichment_repo.get_enrichment(&alert.fingerprint).await? {
            enrichment.apply(alert);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use klaxon_types::alert::{AlertSeverity, AlertStatus};
    use serde_json::json;
    use std::sync::Mutex;

    /// Minimal in-memory fakes for the two ports.
    #[derive(Default)]
    struct FakeAlerts {
        alerts: Mutex<HashMap<String, Alert>>,
    }

    impl AlertRepository for FakeAlerts {
        async fn save_alert(&self, alert: &Alert) -> Result<(), RepositoryError> {
            self.alerts
                .lock()
                .unwrap()
                .insert(alert.fingerprint.clone(), alert.clone());
            Ok(())
        }

        async fn get_alert(&self, fingerprint: &str) -> Result<Option<Alert>, RepositoryError> {
            Ok(self.alerts.lock().unwrap().get(fingerprint).cloned())
        }

        async fn list_alerts(&self) -> Result<Vec<Alert>, RepositoryError> {
            Ok(self.alerts.lock().unwrap().values().cloned().collect())
        }

        async fn delete_alert(&self, fingerprint: &str) -> Result<bool, RepositoryError> {
            Ok(self.alerts.lock().unwrap().remove(fingerprint).is_some())
        }
    }

    #[derive(Default)]
    struct FakeEnrichments {
        entries: Mutex<HashMap<String, AlertEnrichment>>,
        fail_writes: bool,
    }

    impl EnrichmentRepository for FakeEnrichments {
        async fn save_enrichment(
            &self,
            enrichment: &AlertEnrichment,
        ) -> Result<(), RepositoryError> {
            if self.fail_writes {
                return Err(RepositoryError::Unavailable);
            }
            let mut entries = self.entries.lock().unwrap();
            match entries.get_mut(&enrichment.fingerprint) {
                Some(existing) => existing.merge(enrichment),
                None => {
                    entries.insert(enrichment.fingerprint.clone(), enrichment.clone());
                }
            }
            Ok(())
        }

        async fn get_enrichment(
            &self,
            fingerprint: &str,
        ) -> Result<Option<AlertEnrichment>, RepositoryError> {
            Ok(self.entries.lock().unwrap().get(fingerprint).cloned())
        }

        async fn delete_enrichment(&self, fingerprint: &str) -> Result<bool, RepositoryError> {
            Ok(self.entries.lock().unwrap().remove(fingerprint).is_some())
        }
    }

    fn stored_alert(fingerprint: &str) -> Alert {
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
            fingerprint: fingerprint.to_string(),
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

    async fn service_with_alert(
        fingerprint: &str,
    ) -> EnrichmentService<FakeAlerts, FakeEnrichments> {
        let alerts = FakeAlerts::default();
        alerts.save_alert(&stored_alert(fingerprint)).await.unwrap();
        EnrichmentService::new(alerts, FakeEnrichments::default())
    }

    #[tokio::test]
    async fn test_set_note_then_apply() {
        let service = service_with_alert("fp-1").await;
        service.set_note("fp-1", "restarted the pod").await.unwrap();

        let mut alert = stored_alert("fp-1");
        service.apply(&mut alert).await.unwrap();
        assert_eq!(alert.note.as_deref(), Some("restarted the pod"));
    }

    #[tokio::test]
    async fn test_enrich_unknown_fingerprint_fails() {
        let service = service_with_alert("fp-1").await;
        let result = service.set_note("fp-missing", "hello").await;
        assert!(matches!(result, Err(EnrichmentError::AlertNotFound(_))));
    }

    #[tokio::test]
    async fn test_enrich_empty_payload_fails() {
        let service = service_with_alert("fp-1").await;
        let result = service.enrich("fp-1", HashMap::new()).await;
        assert!(matches!(result, Err(EnrichmentError::Empty)));
    }

    #[tokio::test]
    async fn test_enrichments_merge_across_calls() {
        let service = service_with_alert("fp-1").await;
        service.set_note("fp-1", "first note").await.unwrap();
        service
            .enrich(
                "fp-1",
                HashMap::from([("ticket_url".to_string(), json!("https://jira/KLX-1"))]),
            )
            .await
            .unwrap();

        let mut alert = stored_alert("fp-1");
        service.apply(&mut alert).await.unwrap();
        assert_eq!(alert.note.as_deref(), Some("first note"));
        assert_eq!(alert.ticket_url.as_deref(), Some("https://jira/KLX-1"));
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let alerts = FakeAlerts::default();
        alerts.save_alert(&stored_alert("fp-1")).await.unwrap();
        let enrichments = FakeEnrichments {
            fail_writes: true,
            ..Default::default()
        };
        let service = EnrichmentService::new(alerts, enrichments);

        let result = service.set_note("fp-1", "will not stick").await;
        assert!(matches!(result, Err(EnrichmentError::Storage(_))));
    }

    #[tokio::test]
    async fn test_apply_without_enrichment_is_noop() {
        let service = service_with_alert("fp-1").await;
        let mut alert = stored_alert("fp-1");
        service.apply(&mut alert).await.unwrap();
        assert!(alert.note.is_none());
    }
}
