//! In-memory alert store keyed by fingerprint.

use std::sync::Arc;

use dashmap::DashMap;

use klaxon_core::repository::AlertRepository;
use klaxon_types::alert::Alert;
use klaxon_types::error::RepositoryError;

/// DashMap-backed alert registry. Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct InMemoryAlertStore {
    alerts: Arc<DashMap<String, Alert>>,
}

impl InMemoryAlertStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored alerts.
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

impl AlertRepository for InMemoryAlertStore {
    async fn save_alert(&self, alert: &Alert) -> Result<(), RepositoryError> {
        self.alerts
            .insert(alert.fingerprint.clone(), alert.clone());
        Ok(())
    }

    async fn get_alert(&self, fingerprint: &str) -> Result<Option<Alert>, RepositoryError> {
        Ok(self.alerts.get(fingerprint).map(|entry| entry.value().clone()))
    }

    async fn list_alerts(&self) -> Result<Vec<Alert>, RepositoryError> {
        let mut alerts: Vec<Alert> = self
            .alerts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        alerts.sort_by(|a, b| b.last_received.cmp(&a.last_received));
        Ok(alerts)
    }

    async fn delete_alert(&self, fingerprint: &str) -> Result<bool, RepositoryError> {
        Ok(self.alerts.remove(fingerprint).is_some())
    }
}
