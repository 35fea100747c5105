//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by the REST API.
//! Services are generic over repository traits, but AppState pins them to
//! the concrete infra implementations (in-memory registries, Prometheus
//! provider).

use std::path::Path;
use std::sync::Arc;

use klaxon_core::service::enrichment::EnrichmentService;
use klaxon_core::service::workflow::WorkflowService;
use klaxon_infra::memory::{InMemoryAlertStore, InMemoryEnrichmentStore, InMemoryWorkflowStore};
use klaxon_infra::provider::PrometheusProvider;
use klaxon_infra::workflow::loader::load_workflow_dir;
use klaxon_types::config::KlaxonConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteEnrichmentService =
    EnrichmentService<InMemoryAlertStore, InMemoryEnrichmentStore>;

pub type ConcreteWorkflowService = WorkflowService<InMemoryWorkflowStore>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub alerts: InMemoryAlertStore,
    pub enrichment_service: Arc<ConcreteEnrichmentService>,
    pub workflow_service: Arc<ConcreteWorkflowService>,
    /// Prometheus connector; present even without pull credentials so pushed
    /// webhook payloads can always be mapped.
    pub prometheus: Arc<PrometheusProvider>,
    /// Bearer token required on the ingest endpoint, when configured.
    pub ingest_token: Option<String>,
}

impl AppState {
    /// Initialize the application state: load workflow definitions, wire
    /// services.
    pub async fn init(config: &KlaxonConfig) -> anyhow::Result<Self> {
        let alerts = InMemoryAlertStore::new();
        let enrichments = InMemoryEnrichmentStore::new();
        let workflows = InMemoryWorkflowStore::new();

        // Register workflow definitions from the configured directory.
        let definitions = load_workflow_dir(Path::new(&config.workflow_dir)).await?;
        tracing::info!(count = definitions.len(), dir = %config.workflow_dir, "registered workflows");
        workflows.replace_all(definitions).await;

        let enrichment_service = EnrichmentService::new(alerts.clone(), enrichments);
        let workflow_service = WorkflowService::new(workflows);

        // The provider maps pushed payloads even when pull credentials are
        // absent; a default config only matters for fetch_alerts().
        let prometheus_config = config.prometheus.clone().unwrap_or_else(|| {
            klaxon_types::config::PrometheusConfig {
                url: String::new(),
                username: None,
                password: None,
                poll_interval_secs: 60,
            }
        });

        Ok(Self {
            alerts,
            enrichment_service: Arc::new(enrichment_service),
            workflow_service: Arc::new(workflow_service),
            prometheus: Arc::new(PrometheusProvider::new(&prometheus_config)),
            ingest_token: config.ingest_token.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_loads_workflow_definitions() {
        let tmp = TempDir::new().unwrap();
        let workflow_dir = tmp.path().join("workflows");
        tokio::fs::create_dir_all(&workflow_dir).await.unwrap();
        tokio::fs::write(
            workflow_dir.join("page.yaml"),
            "id: page-oncall\nname: Page on-call\ntriggers:\n  - type: alert\n",
        )
        .await
        .unwrap();

        let config = KlaxonConfig {
            workflow_dir: workflow_dir.display().to_string(),
            ..Default::default()
        };

        let state = AppState::init(&config).await.unwrap();
        let workflows = state.workflow_service.list().await.unwrap();
        assert_eq!(workflows.len(), 1);
        assert_eq!(workflows[0].id, "page-oncall");
        assert!(state.ingest_token.is_none());
    }

    #[tokio::test]
    async fn test_init_with_missing_workflow_dir_is_empty() {
        let config = KlaxonConfig {
            workflow_dir: "/nonexistent/klaxon-workflows".to_string(),
            ..Default::default()
        };
        let state = AppState::init(&config).await.unwrap();
        assert!(state.workflow_service.list().await.unwrap().is_empty());
    }
}
