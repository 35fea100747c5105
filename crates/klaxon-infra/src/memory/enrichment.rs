//! In-memory enrichment store keyed by fingerprint, merging on write.

use std::sync::Arc;

use dashmap::DashMap;

use klaxon_core::repository::EnrichmentRepository;
use klaxon_types::enrichment::AlertEnrichment;
use klaxon_types::error::RepositoryError;

/// DashMap-backed enrichment registry. Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct InMemoryEnrichmentStore {
    entries: Arc<DashMap<String, AlertEnrichment>>,
}

impl InMemoryEnrichmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EnrichmentRepository for InMemoryEnrichmentStore {
    async fn save_enrichment(&self, enrichment: &AlertEnrichment) -> Result<(), RepositoryError> {
        self.entries
            .entry(enrichment.fingerprint.clone())
            .and_modify(|existing| existing.merge(enrichment))
            .or_insert_with(|| enrichment.clone());
        Ok(())
    }

    async fn get_enrichment(
        &self,
        fingerprint: &str,
    ) -> Result<Option<AlertEnrichment>, RepositoryError> {
        Ok(self.entries.get(fingerprint).map(|entry| entry.value().clone()))
    }

    async fn delete_enrichment(&self, fingerprint: &str) -> Result<bool, RepositoryError> {
        Ok(self.entries.remove(fingerprint).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_save_and_get() {
        let store = InMemoryEnrichmentStore::new();
        store
            .save_enrichment(&AlertEnrichment::note("fp-1", "hello"))
            .await
            .unwrap();

        let fetched = store.get_enrichment("fp-1").await.unwrap().unwrap();
        assert_eq!(fetched.enrichments.get("note"), Some(&json!("hello")));
        assert!(store.get_enrichment("fp-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_merges_fields() {
        let store = InMemoryEnrichmentStore::new();
        store
            .save_enrichment(&AlertEnrichment::note("fp-1", "a note"))
            .await
            .unwrap();
        store
            .save_enrichment(&AlertEnrichment::new(
                "fp-1",
                HashMap::from([("ticket_url".to_string(), json!("https://jira/KLX-2"))]),
            ))
            .await
            .unwrap();

        let fetched = store.get_enrichment("fp-1").await.unwrap().unwrap();
        assert_eq!(fetched.enrichments.get("note"), Some(&json!("a note")));
        assert_eq!(
            fetched.enrichments.get("ticket_url"),
            Some(&json!("https://jira/KLX-2"))
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryEnrichmentStore::new();
        store
            .save_enrichment(&AlertEnrichment::note("fp-1", "x"))
            .await
            .unwrap();
        assert!(store.delete_enrichment("fp-1").await.unwrap());
        assert!(!store.delete_enrichment("fp-1").await.unwrap());
    }
}
