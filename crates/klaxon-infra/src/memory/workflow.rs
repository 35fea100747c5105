//! In-memory workflow definition registry.
//!
//! Keeps definitions in registration order -- relevance matching and the
//! list endpoint both preserve the order workflows were loaded in, so the
//! backing store is an ordered `Vec` behind a `tokio::sync::RwLock` rather
//! than a hash map.

use std::sync::Arc;

use tokio::sync::RwLock;

use klaxon_core::repository::WorkflowRepository;
use klaxon_types::error::RepositoryError;
use klaxon_types::workflow::Workflow;

/// Ordered workflow registry. Clones share the same underlying list.
#[derive(Clone, Default)]
pub struct InMemoryWorkflowStore {
    workflows: Arc<RwLock<Vec<Workflow>>>,
}

impl InMemoryWorkflowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-register definitions, replacing the current set.
    pub async fn replace_all(&self, definitions: Vec<Workflow>) {
        let mut workflows = self.workflows.write().await;
        *workflows = definitions;
    }
}

impl WorkflowRepository for InMemoryWorkflowStore {
    async fn save_workflow(&self, workflow: &Workflow) -> Result<(), RepositoryError> {
        let mut workflows = self.workflows.write().await;
        match workflows.iter_mut().find(|wf| wf.id == workflow.id) {
            Some(existing) => *existing = workflow.clone(),
            None => workflows.push(workflow.clone()),
        }
        Ok(())
    }

    async fn get_workflow(&self, id: &str) -> Result<Option<Workflow>, RepositoryError> {
        Ok(self
            .workflows
            .read()
            .await
            .iter()
            .find(|wf| wf.id == id)
            .cloned())
    }

    async fn list_workflows(&self) -> Result<Vec<Workflow>, RepositoryError> {
        Ok(self.workflows.read().await.clone())
    }
}
