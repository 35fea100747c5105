//! Workflow repository trait definition.
//!
//! Defines the storage interface for workflow definitions. The infrastructure
//! layer implements this trait over an in-memory registry populated from YAML
//! definition files at startup.

use klaxon_types::error::RepositoryError;
use klaxon_types::workflow::Workflow;

/// Repository trait for workflow definitions.
pub trait WorkflowRepository: Send + Sync {
    /// Upsert a workflow definition (insert or replace by id).
    fn save_workflow(
        &self,
        workflow: &Workflow,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a workflow definition by its id.
    fn get_workflow(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Workflow>, RepositoryError>> + Send;

    /// List all workflow definitions in registration order.
    fn list_workflows(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Workflow>, RepositoryError>> + Send;
}
