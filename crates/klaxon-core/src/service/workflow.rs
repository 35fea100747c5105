//! Workflow query service.
//!
//! Answers "which workflows would this alert trigger, and how did they fare
//! last time" by combining the workflow repository with the pure relevance
//! matcher and status classifier.

use serde::Serialize;

use klaxon_types::alert::Alert;
use klaxon_types::error::RepositoryError;
use klaxon_types::workflow::Workflow;

use crate::relevance::relevant_workflows;
use crate::repository::WorkflowRepository;
use crate::status::{aggregate_status, ExecutionSummary};

/// The workflows relevant to one alert plus their aggregate execution
/// summary. `summary` is `None` exactly when `workflows` is empty.
#[derive(Debug, Clone, Serialize)]
pub struct RelevantSet {
    pub workflows: Vec<Workflow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ExecutionSummary>,
}

/// Service for querying workflow definitions against alerts.
pub struct WorkflowService<W> {
    workflow_repo: W,
}

impl<W> WorkflowService<W>
where
    W: WorkflowRepository,
{
    pub fn new(workflow_repo: W) -> Self {
        Self { workflow_repo }
    }

    /// All registered workflow definitions.
    pub async fn list(&self) -> Result<Vec<Workflow>, RepositoryError> {
        self.workflow_repo.list_workflows().await
    }

    /// The workflows relevant to `alert` with their aggregate summary.
    pub async fn relevant_to(&self, alert: &Alert) -> Result<RelevantSet, RepositoryError> {
        let all = self.workflow_repo.list_workflows().await?;
        let relevant = relevant_workflows(alert, &all);
        let summary = aggregate_status(&relevant);

        tracing::debug!(
            fingerprint = %alert.fingerprint,
            total = all.len(),
            relevant = relevant.len(),
            "matched workflows against alert"
        );

        Ok(RelevantSet {
            workflows: relevant.into_iter().cloned().collect(),
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use klaxon_types::alert::{AlertSeverity, AlertStatus};
    use klaxon_types::workflow::{ExecutionStatus, Trigger, TriggerFilter};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeWorkflows {
        workflows: Mutex<Vec<Workflow>>,
    }

    impl WorkflowRepository for FakeWorkflows {
        async fn save_workflow(&self, workflow: &Workflow) -> Result<(), RepositoryError> {
            let mut workflows = self.workflows.lock().unwrap();
            if let Some(existing) = workflows.iter_mut().find(|wf| wf.id == workflow.id) {
                *existing = workflow.clone();
            } else {
                workflows.push(workflow.clone());
            }
            Ok(())
        }

        async fn get_workflow(&self, id: &str) -> Result<Option<Workflow>, RepositoryError> {
            Ok(self
                .workflows
                .lock()
                .unwrap()
                .iter()
                .find(|wf| wf.id == id)
                .cloned())
        }

        async fn list_workflows(&self) -> Result<Vec<Workflow>, RepositoryError> {
            Ok(self.workflows.lock().unwrap().clone())
        }
    }

    fn alert() -> Alert {
        Alert {
            id: "a1".to_string(),
            name: "HighRequestLatency".to_string(),
            description: None,
            status: AlertStatus::Firing,
            severity: AlertSeverity::Critical,
            source: vec!["prometheus".to_string()],
            url: None,
            generator_url: None,
            environment: "production".to_string(),
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

    fn wf(id: &str, filters: Vec<TriggerFilter>, status: Option<ExecutionStatus>) -> Workflow {
        Workflow {
            id: id.to_string(),
            name: id.to_string(),
            description: None,
            triggers: vec![Trigger::Alert { filters }],
            last_execution_status: status,
            last_execution_time: None,
        }
    }

    #[tokio::test]
    async fn test_relevant_to_filters_and_summarizes() {
        let repo = FakeWorkflows::default();
        repo.save_workflow(&wf("match-all", vec![], Some(ExecutionStatus::Success)))
            .await
            .unwrap();
        repo.save_workflow(&wf(
            "critical-only",
            vec![TriggerFilter::new("severity", "critical")],
            Some(ExecutionStatus::Success),
        ))
        .await
        .unwrap();
        repo.save_workflow(&wf(
            "low-only",
            vec![TriggerFilter::new("severity", "low")],
            Some(ExecutionStatus::Error),
        ))
        .await
        .unwrap();

        let service = WorkflowService::new(repo);
        let set = service.relevant_to(&alert()).await.unwrap();

        let ids: Vec<&str> = set.workflows.iter().map(|wf| wf.id.as_str()).collect();
        assert_eq!(ids, vec!["match-all", "critical-only"]);
        // The irrelevant failing workflow does not poison the summary
        assert_eq!(set.summary, Some(ExecutionSummary::Success));
    }

    #[tokio::test]
    async fn test_relevant_to_empty_set_has_no_summary() {
        let repo = FakeWorkflows::default();
        repo.save_workflow(&wf(
            "low-only",
            vec![TriggerFilter::new("severity", "low")],
            None,
        ))
        .await
        .unwrap();

        let service = WorkflowService::new(repo);
        let set = service.relevant_to(&alert()).await.unwrap();
        assert!(set.workflows.is_empty());
        assert!(set.summary.is_none());
    }

    #[tokio::test]
    async fn test_list_returns_all_definitions() {
        let repo = FakeWorkflows::default();
        repo.save_workflow(&wf("one", vec![], None)).await.unwrap();
        repo.save_workflow(&wf("two", vec![], None)).await.unwrap();

        let service = WorkflowService::new(repo);
        assert_eq!(service.list().await.unwrap().len(), 2);
    }
}
