//! Aggregate execution-status classification for a set of workflows.
//!
//! Summarizes the last-execution statuses of the workflows relevant to an
//! alert into a single label/color pair, in strict priority order: all
//! succeeded, any failed, any unconfigured, otherwise pending.

use serde::{Deserialize, Serialize};

use klaxon_types::workflow::{ExecutionStatus, Workflow};

/// Display color for an aggregate execution summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    Green,
    Red,
    Amber,
    Gray,
}

/// Aggregate classification of a non-empty set of workflow executions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionSummary {
    /// Every workflow's last execution succeeded.
    Success,
    /// At least one workflow's last execution failed.
    SomeFailed,
    /// At least one workflow could not run for lack of configured providers.
    NotConfigured,
    /// Nothing failed and not everything succeeded (pending, in progress,
    /// or never executed).
    Pending,
}

impl ExecutionSummary {
    /// Short machine-friendly label.
    pub fn label(&self) -> &'static str {
        match self {
            ExecutionSummary::Success => "success",
            ExecutionSummary::SomeFailed => "some failed",
            ExecutionSummary::NotConfigured => "not configured",
            ExecutionSummary::Pending => "pending",
        }
    }

    /// Display color for status icons.
    pub fn color(&self) -> StatusColor {
        match self {
            ExecutionSummary::Success => StatusColor::Green,
            ExecutionSummary::SomeFailed => StatusColor::Red,
            ExecutionSummary::NotConfigured => StatusColor::Amber,
            ExecutionSummary::Pending => StatusColor::Gray,
        }
    }

    /// Long-form description suitable for tooltips.
    pub fn description(&self) -> &'static str {
        match self {
            ExecutionSummary::Success => "All workflows executed successfully",
            ExecutionSummary::SomeFailed => "Some workflows failed to execute",
            ExecutionSummary::NotConfigured => "Some workflows are not configured",
            ExecutionSummary::Pending => "Workflows have yet to execute",
        }
    }
}

/// Classify the aggregate execution status of a workflow set.
///
/// First matching rule wins:
/// 1. all last executions succeeded -> [`ExecutionSummary::Success`]
/// 2. any last execution errored -> [`ExecutionSummary::SomeFailed`]
/// 3. any workflow lacks configured providers -> [`ExecutionSummary::NotConfigured`]
/// 4. otherwise -> [`ExecutionSummary::Pending`]
///
/// Returns `None` for an empty set: callers only summarize a non-empty
/// relevant set (the status icon is not shown otherwise).
pub fn aggregate_status(workflows: &[&Workflow]) -> Option<ExecutionSummary> {
    if workflows.is_empty() {
        return None;
    }

    let any_with = |status: ExecutionStatus| {
        workflows
            .iter()
            .any(|wf| wf.last_execution_status == Some(status))
    };

    let all_success = workflows
        .iter()
        .all(|wf| wf.last_execution_status == Some(ExecutionStatus::Success));

    let summary = if all_success {
        ExecutionSummary::Success
    } else if any_with(ExecutionStatus::Error) {
        ExecutionSummary::SomeFailed
    } else if any_with(ExecutionStatus::ProvidersNotConfigured) {
        ExecutionSummary::NotConfigured
    } else {
        ExecutionSummary::Pending
    };

    Some(summary)
}
