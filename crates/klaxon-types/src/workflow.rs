//! Workflow domain types for Klaxon.
//!
//! A [`Workflow`] is an automation definition: a set of triggers describing
//! which events activate it, plus the status of its most recent execution.
//! Definitions are authored as YAML files and deserialize directly into
//! these types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Trigger configuration
// ---------------------------------------------------------------------------

/// How a workflow can be triggered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trigger {
    /// Fired when an incoming alert matches all of the trigger's filters.
    /// An empty filter list matches every alert.
    Alert {
        #[serde(default)]
        filters: Vec<TriggerFilter>,
    },
    /// Manually triggered via CLI or API.
    Manual {},
    /// Fired on a fixed interval.
    Interval {
        /// Seconds between firings.
        seconds: u64,
    },
}

/// A single `(key, value)` condition evaluated against an alert.
///
/// Matching rule: key `"source"` matches when the alert's source set contains
/// the value; any other key matches when the alert's known-field or
/// extra-field value at that key equals the value. A missing field is a
/// non-match, never an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TriggerFilter {
    pub key: String,
    pub value: String,
}

impl TriggerFilter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Execution status
// ---------------------------------------------------------------------------

/// Outcome of a workflow's most recent execution.
///
/// `None` at the [`Workflow`] level means the workflow has never executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Success,
    Error,
    /// The workflow references providers that are not configured, so it
    /// could not run.
    ProvidersNotConfigured,
    InProgress,
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

/// An automation definition with triggers and execution history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workflow {
    /// Stable workflow identifier (slug from the definition file).
    pub id: String,
    /// Human-readable workflow name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Trigger configurations. A workflow with no `alert` trigger is never
    /// relevant to any alert.
    #[serde(default)]
    pub triggers: Vec<Trigger>,
    /// Status of the most recent execution, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_execution_status: Option<ExecutionStatus>,
    /// When the most recent execution started, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_execution_time: Option<DateTime<Utc>>,
}

impl Workflow {
    /// The filter list of the first `alert` trigger, if the workflow has one.
    ///
    /// Only the first alert trigger participates in relevance matching; see
    /// DESIGN.md for the rationale.
    pub fn alert_filters(&self) -> Option<&[TriggerFilter]> {
        self.triggers.iter().find_map(|trigger| match trigger {
            Trigger::Alert { filters } => Some(filters.as_slice()),
            _ => None,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
