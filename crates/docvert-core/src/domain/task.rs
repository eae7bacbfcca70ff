//! Comparison tasks: one document fanned out to several engines.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::convert::{DocumentRef, OutputFormat};

/// Aggregate status of a comparison task.
///
/// Monotonic: `Pending -> Running -> Completed`, never backwards. There is
/// no failed terminal state for the task as a whole; failures live on the
/// per-engine outcomes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Running,
    Completed,
}

/// Status of one engine's work within a comparison task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Pending,
    Running,
    Success,
    Error,
}

impl OutcomeStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OutcomeStatus::Success | OutcomeStatus::Error)
    }
}

/// The in-progress or terminal result of one engine within a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineOutcome {
    pub status: OutcomeStatus,

    /// Converted content, present only on success.
    pub content: Option<String>,

    /// Captured engine failure, present only on error.
    pub error: Option<String>,

    /// Wall-clock conversion time, present once terminal.
    pub elapsed_ms: Option<u64>,
}

impl EngineOutcome {
    pub fn pending() -> Self {
        Self {
            status: OutcomeStatus::Pending,
            content: None,
            error: None,
            elapsed_ms: None,
        }
    }

    pub fn success(content: String, elapsed_ms: u64) -> Self {
        Self {
            status: OutcomeStatus::Success,
            content: Some(content),
            error: None,
            elapsed_ms: Some(elapsed_ms),
        }
    }

    pub fn failure(error: impl Into<String>, elapsed_ms: u64) -> Self {
        Self {
            status: OutcomeStatus::Error,
            content: None,
            error: Some(error.into()),
            elapsed_ms: Some(elapsed_ms),
        }
    }
}

/// One document run against a chosen set of engines concurrently.
///
/// The outcome map's key set equals the requested engines and is fixed at
/// creation; workers each own exactly one key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonTask {
    pub task_id: Uuid,
    pub status: TaskStatus,
    pub document: DocumentRef,
    pub output_format: OutputFormat,
    pub created_at: DateTime<Utc>,
    pub outcomes: BTreeMap<String, EngineOutcome>,
}

impl ComparisonTask {
    /// Create a task in `Pending` with one pending outcome per engine.
    pub fn new(document: DocumentRef, engines: &[String], output_format: OutputFormat) -> Self {
        let outcomes = engines
            .iter()
            .map(|name| (name.clone(), EngineOutcome::pending()))
            .collect();
        Self {
            task_id: Uuid::new_v4(),
            status: TaskStatus::Pending,
            document,
            output_format,
            created_at: Utc::now(),
            outcomes,
        }
    }

    /// Engine names this task fans out to, in snapshot order.
    pub fn requested_engines(&self) -> Vec<String> {
        self.outcomes.keys().cloned().collect()
    }

    /// Recompute the aggregate status from the outcomes.
    ///
    /// `Completed` iff every outcome is terminal; `Running` iff at least one
    /// outcome has left `Pending`; otherwise `Pending`. Outcomes never
    /// regress, so the derived status is monotonic.
    pub fn recompute_status(&mut self) {
        let all_terminal = self.outcomes.values().all(|o| o.status.is_terminal());
        let any_started = self
            .outcomes
            .values()
            .any(|o| o.status != OutcomeStatus::Pending);
        self.status = if all_terminal {
            TaskStatus::Completed
        } else if any_started {
            TaskStatus::Running
        } else {
            TaskStatus::Pending
        };
    }
}

/// Lightweight task view for list endpoints; omits outcome contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskSummary {
    pub task_id: Uuid,
    pub status: TaskStatus,
    pub document: DocumentRef,
    pub created_at: DateTime<Utc>,
    pub requested_engines: Vec<String>,
}

impl From<&ComparisonTask> for TaskSummary {
    fn from(task: &ComparisonTask) -> Self {
        Self {
            task_id: task.task_id,
            status: task.status,
            document: task.document.clone(),
            created_at: task.created_at,
            requested_engines: task.requested_engines(),
        }
    }
}
