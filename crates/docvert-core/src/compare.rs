//! Comparison tasks: fan one document out to several engines.
//!
//! [`ComparisonTaskStore`] owns every task's lifecycle and is the sole
//! writer of task state; pollers get read-only snapshots. Each spawned
//! engine worker owns exactly one outcome key, and the aggregate status
//! recomputation always happens under the store's write lock, so two
//! engines finishing simultaneously can never lose an update.
//!
//! The task state machine is `Pending -> Running -> Completed`. A task has
//! no failed terminal state: one engine erroring never prevents the others
//! from succeeding, and the task still completes with a full outcome map.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::convert::{DocumentRef, OutputFormat};
use crate::domain::error::{DocvertError, Result, ValidationError};
use crate::domain::task::{ComparisonTask, EngineOutcome, TaskSummary};
use crate::engine::Engine;
use crate::registry::EngineRegistry;

/// In-memory store of comparison tasks. Cheap to clone; clones share state.
///
/// Tasks are retained until the caller deletes them; the core never
/// garbage-collects.
#[derive(Clone, Default)]
pub struct ComparisonTaskStore {
    tasks: Arc<RwLock<HashMap<Uuid, ComparisonTask>>>,
}

impl ComparisonTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of one task, consistent with the status invariant.
    pub async fn get(&self, task_id: Uuid) -> Result<ComparisonTask> {
        let tasks = self.tasks.read().await;
        tasks
            .get(&task_id)
            .cloned()
            .ok_or(DocvertError::TaskNotFound(task_id))
    }

    /// Summaries of all live tasks, newest first.
    pub async fn list(&self) -> Vec<TaskSummary> {
        let tasks = self.tasks.read().await;
        let mut summaries: Vec<TaskSummary> = tasks.values().map(TaskSummary::from).collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        summaries
    }

    /// Remove a task. Safe while its engine workers are still in flight;
    /// late-arriving workers detect the removal and discard their results.
    pub async fn delete(&self, task_id: Uuid) -> Result<()> {
        let mut tasks = self.tasks.write().await;
        tasks
            .remove(&task_id)
            .map(|_| ())
            .ok_or(DocvertError::TaskNotFound(task_id))
    }

    async fn insert(&self, task: ComparisonTask) {
        let mut tasks = self.tasks.write().await;
        tasks.insert(task.task_id, task);
    }

    /// Move one engine's outcome to `Running`. Returns `false` when the
    /// task no longer exists.
    async fn mark_outcome_running(&self, task_id: Uuid, engine: &str) -> bool {
        let mut tasks = self.tasks.write().await;
        let Some(task) = tasks.get_mut(&task_id) else {
            return false;
        };
        if let Some(outcome) = task.outcomes.get_mut(engine) {
            if !outcome.status.is_terminal() {
                outcome.status = crate::domain::task::OutcomeStatus::Running;
            }
        }
        task.recompute_status();
        true
    }

    /// Write a terminal outcome and recompute the aggregate status under
    /// the same lock. Returns `false` when the task no longer exists.
    /// Terminal outcomes are immutable; a second write to the same key is
    /// ignored.
    async fn record_outcome(&self, task_id: Uuid, engine: &str, outcome: EngineOutcome) -> bool {
        let mut tasks = self.tasks.write().await;
        let Some(task) = tasks.get_mut(&task_id) else {
            return false;
        };
        if let Some(slot) = task.outcomes.get_mut(engine) {
            if !slot.status.is_terminal() {
                *slot = outcome;
            }
        }
        task.recompute_status();
        true
    }
}

/// Submits comparison tasks and drives their per-engine workers.
pub struct ComparisonRunner {
    registry: Arc<EngineRegistry>,
    store: ComparisonTaskStore,
}

impl ComparisonRunner {
    pub fn new(registry: Arc<EngineRegistry>, store: ComparisonTaskStore) -> Self {
        Self { registry, store }
    }

    pub fn store(&self) -> &ComparisonTaskStore {
        &self.store
    }

    /// Create a comparison task and start one worker per engine.
    ///
    /// Validates the selection synchronously, then returns the task id
    /// immediately; conversion progress is observed by polling
    /// [`ComparisonTaskStore::get`]. Duplicate names in the selection are
    /// collapsed, matching the set semantics of the outcome map.
    pub async fn submit(
        &self,
        document: DocumentRef,
        engines: &[String],
        format: OutputFormat,
    ) -> Result<Uuid> {
        if engines.is_empty() {
            return Err(ValidationError::EmptyEngineSelection.into());
        }

        let selection: Vec<String> = {
            let mut seen = BTreeSet::new();
            engines
                .iter()
                .filter(|name| seen.insert((*name).clone()))
                .cloned()
                .collect()
        };

        let mut workers: Vec<(String, Arc<dyn Engine>)> = Vec::with_capacity(selection.len());
        for name in &selection {
            let descriptor = self.registry.get(name).await.map_err(|_| {
                ValidationError::UnknownEngine { name: name.clone() }
            })?;
            if !descriptor.available {
                return Err(ValidationError::UnavailableEngine {
                    name: name.clone(),
                    reason: descriptor
                        .error
                        .unwrap_or_else(|| "engine is unavailable".to_string()),
                }
                .into());
            }
            workers.push((name.clone(), self.registry.handle(name).await?));
        }

        let task = ComparisonTask::new(document.clone(), &selection, format);
        let task_id = task.task_id;
        info!(%task_id, engines = selection.len(), document = %document, "submitting comparison task");
        self.store.insert(task).await;

        for (name, engine) in workers {
            let store = self.store.clone();
            let document = document.clone();
            tokio::spawn(async move {
                run_engine_worker(store, task_id, name, engine, document, format).await;
            });
        }

        Ok(task_id)
    }
}

/// One engine's unit of work within a comparison task.
///
/// Always drives its own outcome to a terminal state; an engine failure is
/// recorded, never propagated. If the task was deleted while converting,
/// the result is discarded instead of written into reclaimed state.
async fn run_engine_worker(
    store: ComparisonTaskStore,
    task_id: Uuid,
    name: String,
    engine: Arc<dyn Engine>,
    document: DocumentRef,
    format: OutputFormat,
) {
    if !store.mark_outcome_running(task_id, &name).await {
        debug!(%task_id, engine = %name, "task deleted before conversion started");
        return;
    }

    let started = Instant::now();
    let result = engine.convert(&document, format).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let outcome = match result {
        Ok(content) => EngineOutcome::success(content, elapsed_ms),
        Err(e) => {
            debug!(%task_id, engine = %name, error = %e, "engine conversion failed");
            EngineOutcome::failure(e, elapsed_ms)
        }
    };

    if !store.record_outcome(task_id, &name, outcome).await {
        debug!(%task_id, engine = %name, "task deleted mid-flight, discarding result");
    }
}
