//! Batch jobs: many documents through a bounded worker pool.
//!
//! A fixed-size pool of workers pulls `(index, input)` pairs from a shared
//! queue, so each input is claimed by exactly one worker. Results land in
//! an index-addressed slot vector, which makes the report order equal the
//! input order no matter which worker finished first. Batch jobs optimize
//! for completing the maximum number of inputs: a single input's failure
//! is recorded and the run continues, never fail-fast.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::batch::{BatchRecord, BatchReport};
use crate::domain::convert::{DocumentRef, OutputFormat};
use crate::domain::error::{Result, ValidationError};
use crate::registry::EngineRegistry;

/// Upper bound on batch worker parallelism.
pub const MAX_PARALLELISM: usize = 16;

pub struct BatchJobRunner {
    registry: Arc<EngineRegistry>,
}

impl BatchJobRunner {
    pub fn new(registry: Arc<EngineRegistry>) -> Self {
        Self { registry }
    }

    /// Convert every input with one engine and produce the aggregate report.
    ///
    /// Returns only after every input has a terminal record; the runner
    /// never retries (a caller that wants retries resubmits the failed
    /// subset). Caller-input problems (unknown or unavailable engine,
    /// parallelism outside `[1, MAX_PARALLELISM]`) are raised before any
    /// work starts.
    pub async fn run(
        &self,
        inputs: Vec<DocumentRef>,
        engine_name: &str,
        parallelism: usize,
        format: OutputFormat,
    ) -> Result<BatchReport> {
        if !(1..=MAX_PARALLELISM).contains(&parallelism) {
            return Err(ValidationError::ParallelismOutOfRange {
                requested: parallelism,
                max: MAX_PARALLELISM,
            }
            .into());
        }
        let descriptor = self.registry.get(engine_name).await.map_err(|_| {
            ValidationError::UnknownEngine {
                name: engine_name.to_string(),
            }
        })?;
        if !descriptor.available {
            return Err(ValidationError::UnavailableEngine {
                name: engine_name.to_string(),
                reason: descriptor
                    .error
                    .unwrap_or_else(|| "engine is unavailable".to_string()),
            }
            .into());
        }
        let engine = self.registry.handle(engine_name).await?;

        let job_id = Uuid::new_v4();
        let started_at = Utc::now();
        let total = inputs.len();
        info!(%job_id, engine = %engine_name, total, parallelism, "starting batch job");

        let queue: Arc<Mutex<VecDeque<(usize, DocumentRef)>>> =
            Arc::new(Mutex::new(inputs.iter().cloned().enumerate().collect()));
        let slots: Arc<Mutex<Vec<Option<BatchRecord>>>> = Arc::new(Mutex::new(vec![None; total]));

        let pool_size = parallelism.min(total);
        let mut workers = Vec::with_capacity(pool_size);
        for worker_id in 0..pool_size {
            let queue = Arc::clone(&queue);
            let slots = Arc::clone(&slots);
            let engine = Arc::clone(&engine);
            workers.push(tokio::spawn(async move {
                loop {
                    let next = queue.lock().await.pop_front();
                    let Some((index, input)) = next else {
                        break;
                    };
                    debug!(worker_id, index, input = %input, "converting batch input");

                    let started = Instant::now();
                    let result = engine.convert(&input, format).await;
                    let elapsed_ms = started.elapsed().as_millis() as u64;

                    let record = match result {
                        Ok(content) => BatchRecord::success(input, content, elapsed_ms),
                        Err(e) => BatchRecord::failure(input, e, elapsed_ms),
                    };
                    slots.lock().await[index] = Some(record);
                }
            }));
        }

        for worker in workers {
            if let Err(e) = worker.await {
                warn!(%job_id, error = %e, "batch worker task failed");
            }
        }

        // Every input must appear exactly once; a slot left empty by a
        // crashed worker still gets a terminal error record.
        let mut slots = slots.lock().await;
        let records: Vec<BatchRecord> = slots
            .iter_mut()
            .enumerate()
            .map(|(index, slot)| {
                slot.take().unwrap_or_else(|| {
                    BatchRecord::failure(
                        inputs[index].clone(),
                        "batch worker terminated unexpectedly",
                        0,
                    )
                })
            })
            .collect();

        let report = BatchReport::from_records(job_id, engine_name, started_at, records);
        info!(
            %job_id,
            succeeded = report.succeeded,
            failed = report.failed,
            "batch job finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::{sleep, Duration};

    use crate::domain::batch::BatchRecordStatus;
    use crate::domain::error::DocvertError;
    use crate::engine::{Engine, ProbeReport};

    /// Engine that fails inputs containing a marker substring and tracks
    /// conversion concurrency.
    struct BatchEngine {
        name: String,
        fail_marker: Option<String>,
        delay: Duration,
        conversions: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl BatchEngine {
        fn new(name: &str, fail_marker: Option<&str>, delay_ms: u64) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                fail_marker: fail_marker.map(|s| s.to_string()),
                delay: Duration::from_millis(delay_ms),
                conversions: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Engine for BatchEngine {
        fn name(&self) -> &str {
            &self.name
        }

        async fn probe(&self) -> ProbeReport {
            ProbeReport::available(false)
        }

        async fn download(&self) -> std::result::Result<(), String> {
            Ok(())
        }

        async fn convert(
            &self,
            document: &DocumentRef,
            _format: OutputFormat,
        ) -> std::result::Result<String, String> {
            self.conversions.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            if !self.delay.is_zero() {
                sleep(self.delay).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if let Some(marker) = &self.fail_marker {
                if document.as_str().contains(marker.as_str()) {
                    return Err(format!("cannot parse {document}"));
                }
            }
            Ok(format!("converted {document}"))
        }
    }

    async fn runner_with(engine: Arc<BatchEngine>) -> BatchJobRunner {
        let registry =
            Arc::new(EngineRegistry::probe_all(vec![engine as Arc<dyn Engine>]).await);
        BatchJobRunner::new(registry)
    }

    fn inputs(names: &[&str]) -> Vec<DocumentRef> {
        names.iter().map(|n| DocumentRef::from(*n)).collect()
    }

    #[tokio::test]
    async fn test_parallelism_out_of_range_is_rejected() {
        let runner = runner_with(BatchEngine::new("docling", None, 0)).await;
        for bad in [0usize, 17, 100] {
            let err = runner
                .run(inputs(&["a.pdf"]), "docling", bad, OutputFormat::Markdown)
                .await
                .unwrap_err();
            assert!(
                matches!(
                    err,
                    DocvertError::Validation(ValidationError::ParallelismOutOfRange { .. })
                ),
                "parallelism {bad} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_unknown_engine_is_rejected() {
        let runner = runner_with(BatchEngine::new("docling", None, 0)).await;
        let err = runner
            .run(inputs(&["a.pdf"]), "ghost", 2, OutputFormat::Markdown)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DocvertError::Validation(ValidationError::UnknownEngine { .. })
        ));
    }

    #[tokio::test]
    async fn test_counts_and_order_with_one_failing_input() {
        let engine = BatchEngine::new("docling", Some("b.pdf"), 0);
        let runner = runner_with(Arc::clone(&engine)).await;

        let report = runner
            .run(
                inputs(&["a.pdf", "b.pdf", "c.pdf", "d.pdf"]),
                "docling",
                2,
                OutputFormat::Markdown,
            )
            .await
            .unwrap();

        assert_eq!(report.total, 4);
        assert_eq!(report.succeeded, 3);
        assert_eq!(report.failed, 1);

        let order: Vec<&str> = report.records.iter().map(|r| r.input_ref.as_str()).collect();
        assert_eq!(order, vec!["a.pdf", "b.pdf", "c.pdf", "d.pdf"]);

        let failed = &report.records[1];
        assert_eq!(failed.status, BatchRecordStatus::Error);
        assert!(failed.error.as_deref().is_some_and(|e| !e.is_empty()));
        for record in [&report.records[0], &report.records[2], &report.records[3]] {
            assert_eq!(record.status, BatchRecordStatus::Success);
            assert!(record.content.is_some());
        }
    }

    #[tokio::test]
    async fn test_each_input_converted_exactly_once() {
        let engine = BatchEngine::new("docling", None, 5);
        let runner = runner_with(Arc::clone(&engine)).await;

        let docs = inputs(&["a.pdf", "b.pdf", "c.pdf", "d.pdf", "e.pdf", "f.pdf", "g.pdf"]);
        let report = runner
            .run(docs.clone(), "docling", 3, OutputFormat::Text)
            .await
            .unwrap();

        assert_eq!(report.total, docs.len());
        assert_eq!(engine.conversions.load(Ordering::SeqCst), docs.len());
    }

    #[tokio::test]
    async fn test_pool_never_exceeds_requested_parallelism() {
        let engine = BatchEngine::new("docling", None, 20);
        let runner = runner_with(Arc::clone(&engine)).await;

        runner
            .run(
                inputs(&["a", "b", "c", "d", "e", "f"]),
                "docling",
                2,
                OutputFormat::Markdown,
            )
            .await
            .unwrap();

        let max = engine.max_in_flight.load(Ordering::SeqCst);
        assert!(max <= 2, "expected at most 2 concurrent conversions, saw {max}");
        assert!(max >= 1);
    }

    #[tokio::test]
    async fn test_empty_input_set_yields_empty_report() {
        let runner = runner_with(BatchEngine::new("docling", None, 0)).await;
        let report = runner
            .run(Vec::new(), "docling", 4, OutputFormat::Markdown)
            .await
            .unwrap();
        assert_eq!(report.total, 0);
        assert_eq!(report.succeeded, 0);
        assert_eq!(report.failed, 0);
        assert!(report.records.is_empty());
    }

    #[tokio::test]
    async fn test_all_inputs_failing_still_completes() {
        let engine = BatchEngine::new("docling", Some(".pdf"), 0);
        let runner = runner_with(Arc::clone(&engine)).await;

        let report = runner
            .run(inputs(&["a.pdf", "b.pdf"]), "docling", 1, OutputFormat::Json)
            .await
            .unwrap();

        assert_eq!(report.total, 2);
        assert_eq!(report.failed, 2);
        assert_eq!(report.succeeded, 0);
        assert!((report.success_rate() - 0.0).abs() < f64::EPSILON);
    }
}
