//! Integration tests for the orchestration core: registry, downloads,
//! comparison fan-out and batch jobs working against one engine set.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::{sleep, Duration};
use uuid::Uuid;

use docvert_core::{
    BatchJobRunner, ComparisonRunner, ComparisonTaskStore, DocumentRef, DocvertError,
    DownloadCoordinator, DownloadStatus, Engine, EngineRegistry, OutcomeStatus, OutputFormat,
    ProbeReport, TaskStatus,
};

/// Test engine with scriptable probe, download and conversion behaviour.
struct FakeEngine {
    name: String,
    probe: ProbeReport,
    convert_delay: Duration,
    convert_error: Option<String>,
    downloads: AtomicUsize,
}

impl FakeEngine {
    fn fast(name: &str) -> Arc<dyn Engine> {
        Arc::new(Self {
            name: name.to_string(),
            probe: ProbeReport::available(false),
            convert_delay: Duration::ZERO,
            convert_error: None,
            downloads: AtomicUsize::new(0),
        })
    }

    fn slow(name: &str, delay_ms: u64) -> Arc<dyn Engine> {
        Arc::new(Self {
            name: name.to_string(),
            probe: ProbeReport::available(false),
            convert_delay: Duration::from_millis(delay_ms),
            convert_error: None,
            downloads: AtomicUsize::new(0),
        })
    }

    fn broken(name: &str) -> Arc<dyn Engine> {
        Arc::new(Self {
            name: name.to_string(),
            probe: ProbeReport::available(false),
            convert_delay: Duration::ZERO,
            convert_error: Some(format!("{name} cannot read this document")),
            downloads: AtomicUsize::new(0),
        })
    }

    fn needs_models(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            probe: ProbeReport::available(true),
            convert_delay: Duration::ZERO,
            convert_error: None,
            downloads: AtomicUsize::new(0),
        })
    }

    fn unavailable(name: &str, error: &str) -> Arc<dyn Engine> {
        Arc::new(Self {
            name: name.to_string(),
            probe: ProbeReport::unavailable(error, false),
            convert_delay: Duration::ZERO,
            convert_error: None,
            downloads: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Engine for FakeEngine {
    fn name(&self) -> &str {
        &self.name
    }

    async fn probe(&self) -> ProbeReport {
        self.probe.clone()
    }

    async fn download(&self) -> Result<(), String> {
        self.downloads.fetch_add(1, Ordering::SeqCst);
        sleep(Duration::from_millis(30)).await;
        Ok(())
    }

    async fn convert(
        &self,
        document: &DocumentRef,
        format: OutputFormat,
    ) -> Result<String, String> {
        if !self.convert_delay.is_zero() {
            sleep(self.convert_delay).await;
        }
        match &self.convert_error {
            Some(e) => Err(e.clone()),
            None => Ok(format!("{}:{}:{}", self.name, document, format)),
        }
    }
}

async fn wait_until_completed(
    store: &ComparisonTaskStore,
    task_id: Uuid,
) -> docvert_core::ComparisonTask {
    for _ in 0..200 {
        let task = store.get(task_id).await.expect("task should exist");
        if task.status == TaskStatus::Completed {
            return task;
        }
        sleep(Duration::from_millis(5)).await;
    }
    panic!("comparison task never completed");
}

#[tokio::test]
async fn test_registry_probe_then_compare_fast_slow_broken() {
    let registry = Arc::new(
        EngineRegistry::probe_all(vec![
            FakeEngine::fast("fast"),
            FakeEngine::slow("slow", 60),
            FakeEngine::broken("broken"),
        ])
        .await,
    );
    let runner = ComparisonRunner::new(Arc::clone(&registry), ComparisonTaskStore::new());

    let engines: Vec<String> = ["fast", "slow", "broken"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let task_id = runner
        .submit(DocumentRef::from("report.pdf"), &engines, OutputFormat::Markdown)
        .await
        .expect("submit failed");

    let task = wait_until_completed(runner.store(), task_id).await;
    assert_eq!(task.status, TaskStatus::Completed);
    assert_eq!(task.outcomes["fast"].status, OutcomeStatus::Success);
    assert_eq!(task.outcomes["slow"].status, OutcomeStatus::Success);
    assert_eq!(task.outcomes["broken"].status, OutcomeStatus::Error);
    assert!(task.outcomes["broken"]
        .error
        .as_deref()
        .is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn test_task_status_is_monotonic_under_polling() {
    let registry = Arc::new(
        EngineRegistry::probe_all(vec![FakeEngine::fast("fast"), FakeEngine::slow("slow", 50)])
            .await,
    );
    let runner = ComparisonRunner::new(Arc::clone(&registry), ComparisonTaskStore::new());

    let engines: Vec<String> = ["fast", "slow"].iter().map(|s| s.to_string()).collect();
    let task_id = runner
        .submit(DocumentRef::from("doc.pdf"), &engines, OutputFormat::Text)
        .await
        .unwrap();

    fn rank(status: TaskStatus) -> u8 {
        match status {
            TaskStatus::Pending => 0,
            TaskStatus::Running => 1,
            TaskStatus::Completed => 2,
        }
    }

    let mut last = 0u8;
    loop {
        let task = runner.store().get(task_id).await.unwrap();
        let now = rank(task.status);
        assert!(now >= last, "status regressed from {last} to {now}");
        last = now;

        // The completed invariant: no snapshot may claim completion while
        // an outcome is still pending or running.
        if task.status == TaskStatus::Completed {
            assert!(task.outcomes.values().all(|o| o.status.is_terminal()));
            break;
        }
        sleep(Duration::from_millis(3)).await;
    }
}

#[tokio::test]
async fn test_unavailable_engine_is_listed_but_rejected_for_work() {
    let registry = Arc::new(
        EngineRegistry::probe_all(vec![
            FakeEngine::fast("good"),
            FakeEngine::unavailable("bad", "library missing"),
        ])
        .await,
    );

    // The registry still reports the broken engine, with its reason.
    let snapshot = registry.snapshot().await;
    assert_eq!(snapshot.len(), 2);
    let bad = snapshot.iter().find(|d| d.name == "bad").unwrap();
    assert!(!bad.available);
    assert_eq!(bad.error.as_deref(), Some("library missing"));

    // But neither comparison nor batch will accept it.
    let runner = ComparisonRunner::new(Arc::clone(&registry), ComparisonTaskStore::new());
    let err = runner
        .submit(
            DocumentRef::from("doc.pdf"),
            &["bad".to_string()],
            OutputFormat::Markdown,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DocvertError::Validation(_)));

    let batch = BatchJobRunner::new(Arc::clone(&registry));
    let err = batch
        .run(
            vec![DocumentRef::from("doc.pdf")],
            "bad",
            2,
            OutputFormat::Markdown,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DocvertError::Validation(_)));
}

#[tokio::test]
async fn test_batch_partial_failure_report() {
    let registry =
        Arc::new(EngineRegistry::probe_all(vec![FailOnB::new() as Arc<dyn Engine>]).await);
    let batch = BatchJobRunner::new(registry);

    let inputs: Vec<DocumentRef> = ["a.pdf", "b.pdf", "c.pdf", "d.pdf"]
        .iter()
        .map(|n| DocumentRef::from(*n))
        .collect();
    let report = batch
        .run(inputs, "x", 2, OutputFormat::Markdown)
        .await
        .expect("batch failed");

    assert_eq!(report.total, 4);
    assert_eq!(report.succeeded, 3);
    assert_eq!(report.failed, 1);

    let b = &report.records[1];
    assert_eq!(b.input_ref.as_str(), "b.pdf");
    assert!(b.error.as_deref().is_some_and(|e| !e.is_empty()));
}

struct FailOnB;

impl FailOnB {
    fn new() -> Arc<Self> {
        Arc::new(Self)
    }
}

#[async_trait]
impl Engine for FailOnB {
    fn name(&self) -> &str {
        "x"
    }

    async fn probe(&self) -> ProbeReport {
        ProbeReport::available(false)
    }

    async fn download(&self) -> Result<(), String> {
        Ok(())
    }

    async fn convert(
        &self,
        document: &DocumentRef,
        _format: OutputFormat,
    ) -> Result<String, String> {
        if document.as_str() == "b.pdf" {
            Err("unreadable page tree".to_string())
        } else {
            Ok("content".to_string())
        }
    }
}

#[tokio::test]
async fn test_delete_mid_flight_then_get_is_not_found() {
    let registry =
        Arc::new(EngineRegistry::probe_all(vec![FakeEngine::slow("slow", 60)]).await);
    let runner = ComparisonRunner::new(Arc::clone(&registry), ComparisonTaskStore::new());

    let task_id = runner
        .submit(
            DocumentRef::from("doc.pdf"),
            &["slow".to_string()],
            OutputFormat::Markdown,
        )
        .await
        .unwrap();

    sleep(Duration::from_millis(10)).await;
    runner.store().delete(task_id).await.unwrap();

    // Let the in-flight worker finish and hit the discard path.
    sleep(Duration::from_millis(100)).await;
    let err = runner.store().get(task_id).await.unwrap_err();
    assert!(matches!(err, DocvertError::TaskNotFound(_)));
}

#[tokio::test]
async fn test_concurrent_download_triggers_execute_once() {
    let engine = FakeEngine::needs_models("marker");
    let registry = Arc::new(
        EngineRegistry::probe_all(vec![Arc::clone(&engine) as Arc<dyn Engine>]).await,
    );
    let coordinator = Arc::new(DownloadCoordinator::new(Arc::clone(&registry)));

    let a = {
        let coordinator = Arc::clone(&coordinator);
        tokio::spawn(async move { coordinator.trigger_download("marker").await })
    };
    let b = {
        let coordinator = Arc::clone(&coordinator);
        tokio::spawn(async move {
            sleep(Duration::from_millis(5)).await;
            coordinator.trigger_download("marker").await
        })
    };

    let a = a.await.unwrap();
    let b = b.await.unwrap();

    // One caller wins the download, the other is told it is in progress.
    assert!(a.is_ok());
    assert!(matches!(b.unwrap_err(), DocvertError::DownloadInProgress(_)));
    assert_eq!(engine.downloads.load(Ordering::SeqCst), 1);

    let descriptor = registry.get("marker").await.unwrap();
    assert_eq!(descriptor.download_status, DownloadStatus::Ready);
}
