//! Batch jobs: many documents against one engine, one aggregate report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::convert::DocumentRef;

/// Terminal state of one input within a batch job.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BatchRecordStatus {
    Success,
    Error,
}

/// Per-input record in a batch report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchRecord {
    pub input_ref: DocumentRef,
    pub status: BatchRecordStatus,

    /// Captured failure message, present only on error.
    pub error: Option<String>,

    pub elapsed_ms: u64,

    /// Size of the converted output, present only on success.
    pub size_bytes: Option<u64>,

    /// Converted content for the caller to persist; never serialized into
    /// the report itself.
    #[serde(skip)]
    pub content: Option<String>,
}

impl BatchRecord {
    pub fn success(input_ref: DocumentRef, content: String, elapsed_ms: u64) -> Self {
        Self {
            input_ref,
            status: BatchRecordStatus::Success,
            error: None,
            elapsed_ms,
            size_bytes: Some(content.len() as u64),
            content: Some(content),
        }
    }

    pub fn failure(input_ref: DocumentRef, error: impl Into<String>, elapsed_ms: u64) -> Self {
        Self {
            input_ref,
            status: BatchRecordStatus::Error,
            error: Some(error.into()),
            elapsed_ms,
            size_bytes: None,
            content: None,
        }
    }
}

/// Aggregate report for a finished batch job.
///
/// Records appear exactly once per input, in the original input order, and
/// `succeeded + failed == total == records.len()`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchReport {
    pub job_id: Uuid,
    pub engine: String,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub records: Vec<BatchRecord>,
}

impl BatchReport {
    /// Derive counts from an ordered record sequence.
    pub fn from_records(
        job_id: Uuid,
        engine: impl Into<String>,
        started_at: DateTime<Utc>,
        records: Vec<BatchRecord>,
    ) -> Self {
        let succeeded = records
            .iter()
            .filter(|r| r.status == BatchRecordStatus::Success)
            .count();
        let failed = records.len() - succeeded;
        Self {
            job_id,
            engine: engine.into(),
            total: records.len(),
            succeeded,
            failed,
            started_at,
            finished_at: Utc::now(),
            records,
        }
    }

    /// Fraction of inputs that converted successfully, in `[0.0, 1.0]`.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.succeeded as f64 / self.total as f64
    }
}
