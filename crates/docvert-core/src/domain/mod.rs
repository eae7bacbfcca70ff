//! Domain models for docvert.
//!
//! Canonical definitions for the core entities:
//! - `EngineDescriptor`: one engine's availability and download state
//! - `ComparisonTask`: one document fanned out to several engines
//! - `BatchReport`: many documents against one engine
//! - Error taxonomy shared by every component

pub mod batch;
pub mod convert;
pub mod descriptor;
pub mod error;
pub mod task;

// Re-export main types and errors
pub use batch::{BatchRecord, BatchRecordStatus, BatchReport};
pub use convert::{DocumentRef, OutputFormat};
pub use descriptor::{DownloadStatus, EngineDescriptor};
pub use error::{DocvertError, Result, ValidationError};
pub use task::{ComparisonTask, EngineOutcome, OutcomeStatus, TaskStatus, TaskSummary};
