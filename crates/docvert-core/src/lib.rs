//! docvert Core Library
//!
//! Orchestrates interchangeable document extraction engines: a registry of
//! what is usable right now, coordinated model downloads, comparison tasks
//! that fan one document out to several engines, and batch jobs that drive
//! many documents through one engine. Converted text can be chunked for
//! retrieval pipelines.

pub mod batch;
pub mod chunking;
pub mod compare;
pub mod config;
pub mod domain;
pub mod download;
pub mod engine;
pub mod engines;
pub mod registry;
pub mod telemetry;

pub use domain::{
    BatchRecord, BatchRecordStatus, BatchReport, ComparisonTask, DocumentRef, DocvertError,
    DownloadStatus, EngineDescriptor, EngineOutcome, OutcomeStatus, OutputFormat, Result,
    TaskStatus, TaskSummary, ValidationError,
};

pub use batch::{BatchJobRunner, MAX_PARALLELISM};
pub use chunking::{chunk_text, Chunk, ChunkParams, ChunkStrategy, ChunkingReport};
pub use compare::{ComparisonRunner, ComparisonTaskStore};
pub use config::{Config, EngineCommandSpec, Limits, OutputCapture};
pub use download::DownloadCoordinator;
pub use engine::{Engine, ProbeReport};
pub use engines::{engines_from_config, CommandEngine};
pub use registry::EngineRegistry;
pub use telemetry::init_tracing;

/// docvert version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
