//! Domain-level error taxonomy for docvert.

/// Errors produced by caller-input validation.
///
/// These are surfaced to the caller synchronously and never retried.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("at least one engine must be selected")]
    EmptyEngineSelection,

    #[error("unknown engine: {name}")]
    UnknownEngine { name: String },

    #[error("engine {name} is not available: {reason}")]
    UnavailableEngine { name: String, reason: String },

    #[error("parallelism must be between 1 and {max}, got {requested}")]
    ParallelismOutOfRange { requested: usize, max: usize },

    #[error("chunk size must be at least 1, got {requested}")]
    InvalidChunkSize { requested: usize },

    #[error("chunk overlap ({overlap}) must be smaller than chunk size ({size})")]
    ChunkOverlapTooLarge { overlap: usize, size: usize },
}

/// docvert domain errors.
///
/// Engine-level failures (probe, conversion, download) are never raised
/// through this type; they are captured as data on descriptors, outcomes
/// and report records so one engine can never take down another.
#[derive(Debug, thiserror::Error)]
pub enum DocvertError {
    #[error("engine not found: {0}")]
    EngineNotFound(String),

    #[error("comparison task not found: {0}")]
    TaskNotFound(uuid::Uuid),

    #[error("engine {0} does not require a model download")]
    DownloadNotApplicable(String),

    #[error("a download for engine {0} is already in progress")]
    DownloadInProgress(String),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for docvert domain operations.
pub type Result<T> = std::result::Result<T, DocvertError>;
