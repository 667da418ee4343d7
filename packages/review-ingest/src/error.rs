//! Typed errors for the ingestion library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can tell a
//! tolerated fetch failure apart from a fatal persistence failure.

use thiserror::Error;

use crate::pipeline::runner::Stage;

/// Errors raised while ingesting one bank or a whole campaign.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A source fetch failed and the error policy asked for it to propagate
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Writing a dataset failed; always fatal
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The request could not be executed as given
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },
}

/// Errors from a single source request.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Feed page could not be parsed as XML
    #[error("malformed feed page {page}: {reason}")]
    MalformedFeed { page: u32, reason: String },

    /// Play Store review-query service failed
    #[error("review query failed: {0}")]
    Play(#[from] play_client::PlayError),
}

/// Errors at the persistence boundary.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A persisted row could not be turned back into a record
    #[error("invalid row {line}: {reason}")]
    InvalidRow { line: u64, reason: String },
}

/// Errors raised by the analysis collaborator.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The analyzer process could not be started
    #[error("failed to launch analyzer `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The analyzer exited unsuccessfully
    #[error("analyzer exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    /// The analyzer finished without reporting an output dataset
    #[error("analyzer produced no output location")]
    NoOutput,

    /// Any other analyzer failure
    #[error("analysis failed: {0}")]
    Other(String),
}

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A stage needed a state field that no earlier stage or input provided
    #[error("stage {stage} requires `{field}`")]
    MissingField { stage: Stage, field: &'static str },

    #[error("ingest stage failed: {0}")]
    Ingest(#[from] IngestError),

    #[error("analyze stage failed: {0}")]
    Analysis(#[from] AnalysisError),
}

/// Result type alias for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Result type alias for source requests.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for persistence operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Result type alias for analysis operations.
pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;

/// Result type alias for pipeline runs.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
