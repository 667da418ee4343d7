//! Persistence boundary for datasets.
//!
//! Fetchers and ingestors only build in-memory datasets. Naming,
//! timestamping, and writing happen behind a `DatasetSink` injected by the
//! caller, so ingestion can be tested without a filesystem.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::StorageResult;
use crate::types::record::SourceRecord;

/// Which dataset is being persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetKey {
    /// One bank's reviews, keyed by the human-provided bank name
    Bank(String),
    /// The combined dataset of a campaign
    Campaign,
}

/// Where a persisted dataset ended up (a path for file sinks, a handle otherwise).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetLocation(String);

impl DatasetLocation {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for DatasetLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PathBuf> for DatasetLocation {
    fn from(path: PathBuf) -> Self {
        Self(path.to_string_lossy().into_owned())
    }
}

impl From<&str> for DatasetLocation {
    fn from(location: &str) -> Self {
        Self(location.to_string())
    }
}

/// Durable storage for review datasets.
///
/// Writes are not retried; any error is fatal to the run that asked for it.
#[async_trait]
pub trait DatasetSink: Send + Sync {
    /// Persist `records` under a fresh location derived from `key`.
    ///
    /// An empty slice still produces a schema-complete dataset.
    async fn persist(&self, key: &DatasetKey, records: &[SourceRecord])
        -> StorageResult<DatasetLocation>;

    /// Get the sink name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
