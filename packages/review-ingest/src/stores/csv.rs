//! CSV dataset storage.
//!
//! Files are named `{bank_slug}_reviews_{YYYYmmdd_HHMMSS}.csv` for banks and
//! `combined_reviews_{YYYYmmdd_HHMMSS}.csv` for campaigns. Two writes for
//! the same key within one second land on the same file; the later one wins.

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{StorageError, StorageResult};
use crate::traits::sink::{DatasetKey, DatasetLocation, DatasetSink};
use crate::types::record::{parse_rating, Source, SourceRecord};
use crate::types::request::bank_slug;

/// Column order of every persisted dataset.
pub const COLUMNS: [&str; 6] = ["source", "author", "title", "review_text", "rating", "bank"];

/// Second-resolution timestamp used in file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

/// Dataset sink writing CSV files into one directory.
#[derive(Debug, Clone)]
pub struct CsvDatasetStore {
    output_dir: PathBuf,
    clock: fn() -> NaiveDateTime,
}

impl Default for CsvDatasetStore {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl CsvDatasetStore {
    /// Create a store writing into `output_dir` (created on first write).
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            clock: local_now,
        }
    }

    /// Replace the wall clock used for file names.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// File name for `key` created at `at`.
    pub fn file_name(key: &DatasetKey, at: NaiveDateTime) -> String {
        let stamp = at.format(TIMESTAMP_FORMAT);
        match key {
            DatasetKey::Bank(name) => format!("{}_reviews_{}.csv", bank_slug(name), stamp),
            DatasetKey::Campaign => format!("combined_reviews_{}.csv", stamp),
        }
    }

    /// Read a persisted dataset back into records.
    pub async fn load(path: impl AsRef<Path>) -> StorageResult<Vec<SourceRecord>> {
        let bytes = tokio::fs::read(path.as_ref()).await?;
        decode_csv(&bytes)
    }
}

#[async_trait]
impl DatasetSink for CsvDatasetStore {
    async fn persist(
        &self,
        key: &DatasetKey,
        records: &[SourceRecord],
    ) -> StorageResult<DatasetLocation> {
        let bytes = encode_csv(records)?;

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self
            .output_dir
            .join(Self::file_name(key, (self.clock)()));
        tokio::fs::write(&path, bytes).await?;

        info!(path = %path.display(), rows = records.len(), "Saved review dataset");
        Ok(DatasetLocation::from(path))
    }

    fn name(&self) -> &str {
        "csv"
    }
}

/// Serialize records with a header row, even when there are no records.
pub fn encode_csv(records: &[SourceRecord]) -> StorageResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS)?;

    for r in records {
        let rating = r.rating.map(|v| v.to_string()).unwrap_or_default();
        writer.write_record([
            r.source.as_str(),
            r.author.as_str(),
            r.title.as_str(),
            r.review_text.as_str(),
            rating.as_str(),
            r.bank.as_str(),
        ])?;
    }

    writer.into_inner().map_err(|e| StorageError::Io(e.into_error()))
}

/// Parse a dataset written by this crate or by a downstream tool.
///
/// Columns are found by name. Missing text columns and empty cells read
/// as empty strings; a missing or non-integer rating reads as `None`.
pub fn decode_csv(bytes: &[u8]) -> StorageResult<Vec<SourceRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.trim() == name);
    let source_col = column("source").ok_or_else(|| StorageError::InvalidRow {
        line: 1,
        reason: "missing `source` column".to_string(),
    })?;
    let author_col = column("author");
    let title_col = column("title");
    let text_col = column("review_text");
    let rating_col = column("rating");
    let bank_col = column("bank");

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .unwrap_or_default()
                .to_string()
        };

        let source = row
            .get(source_col)
            .unwrap_or_default()
            .parse::<Source>()
            .map_err(|reason| StorageError::InvalidRow { line, reason })?;

        records.push(SourceRecord {
            source,
            author: cell(author_col),
            title: cell(title_col),
            review_text: cell(text_col),
            rating: rating_col.and_then(|i| row.get(i)).and_then(parse_rating),
            bank: cell(bank_col),
        });
    }

    Ok(records)
}
