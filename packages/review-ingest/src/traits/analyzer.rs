//! Analysis collaborator trait.

use async_trait::async_trait;

use crate::error::AnalysisResult;
use crate::traits::sink::DatasetLocation;

/// Downstream scoring of a persisted dataset.
///
/// Given the location of a review dataset, an analyzer writes a new dataset
/// that adds at least `sentiment` (float), `top_keyword` (string) and
/// `cluster` (integer) columns, and returns where it put it. Analyzers must
/// treat a missing or empty `review_text` as the empty string.
#[async_trait]
pub trait ReviewAnalyzer: Send + Sync {
    async fn analyze(&self, input: &DatasetLocation) -> AnalysisResult<DatasetLocation>;

    /// Get the analyzer name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
