//! Multi-bank campaigns - per-bank datasets → one combined dataset.

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::info;

use crate::error::{IngestError, Result};
use crate::pipeline::bank::{BankIngestor, IngestedBank};
use crate::traits::{
    page_source::PageSource,
    play_source::PlayReviewSource,
    sink::{DatasetKey, DatasetLocation, DatasetSink},
};
use crate::types::{
    config::CampaignConfig,
    record::{BankDataset, CampaignDataset},
    request::BankRequest,
};

/// Result of a campaign run.
#[derive(Debug, Clone)]
pub struct CampaignRun {
    /// Every bank's rows, in request order
    pub dataset: CampaignDataset,

    /// Where the combined dataset was persisted
    pub location: DatasetLocation,

    /// Per-bank results, in request order
    pub banks: Vec<IngestedBank>,
}

/// Runs a [`BankIngestor`] per request and persists the concatenation.
///
/// The first failing bank aborts the campaign: later requests are not
/// started and no combined dataset is written. Per-bank datasets already
/// persisted stay where they are.
pub struct CampaignAggregator<P, G, S>
where
    P: PageSource,
    G: PlayReviewSource,
    S: DatasetSink,
{
    ingestor: BankIngestor<P, G, S>,
    config: CampaignConfig,
}

impl<P, G, S> CampaignAggregator<P, G, S>
where
    P: PageSource,
    G: PlayReviewSource,
    S: DatasetSink,
{
    pub fn new(ingestor: BankIngestor<P, G, S>) -> Self {
        Self {
            ingestor,
            config: CampaignConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CampaignConfig) -> Self {
        self.config = config;
        self
    }

    pub fn ingestor(&self) -> &BankIngestor<P, G, S> {
        &self.ingestor
    }

    /// Ingest every bank in order, then persist the combined dataset.
    pub async fn aggregate(&self, requests: &[BankRequest]) -> Result<CampaignRun> {
        if requests.is_empty() {
            return Err(IngestError::InvalidRequest {
                reason: "campaign needs at least one bank".to_string(),
            });
        }

        let concurrency = self.config.concurrency.max(1);
        info!(banks = requests.len(), concurrency, "Starting campaign");

        // `buffered` yields in input order regardless of completion order
        let banks: Vec<IngestedBank> = stream::iter(requests)
            .map(|request| self.ingestor.ingest(request))
            .buffered(concurrency)
            .try_collect()
            .await?;

        let (dataset, location) = self
            .combine(banks.iter().map(|b| b.dataset.clone()).collect())
            .await?;

        Ok(CampaignRun {
            dataset,
            location,
            banks,
        })
    }

    /// Concatenate already-collected bank datasets and persist the result.
    pub async fn combine(
        &self,
        banks: Vec<BankDataset>,
    ) -> Result<(CampaignDataset, DatasetLocation)> {
        let dataset: CampaignDataset = banks.into_iter().collect();

        let location = self
            .ingestor
            .sink()
            .persist(&DatasetKey::Campaign, &dataset.records)
            .await?;

        info!(
            banks = dataset.banks.len(),
            rows = dataset.len(),
            location = %location,
            "Combined dataset saved"
        );
        Ok((dataset, location))
    }
}
