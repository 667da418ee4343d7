//! Single-bank ingestion - App Store + Play Store → one dataset.

use tracing::info;

use crate::error::Result;
use crate::fetchers::{AppleFetcher, PlayFetcher};
use crate::traits::{
    page_source::PageSource,
    play_source::PlayReviewSource,
    sink::{DatasetKey, DatasetLocation, DatasetSink},
};
use crate::types::{
    config::IngestConfig,
    record::{BankDataset, SourceRecord},
    request::BankRequest,
};

/// In-memory result of collecting one bank.
#[derive(Debug, Clone)]
pub struct BankIngest {
    pub dataset: BankDataset,

    /// Records that came from the App Store
    pub apple_count: usize,

    /// Records that came from the Play Store
    pub google_count: usize,
}

/// Result of ingesting and persisting one bank.
#[derive(Debug, Clone)]
pub struct IngestedBank {
    pub dataset: BankDataset,

    /// Where the sink put the dataset
    pub location: DatasetLocation,

    pub apple_count: usize,
    pub google_count: usize,
}

impl IngestedBank {
    /// Human-readable line reported by the pipeline.
    pub fn summary(&self) -> String {
        format!(
            "Scraped {} reviews. Apple: {}, Google: {}",
            self.dataset.len(),
            self.apple_count,
            self.google_count
        )
    }
}

/// Builds one bank's dataset from both stores.
///
/// Apple records always precede Google records, whether the two sources
/// are fetched one after another or concurrently.
pub struct BankIngestor<P, G, S>
where
    P: PageSource,
    G: PlayReviewSource,
    S: DatasetSink,
{
    apple: AppleFetcher<P>,
    play: PlayFetcher<G>,
    sink: S,
    config: IngestConfig,
}

impl<P, G, S> BankIngestor<P, G, S>
where
    P: PageSource,
    G: PlayReviewSource,
    S: DatasetSink,
{
    pub fn new(apple: AppleFetcher<P>, play: PlayFetcher<G>, sink: S) -> Self {
        Self {
            apple,
            play,
            sink,
            config: IngestConfig::default(),
        }
    }

    pub fn with_config(mut self, config: IngestConfig) -> Self {
        self.config = config;
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Fetch both sources and stamp the bank name, without persisting.
    pub async fn collect(&self, request: &BankRequest) -> Result<BankIngest> {
        info!(
            bank = %request.bank_name,
            max_reviews = request.max_reviews,
            parallel = self.config.parallel_sources,
            "Collecting bank reviews"
        );

        let apple_fut = self.apple.fetch(
            &request.apple.app_id,
            &request.apple.country,
            request.max_reviews,
        );
        let play_fut = self.play.fetch(
            &request.play.package_id,
            &request.play.lang,
            &request.play.country,
            request.max_reviews,
        );

        let (apple, google): (Vec<SourceRecord>, Vec<SourceRecord>) =
            if self.config.parallel_sources {
                tokio::try_join!(apple_fut, play_fut)?
            } else {
                let apple = apple_fut.await?;
                (apple, play_fut.await?)
            };

        let apple_count = apple.len();
        let google_count = google.len();

        let mut records = apple;
        records.extend(google);

        Ok(BankIngest {
            dataset: BankDataset::new(request.bank_name.clone(), records),
            apple_count,
            google_count,
        })
    }

    /// Collect one bank and persist its dataset through the sink.
    ///
    /// A sink failure is returned as-is; nothing is retried.
    pub async fn ingest(&self, request: &BankRequest) -> Result<IngestedBank> {
        let BankIngest {
            dataset,
            apple_count,
            google_count,
        } = self.collect(request).await?;

        let location = self
            .sink
            .persist(&DatasetKey::Bank(request.bank_name.clone()), &dataset.records)
            .await?;

        info!(
            bank = %request.bank_name,
            apple = apple_count,
            google = google_count,
            location = %location,
            "Bank dataset saved"
        );

        Ok(IngestedBank {
            dataset,
            location,
            apple_count,
            google_count,
        })
    }
}
