//! Bank App Review Ingestion Library
//!
//! Harvests customer reviews for bank mobile apps from the App Store review
//! feed and a Play Store review-query service, normalizes them into one
//! record schema, and persists per-bank and combined campaign datasets.
//!
//! # Usage
//!
//! ```rust,ignore
//! use review_ingest::{
//!     AppleFetcher, AppleParams, BankIngestor, BankRequest, CsvDatasetStore,
//!     HttpPageSource, PlayFetcher, PlayParams,
//! };
//! use play_client::PlayClient;
//!
//! let ingestor = BankIngestor::new(
//!     AppleFetcher::new(HttpPageSource::new()?),
//!     PlayFetcher::new(PlayClient::new("http://localhost:3000")),
//!     CsvDatasetStore::new("outputs"),
//! );
//!
//! let request = BankRequest::new(
//!     "Bank Dhofar",
//!     AppleParams::new("1091334463"),
//!     PlayParams::new("com.bankdhofar.mobile"),
//! );
//! let bank = ingestor.ingest(&request).await?;
//! println!("{} -> {}", bank.summary(), bank.location);
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Seams for transport, the Play collaborator, storage, and analysis
//! - [`types`] - Review records, requests, and configuration
//! - [`fetchers`] - App Store and Play Store fetchers
//! - [`pipeline`] - Bank ingestion, campaigns, and the single-bank pipeline run
//! - [`stores`] - Dataset sinks (CSV files, memory)
//! - [`analyzers`] - External-command analyzer
//! - [`testing`] - Mock implementations for testing

pub mod analyzers;
pub mod error;
pub mod fetchers;
pub mod pipeline;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{
    AnalysisError, FetchError, IngestError, PipelineError, Result, StorageError,
};
pub use traits::{
    analyzer::ReviewAnalyzer,
    page_source::PageSource,
    play_source::PlayReviewSource,
    sink::{DatasetKey, DatasetLocation, DatasetSink},
};
pub use types::{
    config::{AppleFeedConfig, CampaignConfig, IngestConfig, PageErrorPolicy},
    record::{BankDataset, CampaignDataset, Source, SourceRecord},
    request::{bank_slug, AppleParams, BankRequest, PlayParams},
};

// Re-export fetchers
pub use fetchers::{AppleFetcher, HttpPageSource, PageOutcome, PlayFetcher, RateLimitedPageSource};

// Re-export pipeline components
pub use pipeline::{
    BankIngest, BankIngestor, CampaignAggregator, CampaignRun, IngestedBank, PipelineRun,
    PipelineRunner, PipelineState, Stage,
};

// Re-export stores
pub use stores::{CsvDatasetStore, MemoryStore};

// Re-export analyzers
pub use analyzers::CommandAnalyzer;
