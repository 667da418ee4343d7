//! Ingestion pipelines.
//!
//! - `BankIngestor` - one bank, both stores, one dataset
//! - `CampaignAggregator` - many banks, one combined dataset
//! - `PipelineRunner` - the single-bank ParseInput → Ingest → Analyze → Done run

pub mod bank;
pub mod campaign;
pub mod runner;

pub use bank::{BankIngest, BankIngestor, IngestedBank};
pub use campaign::{CampaignAggregator, CampaignRun};
pub use runner::{PipelineRun, PipelineRunner, PipelineState, Stage, DEFAULT_BANK_NAME};
