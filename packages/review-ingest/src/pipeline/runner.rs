//! Single-bank pipeline: ParseInput → Ingest → Analyze → Done.
//!
//! Stages are strictly linear. Each stage takes the whole state and hands
//! it back with fields added or overwritten; any stage error ends the run.
//! Nothing is rolled back, so a dataset written by Ingest stays when
//! Analyze fails.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

use crate::error::{PipelineError, PipelineResult};
use crate::pipeline::bank::BankIngestor;
use crate::traits::{
    analyzer::ReviewAnalyzer, page_source::PageSource, play_source::PlayReviewSource,
    sink::{DatasetLocation, DatasetSink},
};
use crate::types::request::{
    AppleParams, BankRequest, PlayParams, DEFAULT_COUNTRY, DEFAULT_LANG, DEFAULT_MAX_REVIEWS,
};

/// Bank name used when the input does not carry one.
pub const DEFAULT_BANK_NAME: &str = "bank";

/// Pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    ParseInput,
    Ingest,
    Analyze,
    Done,
}

impl Stage {
    /// The stage that always follows this one, `None` for the terminal stage.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::ParseInput => Some(Stage::Ingest),
            Stage::Ingest => Some(Stage::Analyze),
            Stage::Analyze => Some(Stage::Done),
            Stage::Done => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::ParseInput => "parse_input",
            Stage::Ingest => "ingest",
            Stage::Analyze => "analyze",
            Stage::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State threaded through one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineState {
    /// Raw operator input, kept for reference
    pub user_input: Option<String>,
    pub bank_name: Option<String>,
    pub appstore_id: Option<String>,
    pub playstore_package: Option<String>,
    pub appstore_country: Option<String>,
    pub playstore_country: Option<String>,
    pub playstore_lang: Option<String>,
    /// Reviews requested per source
    pub num_reviews: Option<usize>,
    /// Written by Ingest
    pub review_file: Option<DatasetLocation>,
    /// Written by Analyze
    pub ai_ml_output_file: Option<DatasetLocation>,
    /// Written by Ingest
    pub summary: Option<String>,
}

impl PipelineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_apps(
        mut self,
        appstore_id: impl Into<String>,
        playstore_package: impl Into<String>,
    ) -> Self {
        self.appstore_id = Some(appstore_id.into());
        self.playstore_package = Some(playstore_package.into());
        self
    }

    pub fn with_bank_name(mut self, bank_name: impl Into<String>) -> Self {
        self.bank_name = Some(bank_name.into());
        self
    }

    pub fn with_num_reviews(mut self, num_reviews: usize) -> Self {
        self.num_reviews = Some(num_reviews);
        self
    }

    /// Fill absent locale, count, and bank fields with their defaults.
    ///
    /// Present values are never touched.
    fn apply_defaults(&mut self) {
        self.bank_name
            .get_or_insert_with(|| DEFAULT_BANK_NAME.to_string());
        self.appstore_country
            .get_or_insert_with(|| DEFAULT_COUNTRY.to_string());
        self.playstore_country
            .get_or_insert_with(|| DEFAULT_COUNTRY.to_string());
        self.playstore_lang
            .get_or_insert_with(|| DEFAULT_LANG.to_string());
        self.num_reviews.get_or_insert(DEFAULT_MAX_REVIEWS);
    }

    /// Build the bank request the Ingest stage runs.
    fn bank_request(&self) -> PipelineResult<BankRequest> {
        let missing = |field| PipelineError::MissingField {
            stage: Stage::Ingest,
            field,
        };
        let app_id = self.appstore_id.as_deref().ok_or_else(|| missing("appstore_id"))?;
        let package = self
            .playstore_package
            .as_deref()
            .ok_or_else(|| missing("playstore_package"))?;

        let apple = AppleParams::new(app_id)
            .with_country(self.appstore_country.as_deref().unwrap_or(DEFAULT_COUNTRY));
        let play = PlayParams::new(package)
            .with_lang(self.playstore_lang.as_deref().unwrap_or(DEFAULT_LANG))
            .with_country(self.playstore_country.as_deref().unwrap_or(DEFAULT_COUNTRY));

        Ok(BankRequest::new(
            self.bank_name.as_deref().unwrap_or(DEFAULT_BANK_NAME),
            apple,
            play,
        )
        .with_max_reviews(self.num_reviews.unwrap_or(DEFAULT_MAX_REVIEWS)))
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub state: PipelineState,
    /// Stages in the order they ran
    pub visited: Vec<Stage>,
}

/// Drives a [`PipelineState`] through every stage once.
pub struct PipelineRunner<P, G, S, A>
where
    P: PageSource,
    G: PlayReviewSource,
    S: DatasetSink,
    A: ReviewAnalyzer,
{
    ingestor: BankIngestor<P, G, S>,
    analyzer: A,
}

impl<P, G, S, A> PipelineRunner<P, G, S, A>
where
    P: PageSource,
    G: PlayReviewSource,
    S: DatasetSink,
    A: ReviewAnalyzer,
{
    pub fn new(ingestor: BankIngestor<P, G, S>, analyzer: A) -> Self {
        Self { ingestor, analyzer }
    }

    /// Run from ParseInput to Done.
    pub async fn run(&self, state: PipelineState) -> PipelineResult<PipelineRun> {
        let mut state = state;
        let mut visited = Vec::new();
        let mut stage = Stage::ParseInput;

        loop {
            visited.push(stage);
            state = match self.run_stage(stage, state).await {
                Ok(state) => state,
                Err(e) => {
                    warn!(stage = %stage, error = %e, "Pipeline stage failed");
                    return Err(e);
                }
            };

            match stage.next() {
                Some(next) => {
                    info!(from = %stage, to = %next, "Pipeline transition");
                    stage = next;
                }
                None => break,
            }
        }

        Ok(PipelineRun { state, visited })
    }

    async fn run_stage(&self, stage: Stage, state: PipelineState) -> PipelineResult<PipelineState> {
        match stage {
            Stage::ParseInput => Ok(parse_input(state)),
            Stage::Ingest => self.ingest(state).await,
            Stage::Analyze => self.analyze(state).await,
            Stage::Done => Ok(state),
        }
    }

    async fn ingest(&self, mut state: PipelineState) -> PipelineResult<PipelineState> {
        let request = state.bank_request()?;
        let ingested = self.ingestor.ingest(&request).await?;

        state.summary = Some(ingested.summary());
        state.review_file = Some(ingested.location);
        Ok(state)
    }

    async fn analyze(&self, mut state: PipelineState) -> PipelineResult<PipelineState> {
        let input = state
            .review_file
            .as_ref()
            .ok_or(PipelineError::MissingField {
                stage: Stage::Analyze,
                field: "review_file",
            })?;

        info!(analyzer = self.analyzer.name(), input = %input, "Analyzing reviews");
        let output = self.analyzer.analyze(input).await?;

        state.ai_ml_output_file = Some(output);
        Ok(state)
    }
}

fn parse_input(mut state: PipelineState) -> PipelineState {
    state.apply_defaults();
    state
}
