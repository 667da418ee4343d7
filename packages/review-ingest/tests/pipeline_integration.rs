//! Integration tests for the single-bank pipeline run.

use review_ingest::{
    stores::MemoryStore,
    testing::{apple_feed_xml, FeedEntry, MockAnalyzer, MockPageSource, MockPlaySource},
    AppleFeedConfig, AppleFetcher, BankIngestor, IngestError, PipelineError, PipelineRunner,
    PipelineState, PlayFetcher, Stage,
};

const BASE: &str = "http://feed.test";

fn feed_url(country: &str, page: u32) -> String {
    format!(
        "{}/{}/rss/customerreviews/page={}/id=777/sortby=mostrecent/xml",
        BASE, country, page
    )
}

fn runner(
    pages: MockPageSource,
    play: MockPlaySource,
    sink: MemoryStore,
    analyzer: MockAnalyzer,
) -> PipelineRunner<MockPageSource, MockPlaySource, MemoryStore, MockAnalyzer> {
    PipelineRunner::new(
        BankIngestor::new(
            AppleFetcher::with_config(pages, AppleFeedConfig::new().with_base_url(BASE)),
            PlayFetcher::new(play),
            sink,
        ),
        analyzer,
    )
}

fn om_feed() -> MockPageSource {
    MockPageSource::new().with_body(
        feed_url("om", 1),
        apple_feed_xml(&[FeedEntry::review("Zaid", "Smooth", 5)], true),
    )
}

#[tokio::test]
async fn test_run_visits_every_stage() {
    let sink = MemoryStore::new();
    let analyzer = MockAnalyzer::new();
    let play = MockPlaySource::new().with_reviews(2);

    let mut state = PipelineState::new()
        .with_apps("777", "com.example.bank")
        .with_bank_name("Bank Nizwa")
        .with_num_reviews(10);
    state.appstore_country = Some("om".to_string());
    state.user_input = Some("Bank Nizwa 777 com.example.bank".to_string());

    let run = runner(om_feed(), play.clone(), sink.clone(), analyzer.clone())
        .run(state)
        .await
        .unwrap();

    assert_eq!(
        run.visited,
        vec![Stage::ParseInput, Stage::Ingest, Stage::Analyze, Stage::Done]
    );
    assert_eq!(
        run.state.summary.as_deref(),
        Some("Scraped 3 reviews. Apple: 1, Google: 2")
    );

    let review_file = run.state.review_file.clone().unwrap();
    assert_eq!(review_file.as_str(), "memory://bank/bank_nizwa/0");
    assert_eq!(sink.get(&review_file).unwrap().len(), 3);
    assert_eq!(analyzer.calls(), vec![review_file.clone()]);
    assert_eq!(
        run.state.ai_ml_output_file.unwrap().as_str(),
        "memory://bank/bank_nizwa/0.analyzed.csv"
    );

    // Defaults filled in by ParseInput reach the collaborators
    let queries = play.queries();
    assert_eq!(queries[0].lang, "en");
    assert_eq!(queries[0].country, "us");
    assert_eq!(queries[0].count, 10);
    assert_eq!(
        run.state.user_input.as_deref(),
        Some("Bank Nizwa 777 com.example.bank")
    );
}

#[tokio::test]
async fn test_missing_identifier_aborts_before_fetching() {
    let pages = om_feed();
    let mut state = PipelineState::new();
    state.appstore_id = Some("777".to_string());

    let err = runner(pages.clone(), MockPlaySource::new(), MemoryStore::new(), MockAnalyzer::new())
        .run(state)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::MissingField {
            stage: Stage::Ingest,
            field: "playstore_package"
        }
    ));
    assert!(pages.requested_urls().is_empty());
}

#[tokio::test]
async fn test_analyze_failure_keeps_ingested_dataset() {
    let sink = MemoryStore::new();
    let state = PipelineState::new().with_apps("777", "com.example.bank");

    let err = runner(
        MockPageSource::new(),
        MockPlaySource::new().with_reviews(1),
        sink.clone(),
        MockAnalyzer::failing(),
    )
    .run(state)
    .await
    .unwrap_err();

    assert!(matches!(err, PipelineError::Analysis(_)));
    assert_eq!(sink.dataset_count(), 1);
}

#[tokio::test]
async fn test_storage_failure_aborts_run() {
    let analyzer = MockAnalyzer::new();
    let state = PipelineState::new().with_apps("777", "com.example.bank");

    let err = runner(
        om_feed(),
        MockPlaySource::new(),
        MemoryStore::failing(),
        analyzer.clone(),
    )
    .run(state)
    .await
    .unwrap_err();

    assert!(matches!(err, PipelineError::Ingest(IngestError::Storage(_))));
    assert!(analyzer.calls().is_empty());
}
