//! Integration tests for bank ingestion and campaigns.
//!
//! These run the full fetch → normalize → stamp → persist path against
//! mock transports and a real CSV store in a temp directory.

use review_ingest::{
    testing::{apple_feed_xml, FeedEntry, MockPageSource, MockPlaySource},
    AppleFeedConfig, AppleFetcher, AppleParams, BankIngestor, BankRequest, CampaignAggregator,
    CsvDatasetStore, IngestError, PlayFetcher, PlayParams, Source,
};

const BASE: &str = "http://feed.test";

fn feed_url(app_id: &str, page: u32) -> String {
    format!(
        "{}/us/rss/customerreviews/page={}/id={}/sortby=mostrecent/xml",
        BASE, page, app_id
    )
}

/// Helper to build an ingestor writing CSV files into `dir`.
fn csv_ingestor(
    pages: MockPageSource,
    play: MockPlaySource,
    dir: &std::path::Path,
) -> BankIngestor<MockPageSource, MockPlaySource, CsvDatasetStore> {
    BankIngestor::new(
        AppleFetcher::with_config(pages, AppleFeedConfig::new().with_base_url(BASE)),
        PlayFetcher::new(play),
        CsvDatasetStore::new(dir),
    )
}

#[tokio::test]
async fn test_end_to_end_single_bank() {
    let dir = tempfile::tempdir().unwrap();
    let pages = MockPageSource::new()
        .with_body(
            feed_url("555", 1),
            apple_feed_xml(
                &[
                    FeedEntry::review("Amal", "Fast transfers", 5),
                    FeedEntry::review("Yousef", "Keeps logging me out", 2),
                ],
                true,
            ),
        )
        .with_body(feed_url("555", 2), apple_feed_xml(&[], false));
    let play = MockPlaySource::new()
        .with_item(Some("Salim"), Some("Great app"), Some(5))
        .with_item(Some("Huda"), None, Some(3));

    let request = BankRequest::new(
        "Test Bank",
        AppleParams::new("555"),
        PlayParams::new("com.testbank.mobile"),
    );
    let result = csv_ingestor(pages, play, dir.path())
        .ingest(&request)
        .await
        .unwrap();

    assert_eq!(result.dataset.len(), 4);
    assert_eq!(result.dataset.count_source(Source::Apple), 2);
    assert_eq!(result.dataset.count_source(Source::Google), 2);
    assert!(result.dataset.records.iter().all(|r| r.bank == "Test Bank"));

    let file_name = result
        .location
        .as_path()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();
    assert!(file_name.starts_with("test_bank_reviews_"));
    assert!(file_name.ends_with(".csv"));

    let loaded = CsvDatasetStore::load(result.location.as_path()).await.unwrap();
    assert_eq!(loaded, result.dataset.records);
    assert_eq!(loaded[3].review_text, "");
}

#[tokio::test]
async fn test_header_only_file_for_empty_bank() {
    let dir = tempfile::tempdir().unwrap();
    let pages = MockPageSource::new().with_body(feed_url("1", 1), apple_feed_xml(&[], true));

    let request = BankRequest::new("Quiet Bank", AppleParams::new("1"), PlayParams::new("com.q"));
    let result = csv_ingestor(pages, MockPlaySource::new(), dir.path())
        .ingest(&request)
        .await
        .unwrap();

    let contents = std::fs::read_to_string(result.location.as_path()).unwrap();
    assert_eq!(contents, "source,author,title,review_text,rating,bank\n");
}

#[tokio::test]
async fn test_campaign_writes_combined_file_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let pages = MockPageSource::new()
        .with_body(
            feed_url("1", 1),
            apple_feed_xml(&[FeedEntry::review("a", "one", 4)], true),
        )
        .with_body(
            feed_url("2", 1),
            apple_feed_xml(&[FeedEntry::review("b", "two", 1)], true),
        );
    let aggregator = CampaignAggregator::new(csv_ingestor(
        pages,
        MockPlaySource::new().with_reviews(2),
        dir.path(),
    ));

    let run = aggregator
        .aggregate(&[
            BankRequest::new("Bank One", AppleParams::new("1"), PlayParams::new("com.one")),
            BankRequest::new("Bank Two", AppleParams::new("2"), PlayParams::new("com.two")),
        ])
        .await
        .unwrap();

    assert_eq!(
        run.dataset.len(),
        run.banks.iter().map(|b| b.dataset.len()).sum::<usize>()
    );
    let banks: Vec<&str> = run.dataset.records.iter().map(|r| r.bank.as_str()).collect();
    assert_eq!(
        banks,
        vec!["Bank One", "Bank One", "Bank One", "Bank Two", "Bank Two", "Bank Two"]
    );

    let name = run.location.as_path().file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("combined_reviews_"));
    let loaded = CsvDatasetStore::load(run.location.as_path()).await.unwrap();
    assert_eq!(loaded, run.dataset.records);
}

#[tokio::test]
async fn test_failed_bank_leaves_no_combined_file() {
    let dir = tempfile::tempdir().unwrap();
    let pages = MockPageSource::new().with_body(
        feed_url("1", 1),
        apple_feed_xml(&[FeedEntry::review("a", "one", 4)], true),
    );
    let aggregator = CampaignAggregator::new(BankIngestor::new(
        AppleFetcher::with_config(pages, AppleFeedConfig::new().with_base_url(BASE)),
        PlayFetcher::new(MockPlaySource::new().failing(500)),
        CsvDatasetStore::new(dir.path()),
    ));

    let err = aggregator
        .aggregate(&[BankRequest::new(
            "Bank One",
            AppleParams::new("1"),
            PlayParams::new("com.one"),
        )])
        .await
        .unwrap_err();

    assert!(matches!(err, IngestError::Fetch(_)));
    let combined = std::fs::read_dir(dir.path())
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .filter(|e| e.file_name().to_string_lossy().starts_with("combined_"))
                .count()
        })
        .unwrap_or(0);
    assert_eq!(combined, 0);
}
