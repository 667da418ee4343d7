//! Play Store review fetcher.

use play_client::{ReviewItem, ReviewQuery};
use tracing::info;

use crate::error::FetchResult;
use crate::traits::play_source::PlayReviewSource;
use crate::types::record::{normalize_rating, Source, SourceRecord};

/// Fetches and normalizes Play Store reviews for one package.
///
/// Issues exactly one query per call with the score filter disabled. A
/// short answer is final; there is no pagination loop on top of the
/// collaborator.
pub struct PlayFetcher<G: PlayReviewSource> {
    source: G,
}

impl<G: PlayReviewSource> PlayFetcher<G> {
    pub fn new(source: G) -> Self {
        Self { source }
    }

    pub async fn fetch(
        &self,
        package_id: &str,
        lang: &str,
        country: &str,
        max_reviews: usize,
    ) -> FetchResult<Vec<SourceRecord>> {
        info!(package_id, lang, country, max_reviews, "Fetching Play Store reviews");

        let query = ReviewQuery::new(package_id, max_reviews)
            .with_lang(lang)
            .with_country(country);

        let items = self.source.reviews(&query).await?;
        let records: Vec<SourceRecord> = items
            .into_iter()
            .take(max_reviews)
            .map(normalize_item)
            .collect();

        info!(package_id, count = records.len(), "Collected Play Store reviews");
        Ok(records)
    }
}

/// Coerce one service item into the unified schema.
pub fn normalize_item(item: ReviewItem) -> SourceRecord {
    SourceRecord::new(Source::Google)
        .with_author(item.user_name)
        .with_text(item.content)
        .with_rating(item.score.and_then(normalize_rating))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockPlaySource;

    #[tokio::test]
    async fn test_items_are_normalized() {
        let mock = MockPlaySource::new()
            .with_item(Some("Hilal"), Some("Crashes on login"), Some(1))
            .with_item(None, None, None)
            .with_item(Some("Noor"), Some("ok"), Some(9));
        let fetcher = PlayFetcher::new(mock);

        let records = fetcher.fetch("com.example.bank", "en", "us", 10).await.unwrap();

        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.source == Source::Google && r.title.is_empty()));
        assert_eq!(records[0].author, "Hilal");
        assert_eq!(records[0].rating, Some(1));
        assert_eq!(records[1].author, "");
        assert_eq!(records[1].review_text, "");
        assert_eq!(records[1].rating, None);
        assert_eq!(records[2].rating, None);
    }

    #[tokio::test]
    async fn test_single_query_without_score_filter() {
        let mock = MockPlaySource::new().with_reviews(3);
        let fetcher = PlayFetcher::new(mock.clone());

        let records = fetcher.fetch("com.example.bank", "ar", "om", 50).await.unwrap();

        // Fewer than requested is accepted as final
        assert_eq!(records.len(), 3);
        let queries = mock.queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].package_id, "com.example.bank");
        assert_eq!(queries[0].lang, "ar");
        assert_eq!(queries[0].country, "om");
        assert_eq!(queries[0].count, 50);
        assert_eq!(queries[0].filter_score_with, None);
    }

    #[tokio::test]
    async fn test_over_delivery_is_truncated() {
        let mock = MockPlaySource::new().with_reviews(7).ignoring_count();
        let fetcher = PlayFetcher::new(mock);

        let records = fetcher.fetch("com.example.bank", "en", "us", 3).await.unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].author, "player0");
        assert_eq!(records[2].author, "player2");
    }

    #[tokio::test]
    async fn test_collaborator_failure_propagates() {
        let fetcher = PlayFetcher::new(MockPlaySource::new().failing(502));
        assert!(fetcher.fetch("com.example.bank", "en", "us", 10).await.is_err());
    }
}
