//! Play Store review source trait.

use async_trait::async_trait;
use play_client::{PlayClient, ReviewItem, ReviewQuery};

use crate::error::FetchResult;

/// The external review-query collaborator for the Play Store.
///
/// One call per bank; the implementation decides how to reach the store.
/// Returning fewer items than `query.count` is a complete answer.
#[async_trait]
pub trait PlayReviewSource: Send + Sync {
    async fn reviews(&self, query: &ReviewQuery) -> FetchResult<Vec<ReviewItem>>;

    /// Get the source name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

#[async_trait]
impl PlayReviewSource for PlayClient {
    async fn reviews(&self, query: &ReviewQuery) -> FetchResult<Vec<ReviewItem>> {
        Ok(PlayClient::reviews(self, query).await?)
    }

    fn name(&self) -> &str {
        "play-client"
    }
}
