//! Rate-limited page source wrapper.
//!
//! Wraps any PageSource with client-side pacing using the governor crate.
//! Pacing delays requests; it never retries them.

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use std::num::NonZeroU32;
use std::sync::Arc;

use crate::error::FetchResult;
use crate::traits::page_source::PageSource;

type DefaultRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// A page source wrapper that enforces a request rate.
pub struct RateLimitedPageSource<P: PageSource> {
    inner: P,
    limiter: Arc<DefaultRateLimiter>,
}

impl<P: PageSource> RateLimitedPageSource<P> {
    /// Allow at most `requests_per_second` page requests (minimum 1), no bursts.
    pub fn new(source: P, requests_per_second: u32) -> Self {
        let rate = NonZeroU32::new(requests_per_second).unwrap_or(nonzero!(1u32));
        Self::with_quota(source, Quota::per_second(rate).allow_burst(nonzero!(1u32)))
    }

    /// Create with a custom quota.
    pub fn with_quota(source: P, quota: Quota) -> Self {
        Self {
            inner: source,
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    /// Get a reference to the inner source.
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

#[async_trait]
impl<P: PageSource> PageSource for RateLimitedPageSource<P> {
    async fn fetch_page(&self, url: &str) -> FetchResult<String> {
        self.limiter.until_ready().await;
        self.inner.fetch_page(url).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockPageSource;
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn test_rate_limited_paces_requests() {
        let mock = MockPageSource::new()
            .with_body("http://feed/1", "<feed/>")
            .with_body("http://feed/2", "<feed/>")
            .with_body("http://feed/3", "<feed/>");
        let source = RateLimitedPageSource::new(mock.clone(), 10);

        let start = Instant::now();
        for i in 1..=3 {
            source.fetch_page(&format!("http://feed/{}", i)).await.unwrap();
        }

        // First request is immediate, the other two wait ~100ms each
        assert!(start.elapsed() >= Duration::from_millis(150));
        assert_eq!(mock.requested_urls().len(), 3);
    }

    #[tokio::test]
    async fn test_zero_rate_falls_back_to_one_per_second() {
        let mock = MockPageSource::new().with_body("http://feed/1", "<feed/>");
        let source = RateLimitedPageSource::new(mock, 0);

        let body = source.fetch_page("http://feed/1").await.unwrap();
        assert_eq!(body, "<feed/>");
        assert_eq!(source.name(), "mock");
        assert_eq!(source.inner().requested_urls(), vec!["http://feed/1"]);
    }
}
