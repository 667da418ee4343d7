//! Page source trait - the HTTP seam under the App Store fetcher.

use async_trait::async_trait;

use crate::error::FetchResult;

/// Fetches the raw body of one feed page.
///
/// Implementations:
/// - `HttpPageSource` - reqwest-backed
/// - `RateLimitedPageSource` - paces any other source
/// - `testing::MockPageSource` - canned pages for tests
///
/// A non-success status must come back as `FetchError::Status`; the
/// fetcher decides whether that ends pagination or fails the fetch.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the body at `url`.
    async fn fetch_page(&self, url: &str) -> FetchResult<String>;

    /// Get the source name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

#[async_trait]
impl<P: PageSource + ?Sized> PageSource for Box<P> {
    async fn fetch_page(&self, url: &str) -> FetchResult<String> {
        (**self).fetch_page(url).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
