//! HTTP-based page source.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};
use crate::traits::page_source::PageSource;

/// Default timeout for a single feed request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Page source that GETs feed pages with reqwest.
///
/// # Example
///
/// ```rust,ignore
/// use review_ingest::fetchers::{AppleFetcher, HttpPageSource};
///
/// let fetcher = AppleFetcher::new(HttpPageSource::new()?);
/// let reviews = fetcher.fetch("1234567890", "om", 100).await?;
/// ```
pub struct HttpPageSource {
    client: reqwest::Client,
    user_agent: String,
}

impl HttpPageSource {
    /// Create a page source with the default timeout.
    pub fn new() -> FetchResult<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a page source whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Http(Box::new(e)))?;
        Ok(Self::with_client(client))
    }

    /// Use a preconfigured HTTP client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            user_agent: "ReviewIngest/1.0".to_string(),
        }
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, url: &str) -> FetchResult<String> {
        debug!(url = %url, "HTTP fetch starting");
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "HTTP request failed");
                FetchError::Http(Box::new(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connection_refused_is_http_error() {
        let source = HttpPageSource::with_timeout(Duration::from_millis(200)).unwrap();
        let err = source.fetch_page("http://127.0.0.1:9/feed").await.unwrap_err();

        assert!(matches!(err, FetchError::Http(_)));
    }

    #[test]
    fn test_user_agent_override() {
        let source = HttpPageSource::new().unwrap().with_user_agent("BankReviews/2.0");
        assert_eq!(source.user_agent, "BankReviews/2.0");
        assert_eq!(source.name(), "http");
    }
}
