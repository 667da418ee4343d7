//! Configuration types for fetching and aggregation.

use serde::{Deserialize, Serialize};

/// Base URL of the App Store customer-reviews feed.
pub const APPLE_FEED_BASE_URL: &str = "https://itunes.apple.com";

/// Entries the App Store feed serves on a full page.
pub const APPLE_FEED_PAGE_SIZE: usize = 50;

/// What a failed page request means for pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PageErrorPolicy {
    /// Stop paginating and keep what was collected (partial result).
    #[default]
    TreatAsExhausted,
    /// Surface the failure to the caller.
    Propagate,
}

/// Configuration for App Store feed pagination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppleFeedConfig {
    /// Feed host, overridable for tests and mirrors
    pub base_url: String,

    /// Nominal full-page size. A page with fewer raw entries ends pagination.
    ///
    /// Default: 50.
    pub page_size: usize,

    /// Handling of failed or malformed pages.
    ///
    /// Default: treat as end of feed.
    pub error_policy: PageErrorPolicy,
}

impl Default for AppleFeedConfig {
    fn default() -> Self {
        Self {
            base_url: APPLE_FEED_BASE_URL.to_string(),
            page_size: APPLE_FEED_PAGE_SIZE,
            error_policy: PageErrorPolicy::default(),
        }
    }
}

impl AppleFeedConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the full-page size (minimum 1).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_error_policy(mut self, policy: PageErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }
}

/// Configuration for single-bank ingestion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Fetch App Store and Play Store concurrently.
    ///
    /// Record order is Apple then Google either way. Default: false.
    pub parallel_sources: bool,
}

impl IngestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parallel_sources(mut self, parallel: bool) -> Self {
        self.parallel_sources = parallel;
        self
    }
}

/// Configuration for multi-bank campaigns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignConfig {
    /// Banks ingested at once. Results are merged in request order.
    ///
    /// Default: 1 (one bank after another).
    pub concurrency: usize,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self { concurrency: 1 }
    }
}

impl CampaignConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_config_defaults() {
        let config = AppleFeedConfig::default();
        assert_eq!(config.base_url, "https://itunes.apple.com");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.error_policy, PageErrorPolicy::TreatAsExhausted);
    }

    #[test]
    fn test_feed_config_builder() {
        let config = AppleFeedConfig::new()
            .with_base_url("http://mirror.local/")
            .with_page_size(20)
            .with_error_policy(PageErrorPolicy::Propagate);

        assert_eq!(config.base_url, "http://mirror.local");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.error_policy, PageErrorPolicy::Propagate);
    }

    #[test]
    fn test_page_size_floor() {
        assert_eq!(AppleFeedConfig::new().with_page_size(0).page_size, 1);
        assert_eq!(AppleFeedConfig::new().with_page_size(25).page_size, 25);
    }

    #[test]
    fn test_campaign_concurrency_floor() {
        assert_eq!(CampaignConfig::new().with_concurrency(0).concurrency, 1);
        assert_eq!(CampaignConfig::new().with_concurrency(4).concurrency, 4);
    }
}
