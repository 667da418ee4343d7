use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub output_dir: PathBuf,
    pub play_reviews_url: String,
    pub http_timeout: Duration,
    pub analyzer_cmd: Option<String>,
    pub dashboard_cmd: Option<String>,
    pub apple_page_size: usize,
    pub apple_requests_per_second: Option<u32>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            output_dir: non_empty("REVIEWS_OUTPUT_DIR")
                .unwrap_or_else(|| "outputs".to_string())
                .into(),
            play_reviews_url: non_empty("PLAY_REVIEWS_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            http_timeout: Duration::from_secs(
                non_empty("REVIEWS_HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|| "30".to_string())
                    .parse()
                    .context("REVIEWS_HTTP_TIMEOUT_SECS must be a number of seconds")?,
            ),
            analyzer_cmd: non_empty("REVIEWS_ANALYZER_CMD"),
            dashboard_cmd: non_empty("REVIEWS_DASHBOARD_CMD"),
            apple_page_size: non_empty("APPLE_PAGE_SIZE")
                .unwrap_or_else(|| "50".to_string())
                .parse::<NonZeroUsize>()
                .context("APPLE_PAGE_SIZE must be a positive number")?
                .get(),
            apple_requests_per_second: non_empty("APPLE_REQUESTS_PER_SECOND")
                .map(|v| v.parse::<u32>())
                .transpose()
                .context("APPLE_REQUESTS_PER_SECOND must be a valid number")?,
        })
    }
}
