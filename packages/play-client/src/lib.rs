//! Pure REST client for a Play Store review-query service.
//!
//! The service wraps the Play Store's internal review endpoint and answers
//! `GET /reviews?id=..&lang=..&country=..&count=..` with a JSON list of
//! reviews. This crate only builds the request and decodes the response;
//! it never paginates or retries.
//!
//! # Example
//!
//! ```rust,ignore
//! use play_client::{PlayClient, ReviewQuery};
//!
//! let client = PlayClient::new("http://localhost:3000");
//! let query = ReviewQuery::new("com.example.bank", 100).with_country("om");
//!
//! for review in client.reviews(&query).await? {
//!     println!("{}", review.content.as_deref().unwrap_or("(no text)"));
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{PlayError, Result};
pub use types::{ReviewItem, ReviewQuery, ReviewsResponse};

use std::time::Duration;

pub struct PlayClient {
    client: reqwest::Client,
    base_url: String,
}

impl PlayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build a client whose requests give up after `timeout`.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::new(base_url).with_http_client(client))
    }

    /// Use a preconfigured HTTP client.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint for review queries.
    pub fn reviews_url(&self) -> String {
        format!("{}/reviews", self.base_url)
    }

    /// Fetch up to `query.count` reviews in a single request.
    pub async fn reviews(&self, query: &ReviewQuery) -> Result<Vec<ReviewItem>> {
        tracing::info!(
            package_id = %query.package_id,
            lang = %query.lang,
            country = %query.country,
            count = query.count,
            "Querying Play Store reviews"
        );

        let resp = self
            .client
            .get(self.reviews_url())
            .query(&query.query_pairs())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PlayError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.bytes().await?;
        let items = serde_json::from_slice::<ReviewsResponse>(&body)?.into_items();
        tracing::info!(count = items.len(), "Fetched Play Store reviews");

        Ok(items)
    }
}
