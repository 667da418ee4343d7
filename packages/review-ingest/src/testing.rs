//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the ingestion library
//! without touching the network or the filesystem.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use play_client::{ReviewItem, ReviewQuery};

use crate::error::{AnalysisError, AnalysisResult, FetchError, FetchResult};
use crate::traits::{
    analyzer::ReviewAnalyzer, page_source::PageSource, play_source::PlayReviewSource,
    sink::DatasetLocation,
};

/// Canned response for one URL.
#[derive(Debug, Clone)]
enum MockResponse {
    Body(String),
    Status(u16),
}

/// Mock page source with canned bodies by URL.
///
/// URLs without a canned response answer with HTTP 404. Clones share state,
/// so a test can keep a handle for assertions after moving one into a fetcher.
#[derive(Default, Clone)]
pub struct MockPageSource {
    responses: Arc<RwLock<HashMap<String, MockResponse>>>,
    requests: Arc<RwLock<Vec<String>>>,
}

impl MockPageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    pub fn with_body(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(url.into(), MockResponse::Body(body.into()));
        self
    }

    /// Answer `url` with a non-success status.
    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(url.into(), MockResponse::Status(status));
        self
    }

    /// URLs requested so far, in order.
    pub fn requested_urls(&self) -> Vec<String> {
        self.requests.read().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for MockPageSource {
    async fn fetch_page(&self, url: &str) -> FetchResult<String> {
        self.requests.write().unwrap().push(url.to_string());

        let response = self.responses.read().unwrap().get(url).cloned();
        match response {
            Some(MockResponse::Body(body)) => Ok(body),
            Some(MockResponse::Status(status)) => Err(FetchError::Status {
                status,
                url: url.to_string(),
            }),
            None => Err(FetchError::Status {
                status: 404,
                url: url.to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// One entry for [`apple_feed_xml`].
#[derive(Debug, Clone, Default)]
pub struct FeedEntry {
    pub author: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub rating: Option<String>,
}

impl FeedEntry {
    /// A complete review entry.
    pub fn review(author: impl Into<String>, content: impl Into<String>, rating: u8) -> Self {
        Self {
            author: Some(author.into()),
            title: Some("Review".to_string()),
            content: Some(content.into()),
            rating: Some(rating.to_string()),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn without_rating(mut self) -> Self {
        self.rating = None;
        self
    }
}

/// Render an App Store review feed page.
///
/// With `with_metadata`, a leading app-description entry is emitted the way
/// page 1 of the real feed does.
pub fn apple_feed_xml(entries: &[FeedEntry], with_metadata: bool) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <feed xmlns:im=\"http://itunes.apple.com/rss\" xmlns=\"http://www.w3.org/2005/Atom\" xml:lang=\"en\">\n\
         <id>https://itunes.apple.com/rss/customerreviews</id>\n\
         <title>iTunes Store: Customer Reviews</title>\n",
    );

    if with_metadata {
        xml.push_str(
            "<entry><updated>2024-01-01T00:00:00-07:00</updated>\
             <id>1234567890</id><title>Bank App - Example Bank</title>\
             <im:name>Bank App</im:name><im:artist>Example Bank</im:artist></entry>\n",
        );
    }

    for (i, entry) in entries.iter().enumerate() {
        xml.push_str("<entry>");
        xml.push_str(&format!("<id>{}</id>", 10_000 + i));
        if let Some(author) = &entry.author {
            xml.push_str(&format!(
                "<author><name>{}</name><uri>https://itunes.apple.com/us/reviews/id{}</uri></author>",
                escape(author),
                i
            ));
        }
        if let Some(title) = &entry.title {
            xml.push_str(&format!("<title>{}</title>", escape(title)));
        }
        if let Some(content) = &entry.content {
            xml.push_str(&format!(
                "<content type=\"text\">{0}</content><content type=\"html\">{1}</content>",
                escape(content),
                escape(&format!("<p>{}</p>", content))
            ));
        }
        if let Some(rating) = &entry.rating {
            xml.push_str(&format!("<im:rating>{}</im:rating>", escape(rating)));
        }
        xml.push_str("<im:version>1.0</im:version></entry>\n");
    }

    xml.push_str("</feed>\n");
    xml
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Mock Play Store collaborator returning canned items.
#[derive(Default, Clone)]
pub struct MockPlaySource {
    items: Arc<RwLock<Vec<ReviewItem>>>,
    fail_with: Arc<RwLock<Option<u16>>>,
    queries: Arc<RwLock<Vec<ReviewQuery>>>,
    ignore_count: bool,
}

impl MockPlaySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item as the service would return it.
    pub fn with_item(
        self,
        user_name: Option<&str>,
        content: Option<&str>,
        score: Option<i64>,
    ) -> Self {
        self.items.write().unwrap().push(ReviewItem {
            review_id: None,
            user_name: user_name.map(str::to_string),
            content: content.map(str::to_string),
            score,
        });
        self
    }

    /// Add `n` complete items.
    pub fn with_reviews(self, n: usize) -> Self {
        for i in 0..n {
            self.items.write().unwrap().push(ReviewItem {
                review_id: Some(format!("gp:{}", i)),
                user_name: Some(format!("player{}", i)),
                content: Some(format!("play review {}", i)),
                score: Some(3),
            });
        }
        self
    }

    /// Return every canned item regardless of the requested count, like a
    /// service that over-delivers.
    pub fn ignoring_count(mut self) -> Self {
        self.ignore_count = true;
        self
    }

    /// Make every query fail with the given service status.
    pub fn failing(self, status: u16) -> Self {
        *self.fail_with.write().unwrap() = Some(status);
        self
    }

    /// Queries received so far.
    pub fn queries(&self) -> Vec<ReviewQuery> {
        self.queries.read().unwrap().clone()
    }
}

#[async_trait]
impl PlayReviewSource for MockPlaySource {
    async fn reviews(&self, query: &ReviewQuery) -> FetchResult<Vec<ReviewItem>> {
        self.queries.write().unwrap().push(query.clone());

        if let Some(status) = *self.fail_with.read().unwrap() {
            return Err(FetchError::Play(play_client::PlayError::Api {
                status,
                message: "mock failure".to_string(),
            }));
        }

        let items = self.items.read().unwrap();
        if self.ignore_count {
            return Ok(items.clone());
        }
        Ok(items.iter().take(query.count).cloned().collect())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Mock analyzer that reports `<input>.analyzed.csv` without writing anything.
#[derive(Default, Clone)]
pub struct MockAnalyzer {
    calls: Arc<RwLock<Vec<DatasetLocation>>>,
    fail: bool,
}

impl MockAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// An analyzer whose every call fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Inputs received so far.
    pub fn calls(&self) -> Vec<DatasetLocation> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl ReviewAnalyzer for MockAnalyzer {
    async fn analyze(&self, input: &DatasetLocation) -> AnalysisResult<DatasetLocation> {
        self.calls.write().unwrap().push(input.clone());

        if self.fail {
            return Err(AnalysisError::Other("mock analyzer failure".to_string()));
        }
        Ok(DatasetLocation::new(format!("{}.analyzed.csv", input)))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
