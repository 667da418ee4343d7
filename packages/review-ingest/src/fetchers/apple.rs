//! App Store customer-review feed fetcher.
//!
//! The feed is Atom XML served in pages of 50 entries with no total count.
//! Page 1 starts with a pseudo-entry describing the app itself, which is
//! not a review.

use tracing::{debug, info, warn};

use crate::error::{FetchError, FetchResult};
use crate::traits::page_source::PageSource;
use crate::types::config::{AppleFeedConfig, PageErrorPolicy};
use crate::types::record::{parse_rating, Source, SourceRecord};

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
const ITUNES_NS: &str = "http://itunes.apple.com/rss";

/// Result of requesting one feed page.
#[derive(Debug)]
pub enum PageOutcome {
    /// The page carried reviews.
    Entries {
        records: Vec<SourceRecord>,
        /// Entry count before the page-1 metadata entry was removed
        raw_count: usize,
    },
    /// The page carried no reviews; the feed is done.
    Exhausted,
    /// The request failed or the body was not a feed.
    Failed(FetchError),
}

/// Paginates the App Store review feed for one app.
pub struct AppleFetcher<P: PageSource> {
    source: P,
    config: AppleFeedConfig,
}

impl<P: PageSource> AppleFetcher<P> {
    /// Create a fetcher with the default feed configuration.
    pub fn new(source: P) -> Self {
        Self::with_config(source, AppleFeedConfig::default())
    }

    pub fn with_config(source: P, config: AppleFeedConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &AppleFeedConfig {
        &self.config
    }

    /// URL of one feed page, newest reviews first.
    pub fn feed_url(&self, app_id: &str, country: &str, page: u32) -> String {
        format!(
            "{}/{}/rss/customerreviews/page={}/id={}/sortby=mostrecent/xml",
            self.config.base_url, country, page, app_id
        )
    }

    /// Request and parse a single page.
    pub async fn fetch_page(&self, app_id: &str, country: &str, page: u32) -> PageOutcome {
        let url = self.feed_url(app_id, country, page);
        debug!(page, url = %url, "Fetching App Store feed page");

        let body = match self.source.fetch_page(&url).await {
            Ok(body) => body,
            Err(e) => return PageOutcome::Failed(e),
        };

        match parse_feed(&body, page == 1) {
            Ok((records, _)) if records.is_empty() => PageOutcome::Exhausted,
            Ok((records, raw_count)) => PageOutcome::Entries { records, raw_count },
            Err(reason) => PageOutcome::Failed(FetchError::MalformedFeed { page, reason }),
        }
    }

    /// Fetch up to `max_reviews` reviews, newest first.
    ///
    /// Stops when enough reviews were collected, when a page is empty, or
    /// after a page shorter than the configured page size. A failed page
    /// ends pagination with the reviews collected so far unless the error
    /// policy is `Propagate`.
    pub async fn fetch(
        &self,
        app_id: &str,
        country: &str,
        max_reviews: usize,
    ) -> FetchResult<Vec<SourceRecord>> {
        info!(app_id, country, max_reviews, "Fetching App Store reviews");

        let mut reviews: Vec<SourceRecord> = Vec::new();
        let mut page: u32 = 1;

        while reviews.len() < max_reviews {
            match self.fetch_page(app_id, country, page).await {
                PageOutcome::Entries { records, raw_count } => {
                    debug!(page, parsed = records.len(), raw_count, "Feed page parsed");
                    reviews.extend(records);

                    if raw_count < self.config.page_size {
                        debug!(page, raw_count, "Short page, feed finished");
                        break;
                    }
                    page += 1;
                }
                PageOutcome::Exhausted => {
                    debug!(page, "No more reviews in feed");
                    break;
                }
                PageOutcome::Failed(e) => match self.config.error_policy {
                    PageErrorPolicy::TreatAsExhausted => {
                        warn!(page, error = %e, kept = reviews.len(), "Feed page failed, keeping partial result");
                        break;
                    }
                    PageErrorPolicy::Propagate => return Err(e),
                },
            }
        }

        reviews.truncate(max_reviews);
        info!(app_id, count = reviews.len(), "Collected App Store reviews");
        Ok(reviews)
    }
}

/// Parse one feed page into review records.
///
/// Returns the records and the number of `entry` elements on the page
/// before the metadata entry was removed.
pub fn parse_feed(xml: &str, strip_metadata: bool) -> Result<(Vec<SourceRecord>, usize), String> {
    let doc = roxmltree::Document::parse(xml).map_err(|e| e.to_string())?;

    let entries: Vec<roxmltree::Node> = doc
        .descendants()
        .filter(|n| n.has_tag_name((ATOM_NS, "entry")))
        .collect();
    let raw_count = entries.len();
    let skip = if strip_metadata { 1 } else { 0 };

    let records = entries
        .into_iter()
        .skip(skip)
        .map(|entry| parse_entry(&entry))
        .collect();

    Ok((records, raw_count))
}

fn parse_entry(entry: &roxmltree::Node) -> SourceRecord {
    let author = child(entry, ATOM_NS, "author")
        .map(|author| child_text(&author, ATOM_NS, "name").unwrap_or_default());
    let rating = child_text(entry, ITUNES_NS, "rating").and_then(|r| parse_rating(&r));

    SourceRecord::new(Source::Apple)
        .with_author(author)
        .with_title(child_text(entry, ATOM_NS, "title"))
        // The first content element is the plain-text body; an html twin follows it
        .with_text(child_text(entry, ATOM_NS, "content"))
        .with_rating(rating)
}

fn child<'a, 'input>(
    node: &roxmltree::Node<'a, 'input>,
    ns: &str,
    name: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    node.children().find(|c| c.has_tag_name((ns, name)))
}

fn child_text(node: &roxmltree::Node, ns: &str, name: &str) -> Option<String> {
    child(node, ns, name).and_then(|c| c.text().map(|t| t.to_string()))
}
