//! Source fetchers.
//!
//! - `AppleFetcher` - paginates the App Store review feed
//! - `PlayFetcher` - one query to the Play Store collaborator
//! - `HttpPageSource` / `RateLimitedPageSource` - transport for the feed

mod apple;
mod http;
mod play;
mod rate_limited;

pub use apple::{parse_feed, AppleFetcher, PageOutcome};
pub use http::{HttpPageSource, DEFAULT_TIMEOUT};
pub use play::{normalize_item, PlayFetcher};
pub use rate_limited::RateLimitedPageSource;
