//! Fetcher trait for the page-fetch layer.
//!
//! The pipeline consumes the fetch layer as a black box: give it a page
//! number, get back either the rendered page content or an end-of-results
//! signal. Implementations:
//!
//! - `HttpFetcher` - reqwest-backed, CSS-selector content extraction
//! - `RateLimitedFetcher` - wraps any fetcher with a requests/second cap
//! - `MockFetcher` - canned pages for tests

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::FetchResult;
use crate::types::config::CrawlConfig;

/// Content of one fetched listing page, reduced to text.
#[derive(Debug, Clone)]
pub struct ListingPage {
    /// URL the page was fetched from
    pub url: String,

    /// 1-based listing page number
    pub page_number: u32,

    /// Text content of the configured content container
    pub text: String,

    /// When the page was fetched
    pub fetched_at: DateTime<Utc>,
}

impl ListingPage {
    /// Create a listing page.
    pub fn new(url: impl Into<String>, page_number: u32, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            page_number,
            text: text.into(),
            fetched_at: Utc::now(),
        }
    }

    /// Whether there is any non-whitespace content.
    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Outcome of fetching one listing page.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The page rendered content to extract from
    Page(ListingPage),

    /// The site reported no more results; the crawl is done
    NoMoreResults,
}

/// Fetch layer seam.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch listing page `page` (1-based) for the configured base URL.
    ///
    /// Returns `NoMoreResults` when the site signals the end of the
    /// listing (marker text, empty content container, or 404). Transport
    /// failures are errors and end the run.
    async fn fetch_page(&self, config: &CrawlConfig, page: u32) -> FetchResult<FetchOutcome>;

    /// Fetcher name, for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}
