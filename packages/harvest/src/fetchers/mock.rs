//! Mock fetcher for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::{FetchOutcome, Fetcher, ListingPage};
use crate::types::config::CrawlConfig;

/// Mock fetcher with canned pages keyed by page number.
///
/// Page numbers without a canned page return `NoMoreResults`, so a mock
/// with pages 1 and 2 behaves like a two-page listing.
///
/// # Example
///
/// ```rust
/// use harvest::fetchers::MockFetcher;
/// use harvest::traits::fetcher::ListingPage;
///
/// let mock = MockFetcher::new()
///     .with_page(ListingPage::new("https://example.org", 1, "page one text"));
/// ```
#[derive(Default)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<u32, ListingPage>>>,
    failures: Arc<RwLock<HashSet<u32>>>,
    calls: Arc<RwLock<Vec<u32>>>,
}

impl MockFetcher {
    /// Create an empty mock (every page is end-of-results).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a canned page (builder).
    pub fn with_page(self, page: ListingPage) -> Self {
        self.add_page(page);
        self
    }

    /// Script a transport failure for a page number (builder).
    pub fn with_failure(self, page_number: u32) -> Self {
        self.failures.write().unwrap().insert(page_number);
        self
    }

    /// Add a canned page.
    pub fn add_page(&self, page: ListingPage) {
        self.pages.write().unwrap().insert(page.page_number, page);
    }

    /// Page numbers requested so far, in order.
    pub fn calls(&self) -> Vec<u32> {
        self.calls.read().unwrap().clone()
    }

    /// Number of fetch calls made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

impl Clone for MockFetcher {
    fn clone(&self) -> Self {
        Self {
            pages: Arc::clone(&self.pages),
            failures: Arc::clone(&self.failures),
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch_page(&self, config: &CrawlConfig, page: u32) -> FetchResult<FetchOutcome> {
        self.calls.write().unwrap().push(page);

        if self.failures.read().unwrap().contains(&page) {
            return Err(FetchError::Http {
                url: config.page_url(page),
                source: "scripted transport failure".into(),
            });
        }

        match self.pages.read().unwrap().get(&page) {
            Some(listing) => Ok(FetchOutcome::Page(listing.clone())),
            None => Ok(FetchOutcome::NoMoreResults),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_canned_pages_and_end_of_results() {
        let mock = MockFetcher::new()
            .with_page(ListingPage::new("https://e.org", 1, "one"))
            .with_page(ListingPage::new("https://e.org?page=2", 2, "two"));

        let config = CrawlConfig::new("https://e.org");

        assert!(matches!(
            mock.fetch_page(&config, 1).await.unwrap(),
            FetchOutcome::Page(_)
        ));
        assert!(matches!(
            mock.fetch_page(&config, 3).await.unwrap(),
            FetchOutcome::NoMoreResults
        ));
        assert_eq!(mock.calls(), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_scripted_failure() {
        let mock = MockFetcher::new().with_failure(1);
        let config = CrawlConfig::new("https://e.org");

        assert!(mock.fetch_page(&config, 1).await.is_err());
    }
}
