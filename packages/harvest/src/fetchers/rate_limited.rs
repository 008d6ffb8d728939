//! Rate-limited fetcher wrapper.
//!
//! Wraps any Fetcher implementation with rate limiting using the governor
//! crate.

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

use crate::error::FetchResult;
use crate::traits::fetcher::{FetchOutcome, Fetcher};
use crate::types::config::CrawlConfig;

type DefaultRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// A fetcher wrapper that enforces a requests-per-second cap.
///
/// The cap is `NonZeroU32` so a zero rate is unrepresentable; callers
/// validate user input before constructing the wrapper.
pub struct RateLimitedFetcher<F: Fetcher> {
    inner: F,
    limiter: Arc<DefaultRateLimiter>,
}

impl<F: Fetcher> RateLimitedFetcher<F> {
    /// Create a new rate-limited fetcher capped at `requests_per_second`.
    pub fn new(fetcher: F, requests_per_second: NonZeroU32) -> Self {
        Self {
            inner: fetcher,
            limiter: Arc::new(RateLimiter::direct(Quota::per_second(requests_per_second))),
        }
    }
}

#[async_trait]
impl<F: Fetcher> Fetcher for RateLimitedFetcher<F> {
    async fn fetch_page(&self, config: &CrawlConfig, page: u32) -> FetchResult<FetchOutcome> {
        self.limiter.until_ready().await;
        self.inner.fetch_page(config, page).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Extension trait for easy rate limiting.
pub trait FetcherExt: Fetcher + Sized {
    /// Wrap this fetcher with rate limiting.
    fn rate_limited(self, requests_per_second: NonZeroU32) -> RateLimitedFetcher<Self> {
        RateLimitedFetcher::new(self, requests_per_second)
    }
}

impl<F: Fetcher + Sized> FetcherExt for F {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetchers::mock::MockFetcher;
    use crate::traits::fetcher::ListingPage;
    use std::time::Instant;

    fn rps(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[tokio::test]
    async fn test_rate_limiting_spaces_requests() {
        let mock = MockFetcher::new()
            .with_page(ListingPage::new("https://example.org?page=1", 1, "one"))
            .with_page(ListingPage::new("https://example.org?page=2", 2, "two"))
            .with_page(ListingPage::new("https://example.org?page=3", 3, "three"));

        let fetcher = mock.rate_limited(rps(2));
        let config = CrawlConfig::new("https://example.org");

        let start = Instant::now();
        for page in 1..=3 {
            fetcher.fetch_page(&config, page).await.unwrap();
        }
        let elapsed = start.elapsed();

        // 3 requests at 2/sec: first immediate, the rest wait
        assert!(
            elapsed.as_millis() >= 500,
            "rate limiting not applied: {:?}",
            elapsed
        );
    }

    #[tokio::test]
    async fn test_passes_through_outcome() {
        let mock = MockFetcher::new().with_page(ListingPage::new("https://e.org", 1, "content"));
        let fetcher = mock.rate_limited(rps(10));
        let config = CrawlConfig::new("https://e.org");

        match fetcher.fetch_page(&config, 1).await.unwrap() {
            FetchOutcome::Page(page) => assert_eq!(page.text, "content"),
            FetchOutcome::NoMoreResults => panic!("expected page"),
        }
        assert!(matches!(
            fetcher.fetch_page(&config, 2).await.unwrap(),
            FetchOutcome::NoMoreResults
        ));
    }
}
