//! Fetcher implementations.

pub mod http;
pub mod mock;
pub mod rate_limited;

pub use http::HttpFetcher;
pub use mock::MockFetcher;
pub use rate_limited::{FetcherExt, RateLimitedFetcher};
