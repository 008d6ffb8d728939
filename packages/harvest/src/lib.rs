//! Caregiver Resource Harvesting Library
//!
//! Crawls paginated resource directories and turns their listing pages into
//! structured caregiver-resource records using LLM extraction.
//!
//! # Design Philosophy
//!
//! **"Fetch dumb, extract smart"**
//!
//! - The fetch layer knows pagination and CSS scoping, nothing else
//! - The LLM does all record-shaping against a fixed JSON schema
//! - Validation and dedup run in one place, after extraction
//! - Trait seams everywhere a network call happens, so the whole pipeline
//!   runs against mocks
//!
//! # Usage
//!
//! ```rust,ignore
//! use harvest::{crawl_listing, CrawlConfig, ExtractionStrategy};
//! use harvest::{HttpFetcher, OpenAiExtractor};
//!
//! let config = CrawlConfig::new("https://example.org/resources");
//! let strategy = ExtractionStrategy::care_resources(extractor.model());
//! let fetcher = HttpFetcher::new();
//! let extractor = OpenAiExtractor::groq_from_env()?;
//!
//! let outcome = crawl_listing(&config, &strategy, &fetcher, &extractor).await?;
//! harvest::output::write_csv_file("resources.csv", &outcome.records)?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (Fetcher, Extractor)
//! - [`types`] - Record, config, and usage types
//! - [`pipeline`] - The crawl loop and the extraction strategy
//! - [`fetchers`] - Fetcher implementations (HTTP, rate-limited, mock)
//! - [`extractors`] - Extractor implementations (OpenAI-compatible, mock)
//! - [`output`] - CSV and gzipped JSON serialization
//! - [`security`] - API credential handling

pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod output;
pub mod pipeline;
pub mod security;
pub mod traits;
pub mod types;
pub mod util;

// Re-export core types at crate root
pub use error::{ConfigError, ExtractError, FetchError, HarvestError};
pub use traits::{
    extractor::Extractor,
    fetcher::{FetchOutcome, Fetcher, ListingPage},
};
pub use types::{
    config::CrawlConfig,
    resource::{CareResource, CareResourceBatch, ResourceCategory},
    usage::UsageStats,
};

// Re-export pipeline components
pub use pipeline::{crawl_listing, CrawlOutcome, CrawlReport, ExtractionStrategy};

// Re-export fetchers and extractors
pub use extractors::{MockExtractor, OpenAiExtractor};
pub use fetchers::{FetcherExt, HttpFetcher, MockFetcher, RateLimitedFetcher};

// Re-export credential handling
pub use security::credentials::{ApiCredentials, SecretString};

pub use util::sanitize_filename;
