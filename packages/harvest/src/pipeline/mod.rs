//! Crawl orchestration.

pub mod crawl;
pub mod strategy;

pub use crawl::{crawl_listing, CrawlOutcome, CrawlReport};
pub use strategy::ExtractionStrategy;
