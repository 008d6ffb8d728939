//! Extractor trait for LLM record extraction.
//!
//! Implementations wrap a specific LLM provider and handle prompting and
//! response parsing. The pipeline hands over raw page text and gets back
//! zero or more raw records; validation and dedup happen afterwards.

use async_trait::async_trait;

use crate::error::ExtractResult;
use crate::pipeline::strategy::ExtractionStrategy;
use crate::types::resource::CareResource;
use crate::types::usage::UsageStats;

/// LLM seam.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract records from one page's text.
    ///
    /// A page with no matching content yields an empty vector, not an
    /// error. `ExtractError::MalformedResponse` is recoverable (the page
    /// is skipped); other errors end the run.
    async fn extract(
        &self,
        page_text: &str,
        strategy: &ExtractionStrategy,
    ) -> ExtractResult<Vec<CareResource>>;

    /// Snapshot of token usage accumulated so far.
    fn usage(&self) -> UsageStats;

    /// Extractor name, for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}
